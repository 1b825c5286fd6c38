//! Region selection flags shared by `grid` and `search`.

use barscan_core::{BoundingRegion, GeoPoint};
use clap::Args;

#[derive(Debug, Clone, Args)]
pub(crate) struct RegionArgs {
    /// Southwest corner of a rectangle, as "lat,lng".
    #[arg(long, value_name = "LAT,LNG", requires = "ne", allow_hyphen_values = true)]
    pub(crate) sw: Option<GeoPoint>,

    /// Northeast corner of a rectangle, as "lat,lng".
    #[arg(long, value_name = "LAT,LNG", requires = "sw", allow_hyphen_values = true)]
    pub(crate) ne: Option<GeoPoint>,

    /// Polygon vertices separated by ';'. Only the bounding envelope is searched.
    #[arg(
        long,
        value_name = "LAT,LNG;...",
        value_delimiter = ';',
        num_args = 1..,
        allow_hyphen_values = true,
        conflicts_with_all = ["sw", "ne"]
    )]
    pub(crate) polygon: Vec<GeoPoint>,
}

impl RegionArgs {
    /// The selected region, or `None` when no region flags were given.
    pub(crate) fn to_region(&self) -> Option<BoundingRegion> {
        match (self.sw, self.ne) {
            (Some(sw), Some(ne)) => Some(BoundingRegion::from_corners(sw, ne)),
            _ => BoundingRegion::from_polygon(&self.polygon),
        }
    }
}

/// One-line summary shown once a region is chosen.
pub(crate) fn describe_region(region: &BoundingRegion, cells: usize, cell_size_m: f64) -> String {
    let area_km2 = region.area_square_meters() / 1_000_000.0;
    format!(
        "Area: {area_km2:.2} km² | Center: ({:.4}, {:.4}) | \
         {cells} grid cells of {cell_size_m}m × {cell_size_m}m",
        region.center.lat, region.center.lng
    )
}

/// Shown instead of an error when no region flags were supplied.
pub(crate) fn no_region_hint(default_center: GeoPoint, default_level: u8) -> String {
    format!(
        "No region selected. Pass --sw/--ne or --polygon \
         (map default: {default_center}, level {default_level})."
    )
}
