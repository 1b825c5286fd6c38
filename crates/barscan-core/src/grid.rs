//! Region tiling for cell-by-cell category sweeps.
//!
//! Splits a [`BoundingRegion`] into square cells of a fixed physical size.
//! Meters are converted to degrees with a local flat-earth approximation; the
//! longitude scale is taken once from the region's center latitude and reused
//! for every row, so output depends only on the inputs.

use serde::{Deserialize, Serialize};

use crate::geo::{BoundingRegion, GeoPoint};

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub southwest: GeoPoint,
    pub northeast: GeoPoint,
}

/// One unit of search work: a square tile and its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub center: GeoPoint,
    pub bounds: CellBounds,
}

impl GridCell {
    /// `true` if `point` lies inside this cell's closed bounds.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        (self.bounds.southwest.lat..=self.bounds.northeast.lat).contains(&point.lat)
            && (self.bounds.southwest.lng..=self.bounds.northeast.lng).contains(&point.lng)
    }
}

/// Cell edge lengths in degrees for a region, as `(lat_step, lng_step)`.
///
/// Returns `None` when either step is not a positive finite number (zero or
/// negative cell size, or a center latitude at a pole).
#[must_use]
pub fn cell_steps(region: &BoundingRegion, cell_size_m: f64) -> Option<(f64, f64)> {
    let lat_step = cell_size_m / METERS_PER_DEGREE;
    let lng_step = cell_size_m / (METERS_PER_DEGREE * region.center.lat.to_radians().cos());
    let usable = |s: f64| s.is_finite() && s > 0.0;
    (usable(lat_step) && usable(lng_step)).then_some((lat_step, lng_step))
}

/// Tile `region` into `cell_size_m` squares in row-major order.
///
/// Rows run south to north, columns west to east. A cell is emitted while its
/// southwest corner is strictly below the region's northeast corner on both
/// axes, so the last row and column may overhang the region. A degenerate
/// region yields no cells.
#[must_use]
pub fn tile(region: &BoundingRegion, cell_size_m: f64) -> Vec<GridCell> {
    if region.is_degenerate() {
        return Vec::new();
    }
    let Some((lat_step, lng_step)) = cell_steps(region, cell_size_m) else {
        return Vec::new();
    };

    let sw = region.southwest;
    let ne = region.northeast;
    let mut cells = Vec::new();

    // Corners come from the row/column index, not a running sum, so adjacent
    // cells share edges exactly.
    let mut row = 0u32;
    loop {
        let lat = sw.lat + f64::from(row) * lat_step;
        let next_lat = sw.lat + f64::from(row + 1) * lat_step;
        if lat >= ne.lat {
            break;
        }
        let mut col = 0u32;
        loop {
            let lng = sw.lng + f64::from(col) * lng_step;
            let next_lng = sw.lng + f64::from(col + 1) * lng_step;
            if lng >= ne.lng {
                break;
            }
            cells.push(GridCell {
                center: GeoPoint::new(lat + lat_step / 2.0, lng + lng_step / 2.0),
                bounds: CellBounds {
                    southwest: GeoPoint::new(lat, lng),
                    northeast: GeoPoint::new(next_lat, next_lng),
                },
            });
            col += 1;
        }
        row += 1;
    }

    cells
}
