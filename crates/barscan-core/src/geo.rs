//! Geographic value types shared by the grid, the API client, and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grid::METERS_PER_DEGREE;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate \"{input}\": {reason}")]
pub struct ParsePointError {
    pub input: String,
    pub reason: String,
}

/// Parses `"lat,lng"` (whitespace around either number is ignored).
impl FromStr for GeoPoint {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason: &str| ParsePointError {
            input: s.to_owned(),
            reason: reason.to_owned(),
        };

        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| fail("expected \"lat,lng\""))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| fail("latitude is not a number"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| fail("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(fail("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(fail("longitude must be within [-180, 180]"));
        }

        Ok(Self { lat, lng })
    }
}

/// Axis-aligned search region with a precomputed midpoint.
///
/// Construct through [`BoundingRegion::from_corners`] or
/// [`BoundingRegion::from_polygon`] so that `southwest <= northeast` holds on
/// both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub southwest: GeoPoint,
    pub northeast: GeoPoint,
    pub center: GeoPoint,
}

impl BoundingRegion {
    /// Builds a region from any two opposite corners of a rectangle.
    #[must_use]
    pub fn from_corners(a: GeoPoint, b: GeoPoint) -> Self {
        let southwest = GeoPoint::new(a.lat.min(b.lat), a.lng.min(b.lng));
        let northeast = GeoPoint::new(a.lat.max(b.lat), a.lng.max(b.lng));
        Self {
            southwest,
            northeast,
            center: midpoint(southwest, northeast),
        }
    }

    /// Bounding envelope of a polygon's vertices.
    ///
    /// Only the envelope is kept; the polygon's true shape is not used for
    /// tiling. Returns `None` when `vertices` is empty.
    #[must_use]
    pub fn from_polygon(vertices: &[GeoPoint]) -> Option<Self> {
        let first = vertices.first()?;
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        let (mut min_lng, mut max_lng) = (first.lng, first.lng);

        for p in &vertices[1..] {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let southwest = GeoPoint::new(min_lat, min_lng);
        let northeast = GeoPoint::new(max_lat, max_lng);
        Some(Self {
            southwest,
            northeast,
            center: midpoint(southwest, northeast),
        })
    }

    /// `true` when the region has zero (or negative) extent on either axis.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.northeast.lat <= self.southwest.lat || self.northeast.lng <= self.southwest.lng
    }

    /// Approximate area in square meters, for display only.
    ///
    /// Uses the same flat-earth scale as the grid: 111 km per degree of
    /// latitude, scaled by `cos(center.lat)` for longitude.
    #[must_use]
    pub fn area_square_meters(&self) -> f64 {
        let lat_meters = (self.northeast.lat - self.southwest.lat) * METERS_PER_DEGREE;
        let lng_meters = (self.northeast.lng - self.southwest.lng)
            * METERS_PER_DEGREE
            * self.center.lat.to_radians().cos();
        (lat_meters * lng_meters).abs()
    }
}

fn midpoint(a: GeoPoint, b: GeoPoint) -> GeoPoint {
    GeoPoint::new((a.lat + b.lat) / 2.0, (a.lng + b.lng) / 2.0)
}
