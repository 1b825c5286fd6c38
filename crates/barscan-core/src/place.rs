use serde::{Deserialize, Serialize};

/// A place returned by the category search, after normalization.
///
/// Values are kept as the API's strings; numeric columns are parsed on demand
/// by [`parse_numeric`]. Empty strings stand for missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Provider place ID; the deduplication key across overlapping cells.
    pub id: String,
    pub name: String,
    /// Hierarchical category, e.g. `"음식점 > 술집 > 호프,요리주점"`.
    pub category_path: String,
    pub address_legacy: String,
    pub address_road: String,
    pub phone: String,
    pub longitude: String,
    pub latitude: String,
    pub detail_url: String,
    /// Distance from the query point in meters.
    pub distance_meters: String,
}

impl PlaceRecord {
    /// Every field's string value, `id` first.
    #[must_use]
    pub fn field_values(&self) -> [&str; 10] {
        [
            &self.id,
            &self.name,
            &self.category_path,
            &self.address_legacy,
            &self.address_road,
            &self.phone,
            &self.longitude,
            &self.latitude,
            &self.detail_url,
            &self.distance_meters,
        ]
    }
}

/// Lenient float parse used for numeric columns: unparseable or missing
/// values (and NaN) become `0.0`.
#[must_use]
pub fn parse_numeric(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}
