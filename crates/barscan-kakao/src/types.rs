//! Kakao Local category-search response types.
//!
//! Models `GET /v2/local/search/category.json`. Every document field arrives
//! as a JSON string; absent fields deserialize to empty strings.

use barscan_core::PlaceRecord;
use serde::Deserialize;

/// Response envelope: `{ "documents": [...], "meta": {...} }`.
#[derive(Debug, Deserialize)]
pub struct CategorySearchResponse {
    #[serde(default)]
    pub documents: Vec<PlaceDocument>,
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    /// `true` on the last page of results for this query.
    pub is_end: bool,
    #[serde(default)]
    pub total_count: Option<u32>,
    /// Number of results reachable through pagination (capped by the API).
    #[serde(default)]
    pub pageable_count: Option<u32>,
}

/// One place as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDocument {
    /// Empty when the API omits it; such documents cannot be deduplicated.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub place_name: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_group_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address_name: String,
    #[serde(default)]
    pub road_address_name: String,
    /// Longitude.
    #[serde(default)]
    pub x: String,
    /// Latitude.
    #[serde(default)]
    pub y: String,
    #[serde(default)]
    pub place_url: String,
    /// Meters from the query point; empty unless `x`/`y` were sent.
    #[serde(default)]
    pub distance: String,
}

impl From<PlaceDocument> for PlaceRecord {
    fn from(doc: PlaceDocument) -> Self {
        Self {
            id: doc.id,
            name: doc.place_name,
            category_path: doc.category_name,
            address_legacy: doc.address_name,
            address_road: doc.road_address_name,
            phone: doc.phone,
            longitude: doc.x,
            latitude: doc.y,
            detail_url: doc.place_url,
            distance_meters: doc.distance,
        }
    }
}
