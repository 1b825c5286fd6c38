pub mod client;
pub mod error;
pub mod sweep;
pub mod types;

pub use client::{CategoryQuery, KakaoClient};
pub use error::KakaoError;
pub use sweep::{matches_category, CategorySweep, SweepParams};
pub use types::{CategorySearchResponse, PageMeta, PlaceDocument};
