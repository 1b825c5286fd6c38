pub mod app_config;
pub mod config;
pub mod geo;
pub mod grid;
pub mod place;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{BoundingRegion, GeoPoint, ParsePointError};
pub use grid::{cell_steps, tile, CellBounds, GridCell, METERS_PER_DEGREE};
pub use place::{parse_numeric, PlaceRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
