use crate::geo::GeoPoint;
use crate::ConfigError;

/// Placeholder shipped in `.env.example`; treated the same as a missing key.
pub const PLACEHOLDER_REST_API_KEY: &str = "YOUR_REST_API_KEY_HERE";

#[derive(Clone)]
pub struct AppConfig {
    pub kakao_rest_api_key: Option<String>,
    pub kakao_map_api_key: Option<String>,
    pub api_base_url: String,
    pub default_center: GeoPoint,
    pub default_level: u8,
    pub log_level: String,
    pub grid_cell_size_m: f64,
    pub search_radius_m: u32,
    pub max_page: u32,
    pub results_per_page: u32,
    pub category_group_code: String,
    pub category_filter: String,
    pub page_delay_ms: u64,
    pub cell_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// REST key for the search API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `KAKAO_REST_API_KEY` is
    /// unset or blank, and [`ConfigError::InvalidEnvVar`] when it still holds
    /// the example placeholder.
    pub fn require_rest_api_key(&self) -> Result<&str, ConfigError> {
        const VAR: &str = "KAKAO_REST_API_KEY";
        let key = self
            .kakao_rest_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(VAR.to_string()))?;

        if key == PLACEHOLDER_REST_API_KEY {
            return Err(ConfigError::InvalidEnvVar {
                var: VAR.to_string(),
                reason: "still set to the example placeholder".to_string(),
            });
        }
        Ok(key)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "kakao_rest_api_key",
                &self.kakao_rest_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "kakao_map_api_key",
                &self.kakao_map_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("default_center", &self.default_center)
            .field("default_level", &self.default_level)
            .field("log_level", &self.log_level)
            .field("grid_cell_size_m", &self.grid_cell_size_m)
            .field("search_radius_m", &self.search_radius_m)
            .field("max_page", &self.max_page)
            .field("results_per_page", &self.results_per_page)
            .field("category_group_code", &self.category_group_code)
            .field("category_filter", &self.category_filter)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("cell_delay_ms", &self.cell_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
