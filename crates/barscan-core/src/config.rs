use crate::app_config::AppConfig;
use crate::geo::GeoPoint;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The API key is optional at this stage: commands that only tile a region
/// never need it. Searches call [`AppConfig::require_rest_api_key`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(var, format!("{raw} is not a finite number")))
        }
    };

    let parse_u32_in = |var: &str, default: &str, min: u32, max: u32| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(invalid(var, format!("{value} is outside {min}..={max}")))
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let optional = |var: &str| lookup(var).ok().filter(|v| !v.trim().is_empty());

    let kakao_rest_api_key = optional("KAKAO_REST_API_KEY");
    let kakao_map_api_key = optional("KAKAO_MAP_API_KEY");
    let api_base_url = or_default("BARSCAN_API_BASE_URL", "https://dapi.kakao.com/");
    let log_level = or_default("BARSCAN_LOG_LEVEL", "info");

    let center_lat = parse_f64("BARSCAN_DEFAULT_CENTER_LAT", "37.5665")?;
    let center_lng = parse_f64("BARSCAN_DEFAULT_CENTER_LNG", "126.978")?;
    let default_level = u8::try_from(parse_u32_in("BARSCAN_DEFAULT_LEVEL", "8", 1, 14)?)
        .map_err(|e| invalid("BARSCAN_DEFAULT_LEVEL", e.to_string()))?;

    let grid_cell_size_m = parse_f64("BARSCAN_GRID_CELL_SIZE_M", "100")?;
    if grid_cell_size_m <= 0.0 {
        return Err(invalid(
            "BARSCAN_GRID_CELL_SIZE_M",
            "cell size must be greater than zero".to_string(),
        ));
    }

    // Upper bounds follow the provider's documented limits.
    let search_radius_m = parse_u32_in("BARSCAN_SEARCH_RADIUS_M", "71", 1, 20_000)?;
    let max_page = parse_u32_in("BARSCAN_MAX_PAGE", "45", 1, 45)?;
    let results_per_page = parse_u32_in("BARSCAN_RESULTS_PER_PAGE", "15", 1, 15)?;

    let category_group_code = or_default("BARSCAN_CATEGORY_GROUP_CODE", "FD6");
    let category_filter = or_default("BARSCAN_CATEGORY_FILTER", "음식점 > 술집");

    let page_delay_ms = parse_u64("BARSCAN_PAGE_DELAY_MS", "50")?;
    let cell_delay_ms = parse_u64("BARSCAN_CELL_DELAY_MS", "100")?;
    let request_timeout_secs = parse_u64("BARSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BARSCAN_USER_AGENT", "barscan/0.1 (region-sweep)");

    Ok(AppConfig {
        kakao_rest_api_key,
        kakao_map_api_key,
        api_base_url,
        default_center: GeoPoint::new(center_lat, center_lng),
        default_level,
        log_level,
        grid_cell_size_m,
        search_radius_m,
        max_page,
        results_per_page,
        category_group_code,
        category_filter,
        page_delay_ms,
        cell_delay_ms,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
