//! HTTP client for the Kakao Local REST API.
//!
//! Wraps `reqwest` with the `KakaoAK` authorization header, status-code
//! classification, and typed response deserialization. One call is one page;
//! multi-page sweeps live in [`crate::sweep`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::KakaoError;
use crate::types::CategorySearchResponse;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com/";
const CATEGORY_SEARCH_PATH: &str = "v2/local/search/category.json";

/// Parameters for one category-search page request.
#[derive(Debug, Clone, Copy)]
pub struct CategoryQuery<'a> {
    pub category_group_code: &'a str,
    /// Longitude of the query point.
    pub x: f64,
    /// Latitude of the query point.
    pub y: f64,
    pub radius_m: u32,
    /// 1-based page number.
    pub page: u32,
    pub size: u32,
}

/// Client for the Kakao Local category-search endpoint.
///
/// Use [`KakaoClient::new`] for production or [`KakaoClient::with_base_url`]
/// to point at a mock server in tests.
pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl KakaoClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, KakaoError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KakaoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`KakaoError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, KakaoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| KakaoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of category-search results around a point.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Unauthorized`] on HTTP 401 or 403.
    /// - [`KakaoError::RateLimited`] on HTTP 429.
    /// - [`KakaoError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`KakaoError::Http`] on network or TLS failure.
    /// - [`KakaoError::Deserialize`] if the body does not match the expected shape.
    pub async fn category_page(
        &self,
        query: &CategoryQuery<'_>,
    ) -> Result<CategorySearchResponse, KakaoError> {
        let url = self.category_url(query)?;

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(KakaoError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(KakaoError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            return Err(KakaoError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<CategorySearchResponse>(&body).map_err(|e| {
            KakaoError::Deserialize {
                context: format!(
                    "category page {} at ({}, {})",
                    query.page, query.y, query.x
                ),
                source: e,
            }
        })
    }

    /// Builds the category-search URL with percent-encoded query parameters.
    fn category_url(&self, query: &CategoryQuery<'_>) -> Result<Url, KakaoError> {
        let mut url =
            self.base_url
                .join(CATEGORY_SEARCH_PATH)
                .map_err(|e| KakaoError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("category_group_code", query.category_group_code)
            .append_pair("x", &query.x.to_string())
            .append_pair("y", &query.y.to_string())
            .append_pair("radius", &query.radius_m.to_string())
            .append_pair("page", &query.page.to_string())
            .append_pair("size", &query.size.to_string());
        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
