use thiserror::Error;

/// Errors returned by the Kakao Local API client.
#[derive(Debug, Error)]
pub enum KakaoError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API rejected the REST key (401/403).
    #[error("Kakao API rejected the REST API key (HTTP {status})")]
    Unauthorized { status: u16 },

    /// HTTP 429. Not retried; the sweep's fixed delays exist to avoid it.
    #[error("rate limited by Kakao API (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
