use thiserror::Error;

/// Failures talking to the Orders API. Every non-2xx response is an error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Orders API base URL is not configured (set api.base_url or NEXT_PUBLIC_API_BASE_URL)")]
    MissingBaseUrl,

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
