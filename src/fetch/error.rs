use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {url}; please try again later")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed for {url} with status {status}; please try again later")]
    HttpStatus { url: String, status: StatusCode },

    #[error("Rate limited by {url} after {attempts} attempt(s); please try again later")]
    RateLimited { url: String, attempts: u32 },

    #[error("Failed to parse JSON returned by {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read '{path}'")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// The last HTTP status observed, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            FetchError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            FetchError::Network { source, .. } => source.status(),
            FetchError::Decode { .. } | FetchError::File { .. } => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }
}
