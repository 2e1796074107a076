//! Fetch errors

use thiserror::Error;

/// Errors fetching data from the console API
///
/// These abort a comparison run; they are never reconciliation errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be built
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response within the configured timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Non-2xx response
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body is not valid JSON or does not match the expected shape
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body is JSON but not a list of objects
    #[error("unexpected response from {url}: {reason}")]
    UnexpectedBody { url: String, reason: String },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source,
            }
        }
    }
}
