//! Error types for the request helper

use thiserror::Error;

/// Errors that can occur when talking to the Mentorhub REST server
///
/// Errors travel inside completion actions, so they are `Clone` and carry
/// owned strings instead of the underlying client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection-level failure (DNS, refused, reset)
    #[error("Request failed: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Server rejected the bearer token (or no token was sent)
    #[error("Unauthorized")]
    Unauthorized,

    /// Server returned a non-success status
    #[error("API error (status {status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Response body could not be decoded into the expected shape
    #[error("Response parsing failed: {0}")]
    Decode(String),

    /// Base URL and path did not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Map a status code and body to an error
    #[must_use]
    pub fn from_status(status: u16, body: String) -> Self {
        if status == 401 {
            Self::Unauthorized
        } else {
            Self::Status { status, body }
        }
    }

    /// Whether the server answered at all
    #[must_use]
    pub const fn is_server_response(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Status { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
