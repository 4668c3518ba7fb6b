//! Error types for signal fetching.

use thiserror::Error;

/// Why a fetch did not produce a payload.
///
/// The poll scheduler treats every variant the same way (the backend is
/// unreachable); the distinction only exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// The request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// No response arrived within the request timeout.
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
