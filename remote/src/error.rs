//! Error types for the remote suggestion call.

use thiserror::Error;

/// Errors from the remote suggestion request.
///
/// Timeouts carry their own variant so callers can log them distinctly from
/// other transport failures.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request did not complete within the connect timeout.
    #[error("suggestion request timed out: {0}")]
    Timeout(reqwest::Error),

    /// Any other transport-level failure.
    #[error("suggestion request failed: {0}")]
    Request(reqwest::Error),

    /// The service answered with a non-success status.
    #[error("suggestion service returned status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the expected JSON array.
    #[error("malformed suggestion response: {0}")]
    Body(#[from] serde_json::Error),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else {
            Self::Request(err)
        }
    }
}

/// Convenience alias for results with [`RemoteError`].
pub type Result<T> = std::result::Result<T, RemoteError>;
