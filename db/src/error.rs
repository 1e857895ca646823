//! Error types for static table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the static JSON tables.
///
/// A missing file is surfaced as the typed [`NotFound`](DataError::NotFound)
/// variant so callers can catch it, log, and proceed without the data.
#[derive(Debug, Error)]
pub enum DataError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required static file does not exist.
    #[error("static data file not found: {0}")]
    NotFound(PathBuf),
}

/// Convenience alias for results with [`DataError`].
pub type Result<T> = std::result::Result<T, DataError>;
