//! Error types for the sanitization engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, SanitizeError>;

/// Errors that can occur loading or saving classification key sets.
///
/// Sanitization itself is total: every JSON value maps to a sanitized
/// value without error.
#[derive(Error, Debug)]
pub enum SanitizeError {
    /// I/O failure reading or writing a key-set file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A key-set file was not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
