//! Error types for fixture capture.
//!
//! Engine-side recovery (malformed lines, unclassifiable values) never
//! surfaces here; these errors cover the surrounding file I/O, which is
//! fatal to a run.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur assembling a fixture.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// I/O failure, with the path it occurred on.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure loading the key-set policy file.
    #[error("key sets: {0}")]
    KeySets(#[from] fc_sanitize::SanitizeError),

    /// JSON serialization failure writing the manifest.
    #[error("manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl CaptureError {
    /// Attach a path to an I/O error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        CaptureError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
