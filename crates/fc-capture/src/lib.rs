//! Session transcoding and fixture assembly.
//!
//! This crate is the I/O layer around the `fc-sanitize` engine: it walks
//! a directory of captured JSONL session files, feeds every line through
//! the sanitizer, writes the sanitized copy with 1:1 line
//! correspondence, tallies per-type statistics, and emits the fixture
//! manifest and README.

pub mod error;
pub mod manifest;
pub mod stats;
pub mod transcode;

pub use error::{CaptureError, Result};
pub use manifest::Manifest;
pub use stats::RunStats;
pub use transcode::Transcoder;
