//! Sanitization engine for session-log fixture capture.
//!
//! This crate provides the core transform that turns captured JSONL event
//! records into shareable test fixtures: free-text content is redacted,
//! filesystem paths and URLs are pseudonymized to stable opaque tokens,
//! and everything else (timestamps, model identifiers, event ordering,
//! structural shape) passes through unchanged.
//!
//! # Key Features
//!
//! - **Key-aware classification**: an ordered rule list decides, per
//!   `(key, value)` pair, whether a string is preserved, pseudonymized,
//!   or redacted. Unknown content falls through to redaction.
//! - **Stable tokens**: repeated paths and URLs map to the same opaque
//!   token within a run; token maps are never persisted.
//! - **Structure preservation**: sanitized records have the same key
//!   sets, key order, and sequence order as the input.
//! - **Malformed-line recovery**: lines that fail to parse are wrapped
//!   as sentinel records rather than dropped.
//!
//! # Example
//!
//! ```
//! use fc_sanitize::{KeySets, Sanitizer};
//! use serde_json::json;
//!
//! let mut sanitizer = Sanitizer::new(KeySets::default());
//! let record = json!({"type": "user_message", "cwd": "/Users/alice/proj"});
//! let clean = sanitizer.sanitize(&record);
//!
//! assert_eq!(clean["type"], "user_message");
//! assert!(clean["cwd"].as_str().unwrap().starts_with("/redacted/path/"));
//! ```

pub mod classify;
pub mod error;
pub mod hash;
pub mod keysets;
pub mod pseudonym;
pub mod record;

pub use classify::{classify, redact_text, Disposition, Rule, RULES};
pub use error::{Result, SanitizeError};
pub use hash::{digest, PATH_DIGEST_LEN, TEXT_DIGEST_LEN};
pub use keysets::KeySets;
pub use pseudonym::Pseudonymizer;
pub use record::{Sanitizer, MALFORMED_TYPE};
