//! Content hashing for token derivation.
//!
//! Tokens are derived from an unkeyed SHA-256 digest of the original
//! value, truncated for readability. Truncation trades collision
//! resistance for token brevity; at fixture scale (hundreds of distinct
//! values) the risk is negligible, and the pseudonymizer falls back to a
//! longer digest if a truncated token is ever reused.

use sha2::{Digest, Sha256};

/// Digest length for path and URL tokens.
pub const PATH_DIGEST_LEN: usize = 10;

/// Digest length for redacted-text content fingerprints.
pub const TEXT_DIGEST_LEN: usize = 8;

/// Length of a full hex-encoded SHA-256 digest.
pub const FULL_DIGEST_LEN: usize = 64;

/// Compute a truncated lowercase-hex SHA-256 digest of `value`.
///
/// Pure and deterministic: the same input always yields the same output.
/// `len` is clamped to the full digest length.
pub fn digest(value: &str, len: usize) -> String {
    let hash = Sha256::digest(value.as_bytes());
    let mut encoded = hex::encode(hash);
    encoded.truncate(len.min(FULL_DIGEST_LEN));
    encoded
}
