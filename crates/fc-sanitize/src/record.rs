//! Structure-preserving record sanitization.
//!
//! The [`Sanitizer`] walks an arbitrary JSON value and applies the field
//! classifier to every string leaf. Containers keep their exact shape:
//! same key sets, same key order, same sequence lengths and order.

use serde_json::{json, Map, Value};

use crate::classify::{classify, redact_text, Disposition};
use crate::keysets::KeySets;
use crate::pseudonym::Pseudonymizer;

/// Sentinel `type` for input lines that failed to parse as JSON.
pub const MALFORMED_TYPE: &str = "malformed_line";

/// The sanitization engine: classification policy plus per-run token
/// state.
///
/// One `Sanitizer` spans one run; sharing it across several files keeps
/// path and URL tokens consistent between them.
pub struct Sanitizer {
    keysets: KeySets,
    pseudonyms: Pseudonymizer,
}

impl Sanitizer {
    /// Create a sanitizer with the given key sets and empty token maps.
    pub fn new(keysets: KeySets) -> Self {
        Self {
            keysets,
            pseudonyms: Pseudonymizer::new(),
        }
    }

    /// Token state accumulated so far in this run.
    pub fn pseudonyms(&self) -> &Pseudonymizer {
        &self.pseudonyms
    }

    /// The key sets this sanitizer classifies with.
    pub fn keysets(&self) -> &KeySets {
        &self.keysets
    }

    /// Sanitize one parsed record (document root, empty key context).
    pub fn sanitize(&mut self, value: &Value) -> Value {
        self.sanitize_with_key(value, "")
    }

    /// Sanitize a subtree under an inherited key context.
    ///
    /// Objects give each child its own key; arrays pass the parent key
    /// through unchanged, so every element of an array under a free-text
    /// key is redacted under that key. Non-string scalars are returned
    /// as-is.
    pub fn sanitize_with_key(&mut self, value: &Value, key: &str) -> Value {
        match value {
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), self.sanitize_with_key(v, k));
                }
                Value::Object(out)
            }
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.sanitize_with_key(v, key)).collect())
            }
            Value::String(s) => Value::String(self.sanitize_string(key, s)),
            _ => value.clone(),
        }
    }

    /// Wrap a raw line that failed to parse as JSON into a sentinel
    /// record, its text redacted like any other free text.
    pub fn sanitize_malformed(&mut self, raw_line: &str) -> Value {
        json!({
            "type": MALFORMED_TYPE,
            "raw": redact_text("raw", raw_line.trim_end()),
        })
    }

    fn sanitize_string(&mut self, key: &str, value: &str) -> String {
        match classify(&self.keysets, key, value) {
            Disposition::Preserve => value.to_string(),
            Disposition::PseudonymizePath => self.pseudonyms.tokenize_path(value),
            Disposition::PseudonymizeUrl => self.pseudonyms.tokenize_url(value),
            Disposition::RedactText => {
                let label = if key.is_empty() { "string" } else { key };
                redact_text(label, value)
            }
        }
    }
}
