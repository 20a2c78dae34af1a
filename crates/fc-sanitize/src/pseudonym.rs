//! Stable pseudonym assignment for paths and URLs.
//!
//! Repeated values map to the same token within a run. Token state lives
//! in an explicit [`Pseudonymizer`] owned by the engine, not in module
//! globals, and is discarded at the end of the run; tokens carry no
//! meaning across runs.

use std::collections::{HashMap, HashSet};

use crate::hash::{digest, FULL_DIGEST_LEN, PATH_DIGEST_LEN};

/// Token prefix for pseudonymized filesystem paths.
pub const PATH_TOKEN_PREFIX: &str = "/redacted/path/";

/// Token prefix for pseudonymized URLs.
pub const URL_TOKEN_PREFIX: &str = "redacted://url/";

/// Scheme markers a value must start with to be URL-pseudonymized.
pub const URL_MARKERS: &[&str] = &["https://", "http://", "git@"];

/// Per-run token state for path and URL pseudonymization.
///
/// This is the only mutable state in the engine. Assignment is lazy and
/// idempotent: the first occurrence of a value mints its token, and every
/// later occurrence returns the stored one. Paths and URLs keep separate
/// maps, so the same string could in principle hold a token in each.
#[derive(Debug, Default)]
pub struct Pseudonymizer {
    path_map: HashMap<String, String>,
    url_map: HashMap<String, String>,
    issued_path_tokens: HashSet<String>,
    issued_url_tokens: HashSet<String>,
    url_passthroughs: u64,
}

impl Pseudonymizer {
    /// Create an empty pseudonymizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stable token for a filesystem path.
    pub fn tokenize_path(&mut self, original: &str) -> String {
        if let Some(token) = self.path_map.get(original) {
            return token.clone();
        }
        let token = mint(original, PATH_TOKEN_PREFIX, &self.issued_path_tokens);
        self.issued_path_tokens.insert(token.clone());
        self.path_map.insert(original.to_string(), token.clone());
        token
    }

    /// Return the stable token for a URL.
    ///
    /// Only values starting with a recognized scheme marker are
    /// tokenized; anything else passes through unchanged. The
    /// pass-through is counted and logged so a run can surface values
    /// that reached the URL path without looking like URLs.
    pub fn tokenize_url(&mut self, original: &str) -> String {
        if !URL_MARKERS.iter().any(|m| original.starts_with(m)) {
            self.url_passthroughs += 1;
            tracing::warn!(
                value_len = original.len(),
                "url-keyed value without a scheme marker passed through unmodified"
            );
            return original.to_string();
        }
        if let Some(token) = self.url_map.get(original) {
            return token.clone();
        }
        let token = mint(original, URL_TOKEN_PREFIX, &self.issued_url_tokens);
        self.issued_url_tokens.insert(token.clone());
        self.url_map.insert(original.to_string(), token.clone());
        token
    }

    /// Values that reached [`Self::tokenize_url`] without a scheme
    /// marker and passed through unmodified.
    pub fn url_passthroughs(&self) -> u64 {
        self.url_passthroughs
    }

    /// Distinct paths tokenized so far.
    pub fn distinct_paths(&self) -> usize {
        self.path_map.len()
    }

    /// Distinct URLs tokenized so far.
    pub fn distinct_urls(&self) -> usize {
        self.url_map.len()
    }
}

/// Mint a token for a value not seen before in its category.
///
/// Starts from the standard truncated digest and doubles the digest
/// length whenever the candidate token was already issued to a different
/// value, up to the full digest. First-seen values always keep the short
/// token, so collision-free corpora get identical output either way.
fn mint(original: &str, prefix: &str, issued: &HashSet<String>) -> String {
    let mut len = PATH_DIGEST_LEN;
    loop {
        let token = format!("{}{}", prefix, digest(original, len));
        if !issued.contains(&token) || len >= FULL_DIGEST_LEN {
            return token;
        }
        len = (len * 2).min(FULL_DIGEST_LEN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_token_idempotent() {
        let mut p = Pseudonymizer::new();
        let first = p.tokenize_path("/Users/alice/proj");
        let second = p.tokenize_path("/Users/alice/proj");
        assert_eq!(first, second);
        assert_eq!(p.distinct_paths(), 1);
    }

    #[test]
    fn test_path_token_shape() {
        let mut p = Pseudonymizer::new();
        let token = p.tokenize_path("/Users/alice/proj");
        assert!(token.starts_with(PATH_TOKEN_PREFIX));
        assert_eq!(token.len(), PATH_TOKEN_PREFIX.len() + PATH_DIGEST_LEN);
    }

    #[test]
    fn test_distinct_paths_distinct_tokens() {
        let mut p = Pseudonymizer::new();
        assert_ne!(p.tokenize_path("/a"), p.tokenize_path("/b"));
        assert_eq!(p.distinct_paths(), 2);
    }

    #[test]
    fn test_url_token_shape() {
        let mut p = Pseudonymizer::new();
        let token = p.tokenize_url("https://github.com/acme/widget");
        assert!(token.starts_with(URL_TOKEN_PREFIX));
        assert_eq!(token.len(), URL_TOKEN_PREFIX.len() + PATH_DIGEST_LEN);
    }

    #[test]
    fn test_url_markers_recognized() {
        let mut p = Pseudonymizer::new();
        for url in ["https://example.com", "http://example.com", "git@github.com:acme/widget.git"] {
            let token = p.tokenize_url(url);
            assert!(token.starts_with(URL_TOKEN_PREFIX), "{} not tokenized", url);
        }
        assert_eq!(p.url_passthroughs(), 0);
    }

    #[test]
    fn test_url_passthrough_counted() {
        let mut p = Pseudonymizer::new();
        let out = p.tokenize_url("not a url");
        assert_eq!(out, "not a url");
        assert_eq!(p.url_passthroughs(), 1);
        assert_eq!(p.distinct_urls(), 0);
    }

    #[test]
    fn test_path_and_url_maps_are_separate() {
        let mut p = Pseudonymizer::new();
        let as_path = p.tokenize_path("https://example.com");
        let as_url = p.tokenize_url("https://example.com");
        assert_ne!(as_path, as_url);
        assert!(as_path.starts_with(PATH_TOKEN_PREFIX));
        assert!(as_url.starts_with(URL_TOKEN_PREFIX));
    }

    #[test]
    fn test_mint_extends_on_collision() {
        // Force a collision by pre-issuing the short token another value
        // would get.
        let short = format!("{}{}", PATH_TOKEN_PREFIX, digest("/collider", PATH_DIGEST_LEN));
        let mut issued = HashSet::new();
        issued.insert(short.clone());

        let token = mint("/collider", PATH_TOKEN_PREFIX, &issued);
        assert_ne!(token, short);
        assert_eq!(token.len(), PATH_TOKEN_PREFIX.len() + PATH_DIGEST_LEN * 2);
        // The longer token still derives from the same digest.
        assert!(token.starts_with(&short));
    }
}
