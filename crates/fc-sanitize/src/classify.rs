//! Field classification.
//!
//! Given a JSON key and a string value, the classifier decides whether
//! the value is preserved, pseudonymized, or redacted. The policy is an
//! ordered rule list evaluated top to bottom; the first matching rule
//! wins. Key-set rules come first, then value-shape heuristics as
//! fallbacks for keys the sets do not name, and the final rule redacts
//! anything left over.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::hash::{digest, TEXT_DIGEST_LEN};
use crate::keysets::KeySets;

/// What to do with a string value, decided per `(key, value)` pair.
///
/// Recomputed on every lookup; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the value exactly as captured.
    Preserve,
    /// Replace with a stable path token.
    PseudonymizePath,
    /// Replace with a stable URL token (non-URL-shaped values pass
    /// through, see [`crate::Pseudonymizer::tokenize_url`]).
    PseudonymizeUrl,
    /// Replace with a fixed-shape redaction placeholder.
    RedactText,
}

/// Keys whose UUID-shaped values are structural identifiers, not content.
const STRUCTURAL_ID_KEYS: &[&str] = &["id", "session_id", "sessionId"];

static RE_ISO_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?Z$").unwrap());

static RE_PLAIN_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static RE_UUIDISH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)[0-9a-f]{8,}-[0-9a-f-]{8,}$").unwrap());

static RE_ENUM_SAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9._:/-]+$").unwrap());

/// Longest value the enum-shaped fallback will preserve.
const ENUM_SAFE_MAX_CHARS: usize = 40;

/// One classification rule: a predicate over `(key sets, key, value)`
/// and the disposition assigned when it matches.
pub struct Rule {
    /// Short name, used in rule-level tests and diagnostics.
    pub name: &'static str,
    pub matches: fn(&KeySets, &str, &str) -> bool,
    pub disposition: Disposition,
}

fn key_in_paths(sets: &KeySets, key: &str, _value: &str) -> bool {
    sets.paths.contains(key)
}

fn key_in_urls(sets: &KeySets, key: &str, _value: &str) -> bool {
    sets.urls.contains(key)
}

fn timestamp_shaped(_sets: &KeySets, _key: &str, value: &str) -> bool {
    RE_ISO_TIMESTAMP.is_match(value) || RE_PLAIN_DATE.is_match(value)
}

fn timestamp_suffixed_key(_sets: &KeySets, key: &str, _value: &str) -> bool {
    key.to_ascii_lowercase().ends_with("timestamp")
}

fn key_in_safe_enums(sets: &KeySets, key: &str, _value: &str) -> bool {
    sets.safe_enums.contains(key)
}

fn structural_id(_sets: &KeySets, key: &str, value: &str) -> bool {
    STRUCTURAL_ID_KEYS.contains(&key) && RE_UUIDISH.is_match(value)
}

fn key_in_free_text(sets: &KeySets, key: &str, _value: &str) -> bool {
    sets.free_text.contains(key)
}

fn path_shaped(_sets: &KeySets, _key: &str, value: &str) -> bool {
    value.starts_with("/Users/") || value.starts_with("~/") || value.starts_with('/')
}

fn url_shaped(_sets: &KeySets, _key: &str, value: &str) -> bool {
    value.contains("://") || value.starts_with("git@")
}

fn enum_shaped(_sets: &KeySets, _key: &str, value: &str) -> bool {
    value.chars().count() <= ENUM_SAFE_MAX_CHARS && RE_ENUM_SAFE.is_match(value)
}

fn always(_sets: &KeySets, _key: &str, _value: &str) -> bool {
    true
}

/// The classification rules, in precedence order.
///
/// Order is the policy: key-set membership outranks value shape, and the
/// catch-all redaction rule is last so anything unclassifiable
/// over-redacts rather than leaks.
pub static RULES: &[Rule] = &[
    Rule { name: "path-key", matches: key_in_paths, disposition: Disposition::PseudonymizePath },
    Rule { name: "url-key", matches: key_in_urls, disposition: Disposition::PseudonymizeUrl },
    Rule { name: "timestamp-shaped", matches: timestamp_shaped, disposition: Disposition::Preserve },
    Rule { name: "timestamp-key", matches: timestamp_suffixed_key, disposition: Disposition::Preserve },
    Rule { name: "safe-enum-key", matches: key_in_safe_enums, disposition: Disposition::Preserve },
    Rule { name: "structural-id", matches: structural_id, disposition: Disposition::Preserve },
    Rule { name: "free-text-key", matches: key_in_free_text, disposition: Disposition::RedactText },
    Rule { name: "path-shaped", matches: path_shaped, disposition: Disposition::PseudonymizePath },
    Rule { name: "url-shaped", matches: url_shaped, disposition: Disposition::PseudonymizeUrl },
    Rule { name: "enum-shaped", matches: enum_shaped, disposition: Disposition::Preserve },
    Rule { name: "default-redact", matches: always, disposition: Disposition::RedactText },
];

/// Decide the disposition for a string value under `key`.
pub fn classify(sets: &KeySets, key: &str, value: &str) -> Disposition {
    for rule in RULES {
        if (rule.matches)(sets, key, value) {
            return rule.disposition;
        }
    }
    // The final rule always matches; this is never reached.
    Disposition::RedactText
}

/// Build the fixed-shape redaction placeholder for a text value.
///
/// The placeholder keeps the key name, the original length in characters,
/// and a short content digest, so duplicate redacted values stay
/// detectable without revealing any of the text.
pub fn redact_text(key: &str, value: &str) -> String {
    let label = if key.is_empty() { "text" } else { key };
    format!(
        "[REDACTED_{} len={} sha={}]",
        label.to_uppercase(),
        value.chars().count(),
        digest(value, TEXT_DIGEST_LEN)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> KeySets {
        KeySets::default()
    }

    fn rule(name: &str) -> &'static Rule {
        RULES.iter().find(|r| r.name == name).expect("rule exists")
    }

    #[test]
    fn test_rule_order_is_the_documented_precedence() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "path-key",
                "url-key",
                "timestamp-shaped",
                "timestamp-key",
                "safe-enum-key",
                "structural-id",
                "free-text-key",
                "path-shaped",
                "url-shaped",
                "enum-shaped",
                "default-redact",
            ]
        );
    }

    #[test]
    fn test_path_key_rule() {
        let r = rule("path-key");
        assert!((r.matches)(&sets(), "cwd", "anything"));
        assert!(!(r.matches)(&sets(), "content", "/Users/alice"));
    }

    #[test]
    fn test_url_key_rule() {
        let r = rule("url-key");
        assert!((r.matches)(&sets(), "repository_url", "https://example.com"));
        assert!(!(r.matches)(&sets(), "cwd", "https://example.com"));
    }

    #[test]
    fn test_timestamp_shaped_rule() {
        let r = rule("timestamp-shaped");
        assert!((r.matches)(&sets(), "", "2026-02-23T10:00:00Z"));
        assert!((r.matches)(&sets(), "", "2026-02-23T10:00:00.123Z"));
        assert!((r.matches)(&sets(), "", "2026-02-23"));
        assert!(!(r.matches)(&sets(), "", "2026-02-23T10:00:00"));
        assert!(!(r.matches)(&sets(), "", "not a date"));
    }

    #[test]
    fn test_timestamp_key_rule() {
        let r = rule("timestamp-key");
        assert!((r.matches)(&sets(), "timestamp", "whatever"));
        assert!((r.matches)(&sets(), "event_timestamp", "whatever"));
        assert!((r.matches)(&sets(), "EventTimestamp", "whatever"));
        assert!(!(r.matches)(&sets(), "timestamps", "whatever"));
    }

    #[test]
    fn test_structural_id_rule() {
        let r = rule("structural-id");
        assert!((r.matches)(&sets(), "id", "0123abcd-4567-89ab-cdef-0123456789ab"));
        assert!((r.matches)(&sets(), "session_id", "DEADBEEF01-CAFEBABE23"));
        // Short hex groups do not qualify.
        assert!(!(r.matches)(&sets(), "id", "abc-def"));
        // Only the designated keys get this treatment.
        assert!(!(r.matches)(&sets(), "trace_id", "0123abcd-4567-89ab-cdef-0123456789ab"));
    }

    #[test]
    fn test_path_shaped_rule() {
        let r = rule("path-shaped");
        assert!((r.matches)(&sets(), "", "/Users/alice/proj"));
        assert!((r.matches)(&sets(), "", "~/notes.txt"));
        assert!((r.matches)(&sets(), "", "/var/log/app.log"));
        assert!(!(r.matches)(&sets(), "", "relative/path"));
    }

    #[test]
    fn test_url_shaped_rule() {
        let r = rule("url-shaped");
        assert!((r.matches)(&sets(), "", "https://example.com/x"));
        assert!((r.matches)(&sets(), "", "git@github.com:acme/widget.git"));
        assert!(!(r.matches)(&sets(), "", "example.com"));
    }

    #[test]
    fn test_enum_shaped_rule() {
        let r = rule("enum-shaped");
        assert!((r.matches)(&sets(), "", "in_progress"));
        assert!((r.matches)(&sets(), "", "gpt-5.1-codex"));
        assert!((r.matches)(&sets(), "", "exit:0"));
        // Spaces break the identifier-safe character class.
        assert!(!(r.matches)(&sets(), "", "two words"));
        // Over the length cap.
        assert!(!(r.matches)(&sets(), "", &"a".repeat(41)));
    }

    #[test]
    fn test_classify_precedence_key_sets_beat_shape() {
        // A timestamp-shaped value under a path key is still a path.
        assert_eq!(
            classify(&sets(), "cwd", "2026-02-23"),
            Disposition::PseudonymizePath
        );
        // A short enum-like value under a free-text key is still redacted.
        assert_eq!(classify(&sets(), "content", "ok"), Disposition::RedactText);
    }

    #[test]
    fn test_classify_timestamp_beats_free_text_key() {
        // Shape rule 3 outranks the free-text key set.
        assert_eq!(
            classify(&sets(), "content", "2026-02-23T10:00:00Z"),
            Disposition::Preserve
        );
    }

    #[test]
    fn test_classify_fallbacks() {
        assert_eq!(classify(&sets(), "scratch", "/opt/tool"), Disposition::PseudonymizePath);
        assert_eq!(
            classify(&sets(), "scratch", "ssh://host/repo"),
            Disposition::PseudonymizeUrl
        );
        assert_eq!(classify(&sets(), "scratch", "enum_value"), Disposition::Preserve);
        assert_eq!(
            classify(&sets(), "scratch", "long free text with spaces"),
            Disposition::RedactText
        );
    }

    #[test]
    fn test_classify_unknown_key_long_value_redacts() {
        let value = "x".repeat(80);
        assert_eq!(classify(&sets(), "mystery", &value), Disposition::RedactText);
    }

    #[test]
    fn test_redact_text_shape() {
        let out = redact_text("content", "fix the bug in parser.py");
        assert_eq!(out, format!("[REDACTED_CONTENT len=24 sha={}]", digest("fix the bug in parser.py", 8)));
    }

    #[test]
    fn test_redact_text_empty_key_defaults() {
        let out = redact_text("", "anything");
        assert!(out.starts_with("[REDACTED_TEXT len=8 sha="));
    }

    #[test]
    fn test_redact_text_counts_chars_not_bytes() {
        let out = redact_text("message", "héllo");
        assert!(out.contains("len=5 "), "got {}", out);
    }
}
