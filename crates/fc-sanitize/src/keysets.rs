//! Classification key sets.
//!
//! The classifier consults four named key sets: path-bearing keys,
//! URL-bearing keys, safe enum/identifier keys, and free-text keys. The
//! defaults cover the session-log schemas this tool is pointed at;
//! integrators extend the sets (or load a replacement from JSON) without
//! touching classifier logic.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Keys whose values are filesystem paths.
pub const DEFAULT_PATH_KEYS: &[&str] = &["cwd", "workdir", "path", "file", "filePath", "entrypoint_path"];

/// Keys whose values are URLs or remote references.
pub const DEFAULT_URL_KEYS: &[&str] = &["repository_url", "url", "href", "webhookPath"];

/// Keys whose values are non-identifying, operationally necessary enums
/// and identifiers. Preserved verbatim so the fixture stays usable.
pub const DEFAULT_SAFE_ENUM_KEYS: &[&str] = &[
    "model",
    "model_provider",
    "cli_version",
    "type",
    "role",
    "source",
    "originator",
];

/// Keys whose values are free text and must be redacted.
pub const DEFAULT_FREE_TEXT_KEYS: &[&str] = &[
    "message",
    "text",
    "content",
    "prompt",
    "justification",
    "description",
    "body",
    "summary",
    "question",
    "cmd",
    "instruction",
    "developer_instructions",
    "user_instructions",
    "base_instructions",
    "input",
    "arguments",
    "output",
    "last_agent_message",
    "new_str",
    "selection_with_ellipsis",
];

/// The classification key sets consulted by the field classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySets {
    /// Keys whose values are pseudonymized as filesystem paths.
    #[serde(default)]
    pub paths: HashSet<String>,

    /// Keys whose values are pseudonymized as URLs.
    #[serde(default)]
    pub urls: HashSet<String>,

    /// Keys whose values are preserved verbatim.
    #[serde(default)]
    pub safe_enums: HashSet<String>,

    /// Keys whose values are redacted as free text.
    #[serde(default)]
    pub free_text: HashSet<String>,
}

impl KeySets {
    /// Load key sets from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let sets: KeySets = serde_json::from_str(&content)?;
        Ok(sets)
    }

    /// Save key sets to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Add path-bearing keys.
    pub fn extend_paths<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        self.paths.extend(keys);
    }

    /// Add URL-bearing keys.
    pub fn extend_urls<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        self.urls.extend(keys);
    }

    /// Add safe enum/identifier keys.
    pub fn extend_safe_enums<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        self.safe_enums.extend(keys);
    }

    /// Add free-text keys.
    pub fn extend_free_text<I: IntoIterator<Item = String>>(&mut self, keys: I) {
        self.free_text.extend(keys);
    }
}

impl Default for KeySets {
    fn default() -> Self {
        Self {
            paths: to_set(DEFAULT_PATH_KEYS),
            urls: to_set(DEFAULT_URL_KEYS),
            safe_enums: to_set(DEFAULT_SAFE_ENUM_KEYS),
            free_text: to_set(DEFAULT_FREE_TEXT_KEYS),
        }
    }
}

fn to_set(keys: &[&str]) -> HashSet<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_membership() {
        let sets = KeySets::default();
        assert!(sets.paths.contains("cwd"));
        assert!(sets.urls.contains("repository_url"));
        assert!(sets.safe_enums.contains("model"));
        assert!(sets.free_text.contains("content"));
        assert!(!sets.free_text.contains("cwd"));
    }

    #[test]
    fn test_extend() {
        let mut sets = KeySets::default();
        sets.extend_paths(["sandbox_root".to_string()]);
        sets.extend_free_text(["annotation".to_string()]);
        assert!(sets.paths.contains("sandbox_root"));
        assert!(sets.free_text.contains("annotation"));
    }

    #[test]
    fn test_json_roundtrip() {
        let sets = KeySets::default();
        let json = serde_json::to_string_pretty(&sets).unwrap();
        let parsed: KeySets = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.paths, sets.paths);
        assert_eq!(parsed.free_text, sets.free_text);
    }

    #[test]
    fn test_partial_file_fills_empty_sets() {
        // A keysets file may name only the sets it overrides.
        let parsed: KeySets = serde_json::from_str(r#"{"paths": ["cwd"]}"#).unwrap();
        assert!(parsed.paths.contains("cwd"));
        assert!(parsed.urls.is_empty());
        assert!(parsed.free_text.is_empty());
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keysets.json");

        let mut sets = KeySets::default();
        sets.extend_urls(["artifact_url".to_string()]);
        sets.save(&path).unwrap();

        let loaded = KeySets::load(&path).unwrap();
        assert!(loaded.urls.contains("artifact_url"));
        assert_eq!(loaded.paths, sets.paths);
    }
}
