//! Fixture manifest and README emission.
//!
//! The manifest records what a fixture contains and what was done to it:
//! sanitization guarantees, input file tallies, and the observed line
//! types. Downstream consumers read it instead of re-deriving counts
//! from the JSONL files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{CaptureError, Result};
use crate::stats::RunStats;

/// Current manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

/// Top-level fixture manifest, serialized to `manifest.json`.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub manifest_version: u32,
    pub source_family: String,
    pub fixture_date: String,
    pub capture_status: String,
    pub generated_at: String,
    pub sanitization: SanitizationFlags,
    pub input_files: InputFiles,
    pub observed_line_types: BTreeMap<String, u64>,
    pub expected_outputs: ExpectedOutputs,
}

/// What the sanitizer guarantees about this fixture.
#[derive(Debug, Serialize)]
pub struct SanitizationFlags {
    pub text_redacted: bool,
    pub paths_pseudonymized: bool,
    pub urls_pseudonymized: bool,
    pub ids_pseudonymized: bool,
    pub models_preserved: bool,
    pub token_counts_preserved: bool,
    pub timestamps_preserved: bool,
    /// URL-keyed values that passed through without a scheme marker.
    pub url_passthroughs: u64,
}

/// Input tallies for the capture run.
#[derive(Debug, Serialize)]
pub struct InputFiles {
    pub session_file_count: usize,
    pub jsonl_line_count_total: u64,
}

/// Locations of the golden output files within the fixture.
#[derive(Debug, Serialize)]
pub struct ExpectedOutputs {
    pub sessions: String,
    pub stats: String,
}

impl Manifest {
    /// Build a manifest from a finished run.
    pub fn new(source_family: &str, fixture_date: &str, stats: &RunStats) -> Self {
        Self {
            manifest_version: MANIFEST_VERSION,
            source_family: source_family.to_string(),
            fixture_date: fixture_date.to_string(),
            capture_status: "sanitized_raw_captured_unverified".to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            sanitization: SanitizationFlags {
                text_redacted: true,
                paths_pseudonymized: true,
                urls_pseudonymized: true,
                ids_pseudonymized: false,
                models_preserved: true,
                token_counts_preserved: true,
                timestamps_preserved: true,
                url_passthroughs: stats.url_passthroughs,
            },
            input_files: InputFiles {
                session_file_count: stats.files,
                jsonl_line_count_total: stats.lines_total,
            },
            observed_line_types: stats.type_counts.clone(),
            expected_outputs: ExpectedOutputs {
                sessions: "expected/sessions.json".to_string(),
                stats: "expected/stats.json".to_string(),
            },
        }
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content + "\n").map_err(|e| CaptureError::io(path, e))?;
        Ok(())
    }
}

/// Write the fixture README describing the sanitization guarantees.
pub fn write_readme(output_dir: &Path, source_family: &str, fixture_date: &str) -> Result<()> {
    let path = output_dir.join("README.md");
    let content = format!(
        "# {} Fixture {}\n\n\
         Sanitized fixture derived from captured session JSONL logs.\n\n\
         Sanitization guarantees:\n\
         - token counts preserved\n\
         - timestamps preserved\n\
         - event ordering preserved\n\
         - models preserved\n\
         - free-text content redacted\n\
         - local paths and URLs pseudonymized\n\n\
         Notes:\n\
         - `expected/` files are placeholders until parser/schema outputs are finalized.\n",
        source_family, fixture_date
    );
    fs::write(&path, content).map_err(|e| CaptureError::io(&path, e))?;
    Ok(())
}

/// Create placeholder golden files so the fixture layout exists before
/// the real expected outputs are captured. Existing files are kept.
pub fn write_expected_placeholders(expected_dir: &Path) -> Result<()> {
    fs::create_dir_all(expected_dir).map_err(|e| CaptureError::io(expected_dir, e))?;
    for name in ["sessions.json", "stats.json"] {
        let path = expected_dir.join(name);
        if !path.exists() {
            fs::write(&path, "{\n  \"_status\": \"pending\"\n}\n")
                .map_err(|e| CaptureError::io(&path, e))?;
        }
    }
    Ok(())
}
