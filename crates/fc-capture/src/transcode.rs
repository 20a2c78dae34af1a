//! JSONL session transcoding.
//!
//! Reads session files line by line, routes every line through the
//! sanitization engine, and writes exactly one compact JSON document per
//! non-blank input line. One [`Transcoder`] spans one run: the engine's
//! token maps are shared across all files so repeated paths and URLs
//! keep the same token everywhere in the fixture.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use fc_sanitize::{KeySets, Sanitizer};

use crate::error::{CaptureError, Result};
use crate::stats::RunStats;

/// Streams session lines through the sanitization engine.
pub struct Transcoder {
    sanitizer: Sanitizer,
    stats: RunStats,
}

impl Transcoder {
    /// Create a transcoder with fresh token state.
    pub fn new(keysets: KeySets) -> Self {
        Self {
            sanitizer: Sanitizer::new(keysets),
            stats: RunStats::default(),
        }
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Consume the transcoder and return the final run statistics.
    pub fn finish(mut self) -> RunStats {
        self.stats.url_passthroughs = self.sanitizer.pseudonyms().url_passthroughs();
        self.stats
    }

    /// Transcode one input line into one serialized output line.
    ///
    /// Blank lines return `None` and are not counted. A line that fails
    /// to parse as JSON is wrapped as a sentinel record instead of being
    /// dropped, so the output keeps 1:1 correspondence with non-blank
    /// input lines.
    pub fn transcode_line(&mut self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        self.stats.lines_total += 1;

        let sanitized = match serde_json::from_str::<Value>(line) {
            Ok(record) => {
                match record.get("type").and_then(Value::as_str) {
                    Some(event_type) => self.stats.record_type(event_type),
                    None => self.stats.record_missing_type(),
                }
                self.sanitizer.sanitize(&record)
            }
            Err(err) => {
                tracing::debug!(error = %err, "line failed to parse, wrapping as malformed");
                self.stats.record_malformed();
                self.sanitizer.sanitize_malformed(line)
            }
        };

        // Serializing a freshly built Value cannot fail.
        Some(serde_json::to_string(&sanitized).expect("serialize sanitized record"))
    }

    /// Transcode one session file into `output`.
    pub fn transcode_file(&mut self, input: &Path, output: &Path) -> Result<()> {
        let reader =
            BufReader::new(File::open(input).map_err(|e| CaptureError::io(input, e))?);
        let mut writer =
            BufWriter::new(File::create(output).map_err(|e| CaptureError::io(output, e))?);

        for line in reader.lines() {
            let line = line.map_err(|e| CaptureError::io(input, e))?;
            if let Some(out) = self.transcode_line(&line) {
                writeln!(writer, "{}", out).map_err(|e| CaptureError::io(output, e))?;
            }
        }

        writer.flush().map_err(|e| CaptureError::io(output, e))?;
        self.stats.files += 1;
        Ok(())
    }

    /// Transcode every `*.jsonl` file in `input_dir`, sorted by file
    /// name, into `output_dir` under the same names.
    pub fn transcode_dir(&mut self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|e| CaptureError::io(output_dir, e))?;

        let mut sessions: Vec<PathBuf> = fs::read_dir(input_dir)
            .map_err(|e| CaptureError::io(input_dir, e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
            .collect();
        sessions.sort();

        for src in &sessions {
            let name = src.file_name().expect("session file has a name");
            let dst = output_dir.join(name);
            tracing::info!(file = %src.display(), "transcoding session file");
            self.transcode_file(src, &dst)?;
        }
        Ok(())
    }
}
