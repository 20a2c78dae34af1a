//! Per-run transcoding statistics.
//!
//! The transcoder tallies what it saw; the manifest layer serializes the
//! tallies. Counts are keyed by the record's `type` field, with a
//! designated bucket for records that lack one and the sentinel type for
//! lines that failed to parse.

use std::collections::BTreeMap;

use serde::Serialize;

use fc_sanitize::MALFORMED_TYPE;

/// Bucket for records whose `type` field is absent or not a string.
pub const MISSING_TYPE_BUCKET: &str = "<missing>";

/// Counters accumulated over one capture run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStats {
    /// Session files processed.
    pub files: usize,

    /// Non-blank input lines seen, valid and malformed alike.
    pub lines_total: u64,

    /// Count per observed `type` value. Malformed lines appear under
    /// their sentinel type; typeless records under the missing bucket.
    pub type_counts: BTreeMap<String, u64>,

    /// URL-keyed values that passed through without a scheme marker.
    pub url_passthroughs: u64,
}

impl RunStats {
    /// Tally one record with the given `type` value.
    pub fn record_type(&mut self, event_type: &str) {
        *self.type_counts.entry(event_type.to_string()).or_insert(0) += 1;
    }

    /// Tally one record lacking a string `type` field.
    pub fn record_missing_type(&mut self) {
        self.record_type(MISSING_TYPE_BUCKET);
    }

    /// Tally one line that failed to parse as JSON.
    pub fn record_malformed(&mut self) {
        self.record_type(MALFORMED_TYPE);
    }

    /// Lines that failed to parse as JSON.
    pub fn malformed_lines(&self) -> u64 {
        self.type_counts.get(MALFORMED_TYPE).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tallies() {
        let mut stats = RunStats::default();
        stats.record_type("user_message");
        stats.record_type("user_message");
        stats.record_type("turn_ended");
        stats.record_missing_type();
        stats.record_malformed();

        assert_eq!(stats.type_counts["user_message"], 2);
        assert_eq!(stats.type_counts["turn_ended"], 1);
        assert_eq!(stats.type_counts[MISSING_TYPE_BUCKET], 1);
        assert_eq!(stats.malformed_lines(), 1);
    }

    #[test]
    fn test_malformed_lines_zero_when_absent() {
        assert_eq!(RunStats::default().malformed_lines(), 0);
    }

    #[test]
    fn test_serializes_with_sorted_type_keys() {
        let mut stats = RunStats::default();
        stats.record_type("zeta");
        stats.record_type("alpha");
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.find("alpha").unwrap() < json.find("zeta").unwrap());
    }
}
