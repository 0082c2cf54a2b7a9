//! Conversion statistics for batches of files

use super::outcome::ConversionOutcome;
use std::path::Path;

/// Statistics for converting a batch of files
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConversionStats {
    /// Number of input files seen
    pub files_seen: usize,
    /// Files delivered to the results sink
    pub converted: usize,
    /// Files that were not FlowTracker2 measurements
    pub cannot_parse: usize,
    /// FlowTracker2 files that failed to convert
    pub invalid: usize,
    /// One message per file that did not convert
    pub failures: Vec<String>,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one file
    pub fn record(&mut self, path: &Path, outcome: &ConversionOutcome) {
        self.files_seen += 1;
        match outcome {
            ConversionOutcome::SuccessfullyParsedValid { .. } => self.converted += 1,
            ConversionOutcome::CannotParse { .. } => {
                self.cannot_parse += 1;
                self.failures.push(format!("{}: {}", path.display(), outcome));
            }
            ConversionOutcome::ParsedButInvalid { .. } => {
                self.invalid += 1;
                self.failures.push(format!("{}: {}", path.display(), outcome));
            }
        }
    }

    /// Record a file that failed before it could be converted (e.g. unreadable)
    pub fn record_failure(&mut self, path: &Path, message: impl AsRef<str>) {
        self.files_seen += 1;
        self.invalid += 1;
        self.failures
            .push(format!("{}: {}", path.display(), message.as_ref()));
    }

    /// Combine statistics from another batch
    pub fn merge(&mut self, other: ConversionStats) {
        self.files_seen += other.files_seen;
        self.converted += other.converted;
        self.cannot_parse += other.cannot_parse;
        self.invalid += other.invalid;
        self.failures.extend(other.failures);
    }

    /// Percentage of seen files that converted
    pub fn success_rate(&self) -> f64 {
        if self.files_seen == 0 {
            100.0
        } else {
            (self.converted as f64 / self.files_seen as f64) * 100.0
        }
    }

    /// True when some FlowTracker2 file failed to convert
    pub fn has_invalid(&self) -> bool {
        self.invalid > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Conversion Summary: {} files | converted: {} ({:.1}%) | not FlowTracker2: {} | invalid: {}",
            self.files_seen,
            self.converted,
            self.success_rate(),
            self.cannot_parse,
            self.invalid
        )
    }
}
