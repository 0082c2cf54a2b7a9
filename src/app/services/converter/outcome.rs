//! Per-file conversion outcome

use crate::Error;
use crate::app::models::FieldVisit;
use std::fmt;

/// Terminal state of converting one file
#[derive(Debug)]
pub enum ConversionOutcome {
    /// Not a FlowTracker2 measurement
    CannotParse { reason: String },
    /// A FlowTracker2 measurement that could not be converted
    ParsedButInvalid { error: Error },
    /// Delivered to the results sink
    SuccessfullyParsedValid { visit: FieldVisit },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::SuccessfullyParsedValid { .. })
    }

    /// Whether the file was recognised as a FlowTracker2 measurement
    pub fn is_recognised(&self) -> bool {
        !matches!(self, ConversionOutcome::CannotParse { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConversionOutcome::CannotParse { .. } => "cannot parse",
            ConversionOutcome::ParsedButInvalid { .. } => "parsed but invalid",
            ConversionOutcome::SuccessfullyParsedValid { .. } => "converted",
        }
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionOutcome::CannotParse { reason } => write!(f, "{}: {}", self.label(), reason),
            ConversionOutcome::ParsedButInvalid { error } => {
                write!(f, "{}: {}", self.label(), error)
            }
            ConversionOutcome::SuccessfullyParsedValid { visit } => {
                write!(f, "{} to field visit {}", self.label(), visit.identifier)
            }
        }
    }
}
