//! Conversion of instrument files into field visits
//!
//! This module sequences reading a measurement, resolving its location,
//! assembling the discharge activity, and handing the results to a sink. The
//! outcome of each file is one of three terminal states:
//!
//! - **CannotParse**: the bytes are not a FlowTracker2 measurement; another
//!   interpreter may try them
//! - **ParsedButInvalid**: the file is ours but could not be converted; the
//!   causing error is carried along
//! - **SuccessfullyParsedValid**: the field visit was delivered to the sink
//!
//! - [`engine`] - `FieldVisitConverter`, the per-file state machine
//! - [`outcome`] - `ConversionOutcome`
//! - [`stats`] - Batch statistics over many outcomes

pub mod engine;
pub mod outcome;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use engine::FieldVisitConverter;
pub use outcome::ConversionOutcome;
pub use stats::ConversionStats;
