//! Results sink for assembled field visits
//!
//! The converter hands its output to a [`ResultsSink`]: it registers a field
//! visit, then appends the discharge activity and the temperature reading to
//! it. Identity of the visit is assigned by the sink. When an append fails the
//! converter discards the visit again, so a sink never keeps a visit without
//! its activity and reading.
//!
//! - [`collector`] - In-memory sink that keeps the records for later use
//! - [`json_writer`] - Persists collected records as JSON documents

pub mod collector;
pub mod json_writer;

pub use collector::{FieldVisitCollector, FieldVisitRecord};
pub use json_writer::{FieldVisitDocument, JsonResultsWriter};

use crate::Result;
use crate::app::models::{DischargeActivity, FieldVisit, Reading, TimeRange};
use crate::app::services::location_registry::LocationInfo;

/// Destination of converted field visit data
pub trait ResultsSink {
    /// Register a field visit and return it with its assigned identifier
    fn create_field_visit(
        &mut self,
        location: &LocationInfo,
        period: &TimeRange,
        party: &str,
    ) -> Result<FieldVisit>;

    fn append_discharge_activity(
        &mut self,
        visit: &FieldVisit,
        activity: DischargeActivity,
    ) -> Result<()>;

    fn append_reading(&mut self, visit: &FieldVisit, reading: Reading) -> Result<()>;

    /// Remove a visit and anything already appended to it
    fn discard_field_visit(&mut self, visit: &FieldVisit) -> Result<()>;
}
