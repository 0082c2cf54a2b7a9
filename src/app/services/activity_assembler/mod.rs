//! Discharge activity assembly for FlowTracker2 measurements
//!
//! This module turns one raw measurement into everything a results sink needs
//! for a field visit: the visit period and party, the discharge activity with
//! its manual gauging section, and the mid-visit water temperature reading.
//!
//! # Architecture
//!
//! - [`assembler`] - `DischargeActivityAssembler` and the assembly pipeline
//! - [`section`] - Manual gauging section and vertical construction
//!
//! # Assembly Pipeline
//!
//! 1. **Units**: resolve the unit system shared by every record
//! 2. **Visit**: period from the instrument start/end, party from the operator
//! 3. **Activity**: discharge, comments and an optional gauge height
//! 4. **Section**: aggregates, start bank, plurality velocity method, discharge
//!    method, then one vertical per station in input order
//! 5. **Reading**: water temperature at the visit midpoint
//!
//! Assembly is all-or-nothing: any failure returns an error and no partial
//! records are produced.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use flowtracker2_converter::app::services::activity_assembler::DischargeActivityAssembler;
//!
//! # fn example(measurement: &flowtracker2_converter::RawMeasurement) -> flowtracker2_converter::Result<()> {
//! let assembler = DischargeActivityAssembler::new();
//! let visit = assembler.assemble(measurement)?;
//!
//! println!(
//!     "{} verticals, {} m^3/s",
//!     visit.activity.section.verticals.len(),
//!     visit.activity.discharge.value
//! );
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod section;

#[cfg(test)]
pub mod tests;

pub use assembler::{AssembledVisit, DischargeActivityAssembler, FieldVisitDetails};
pub use section::starting_point;
