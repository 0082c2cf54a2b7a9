//! FlowTracker2 Converter Library
//!
//! A Rust library for converting SonTek FlowTracker2 stream discharge
//! measurements into standardized, unit-aware field visit records.
//!
//! This library provides tools for:
//! - Reading decoded FlowTracker2 measurement documents
//! - Classifying stations into edge and mid-river verticals
//! - Mapping velocity sampling methods and discharge equations onto
//!   standardized methods
//! - Assembling a discharge activity, gauge height and temperature reading
//!   for each field visit
//! - Resolving site numbers to locations and delivering results to a sink
//! - Distinguishing foreign files from invalid measurements

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod activity_assembler;
        pub mod converter;
        pub mod discharge_method;
        pub mod location_registry;
        pub mod measurement_reader;
        pub mod results_sink;
        pub mod velocity_method;
        pub mod vertical_builder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DischargeActivity, FieldVisit, RawMeasurement, UnitSystem, Vertical};
pub use app::services::converter::{ConversionOutcome, ConversionStats, FieldVisitConverter};
pub use config::ConverterConfig;
pub use error::{Error, ReadError, Result};
