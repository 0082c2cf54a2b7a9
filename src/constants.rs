//! Application constants for the FlowTracker2 converter
//!
//! This module contains the fixed identifiers, default values, and
//! placeholders used when building discharge activities.

// =============================================================================
// Instrument Identity
// =============================================================================

/// Manufacturer recorded on every meter calibration and reading device
pub const INSTRUMENT_MANUFACTURER: &str = "SonTek";

/// Model recorded on every meter calibration and reading device
pub const INSTRUMENT_MODEL: &str = "FlowTracker2";

/// Placeholder used where the instrument does not report a probe identity
pub const UNKNOWN_PROBE_IDENTIFIER: &str = "Unknown";

// =============================================================================
// Unit Identifiers
// =============================================================================

/// Canonical metric unit identifiers
pub mod metric_units {
    pub const DISTANCE: &str = "m";
    pub const AREA: &str = "m^2";
    pub const VELOCITY: &str = "m/s";
    pub const DISCHARGE: &str = "m^3/s";
}

/// Unit of the water temperature reading
pub const TEMPERATURE_UNIT: &str = "degC";

// =============================================================================
// Output Parameters
// =============================================================================

/// Parameter identifier of the mid-visit water temperature reading
pub const WATER_TEMPERATURE_PARAMETER: &str = "TW";

/// Channel name attached to the manual gauging section
pub const DEFAULT_CHANNEL_NAME: &str = "Main";

/// Prefix of the visit identifiers assigned by the in-memory results sink
pub const FIELD_VISIT_ID_PREFIX: &str = "visit";

// =============================================================================
// File Handling Defaults
// =============================================================================

/// Extensions picked up when scanning input directories
pub const DEFAULT_INPUT_EXTENSIONS: &[&str] = &["json"];

/// Suffix appended to the input file stem for persisted field visits
pub const OUTPUT_FILE_SUFFIX: &str = "fieldvisit.json";

/// Default output directory for persisted field visits
pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Upper bound on concurrently converted files
pub const MAX_WORKERS: usize = 256;
