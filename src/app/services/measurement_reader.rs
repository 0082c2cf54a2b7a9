//! Instrument file reading
//!
//! The converter consumes measurements through the [`MeasurementReader`]
//! trait. [`JsonMeasurementReader`] reads the decoded measurement document the
//! handheld exports alongside its archive.

use crate::app::models::RawMeasurement;
use crate::error::ReadError;
use serde_json::Value;
use tracing::debug;

/// Top-level keys identifying a FlowTracker2 measurement document
const MARKER_KEYS: &[&str] = &["Stations", "Handheld", "DischargeEquation"];

/// Source of raw measurements
///
/// Implementations must tell a foreign file (`FormatMismatch`) apart from a
/// file of the right kind that cannot be used (`MalformedContent`).
pub trait MeasurementReader: Send + Sync {
    fn read_measurement(&self, bytes: &[u8]) -> Result<RawMeasurement, ReadError>;
}

/// Reads FlowTracker2 measurement documents in JSON form
#[derive(Debug, Clone, Default)]
pub struct JsonMeasurementReader;

impl JsonMeasurementReader {
    pub fn new() -> Self {
        Self
    }
}

impl MeasurementReader for JsonMeasurementReader {
    fn read_measurement(&self, bytes: &[u8]) -> Result<RawMeasurement, ReadError> {
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| ReadError::format_mismatch(format!("not a JSON document: {}", e)))?;

        let Some(object) = document.as_object() else {
            return Err(ReadError::format_mismatch(
                "top-level JSON value is not an object",
            ));
        };

        if !MARKER_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Err(ReadError::format_mismatch(format!(
                "none of the measurement keys {:?} are present",
                MARKER_KEYS
            )));
        }

        let measurement: RawMeasurement = serde_json::from_value(document).map_err(|e| {
            ReadError::malformed(
                "measurement document does not have the expected structure",
                Some(Box::new(e)),
            )
        })?;

        debug!(
            "Read measurement for site {} with {} stations",
            measurement.site_number,
            measurement.stations.len()
        );

        Ok(measurement)
    }
}
