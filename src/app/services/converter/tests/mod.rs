//! Tests for the field visit converter
//!
//! Measurements come from the activity assembler fixtures, serialized to the
//! JSON document form the reader consumes.


use crate::app::models::{DischargeActivity, FieldVisit, RawMeasurement, Reading, TimeRange};
use crate::app::services::converter::FieldVisitConverter;
use crate::app::services::location_registry::{LocationInfo, LocationRegistry};
use crate::app::services::measurement_reader::JsonMeasurementReader;
use crate::app::services::results_sink::{FieldVisitCollector, ResultsSink};
use crate::config::ConverterConfig;
use crate::{Error, Result};
use std::sync::Arc;

/// Serialize a measurement the way the handheld exports it
pub fn measurement_bytes(measurement: &RawMeasurement) -> Vec<u8> {
    serde_json::to_vec(measurement).unwrap()
}

/// Registry knowing the fixture site
pub fn create_test_registry() -> LocationRegistry {
    LocationRegistry::from_locations(vec![LocationInfo::new(
        "05420500",
        "Mississippi River at Clinton, IA",
    )])
}

/// Converter with the JSON reader, the fixture registry and the given config
pub fn create_test_converter(config: ConverterConfig) -> FieldVisitConverter {
    FieldVisitConverter::new(
        Arc::new(JsonMeasurementReader::new()),
        Arc::new(create_test_registry()),
        config,
    )
}

/// Sink that accepts visits but refuses every append
#[derive(Debug, Default)]
pub struct RejectingSink {
    pub visits_created: usize,
    pub visits_discarded: usize,
}

impl ResultsSink for RejectingSink {
    fn create_field_visit(
        &mut self,
        location: &LocationInfo,
        period: &TimeRange,
        party: &str,
    ) -> Result<FieldVisit> {
        self.visits_created += 1;
        Ok(FieldVisit {
            identifier: "rejecting-1".to_string(),
            location_identifier: location.identifier.clone(),
            period: *period,
            party: party.to_string(),
        })
    }

    fn append_discharge_activity(
        &mut self,
        _visit: &FieldVisit,
        _activity: DischargeActivity,
    ) -> Result<()> {
        Err(Error::sink("storage is read-only"))
    }

    fn append_reading(&mut self, _visit: &FieldVisit, _reading: Reading) -> Result<()> {
        Err(Error::sink("storage is read-only"))
    }

    fn discard_field_visit(&mut self, _visit: &FieldVisit) -> Result<()> {
        self.visits_discarded += 1;
        Ok(())
    }
}

/// Collector that refuses temperature readings after accepting the activity
#[derive(Debug, Default)]
pub struct ReadingRejectingSink {
    pub inner: FieldVisitCollector,
}

impl ResultsSink for ReadingRejectingSink {
    fn create_field_visit(
        &mut self,
        location: &LocationInfo,
        period: &TimeRange,
        party: &str,
    ) -> Result<FieldVisit> {
        self.inner.create_field_visit(location, period, party)
    }

    fn append_discharge_activity(
        &mut self,
        visit: &FieldVisit,
        activity: DischargeActivity,
    ) -> Result<()> {
        self.inner.append_discharge_activity(visit, activity)
    }

    fn append_reading(&mut self, _visit: &FieldVisit, _reading: Reading) -> Result<()> {
        Err(Error::sink("reading parameter TW is not configured"))
    }

    fn discard_field_visit(&mut self, visit: &FieldVisit) -> Result<()> {
        self.inner.discard_field_visit(visit)
    }
}
