//! Main assembler struct and pipeline orchestration

use super::section::build_section;
use crate::app::models::{
    DischargeActivity, GaugeHeightMeasurement, Measurement, MeasurementCalculations,
    RawMeasurement, Reading, ReadingDevice, TimeRange, UnitSystem,
};
use crate::constants::{
    INSTRUMENT_MANUFACTURER, INSTRUMENT_MODEL, TEMPERATURE_UNIT, UNKNOWN_PROBE_IDENTIFIER,
    WATER_TEMPERATURE_PARAMETER,
};
use crate::{Error, Result};
use tracing::{debug, info};

/// Period and party of the field visit a measurement belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct FieldVisitDetails {
    pub period: TimeRange,
    pub party: String,
}

/// Everything assembled from one measurement, ready for a results sink
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledVisit {
    pub details: FieldVisitDetails,
    pub activity: DischargeActivity,
    pub temperature: Reading,
}

/// Assembles discharge activities from raw FlowTracker2 measurements
#[derive(Debug, Clone)]
pub struct DischargeActivityAssembler {
    units: UnitSystem,
}

impl DischargeActivityAssembler {
    /// Create an assembler with the resolved unit system
    pub fn new() -> Self {
        Self {
            units: UnitSystem::resolve(),
        }
    }

    /// Unit system attached to every assembled record
    pub fn units(&self) -> &UnitSystem {
        &self.units
    }

    /// Assemble the field visit records for one measurement
    ///
    /// Fails with `UnsupportedConfiguration` for an unhandled discharge
    /// equation and with `Transform` for missing or inconsistent content.
    pub fn assemble(&self, measurement: &RawMeasurement) -> Result<AssembledVisit> {
        let calculations = measurement.calculations.as_ref().ok_or_else(|| {
            Error::transform(format!(
                "measurement for site {} has no calculations",
                measurement.site_number
            ))
        })?;

        if measurement.end_time < measurement.start_time {
            return Err(Error::transform(format!(
                "measurement ends at {} before it starts at {}",
                measurement.end_time, measurement.start_time
            )));
        }

        let details = FieldVisitDetails {
            period: TimeRange::new(measurement.start_time, measurement.end_time),
            party: measurement.operator.clone(),
        };

        let activity = self.discharge_activity(measurement, calculations, &details)?;
        let temperature = self.temperature_reading(calculations, &details);

        info!(
            "Assembled discharge activity for site {}: {} verticals, discharge {} {}",
            measurement.site_number,
            activity.section.verticals.len(),
            activity.discharge.value,
            activity.discharge.unit_id
        );

        Ok(AssembledVisit {
            details,
            activity,
            temperature,
        })
    }

    fn discharge_activity(
        &self,
        measurement: &RawMeasurement,
        calculations: &MeasurementCalculations,
        details: &FieldVisitDetails,
    ) -> Result<DischargeActivity> {
        let section = build_section(measurement, calculations, details.period, &self.units)?;

        Ok(DischargeActivity {
            measurement_period: details.period,
            party: details.party.clone(),
            discharge: Measurement::new(
                calculations.discharge,
                self.units.discharge_unit_id.clone(),
            ),
            gauge_height_measurements: self.gauge_height_measurements(calculations),
            section,
            comments: measurement.comment.clone(),
        })
    }

    fn gauge_height_measurements(
        &self,
        calculations: &MeasurementCalculations,
    ) -> Vec<GaugeHeightMeasurement> {
        match calculations.gauge_height.filter(|height| !height.is_nan()) {
            Some(height) => vec![GaugeHeightMeasurement {
                gauge_height: Measurement::new(height, self.units.distance_unit_id.clone()),
                include: true,
            }],
            None => {
                debug!("No gauge height recorded, omitting gauge height measurement");
                Vec::new()
            }
        }
    }

    fn temperature_reading(
        &self,
        calculations: &MeasurementCalculations,
        details: &FieldVisitDetails,
    ) -> Reading {
        Reading {
            parameter_id: WATER_TEMPERATURE_PARAMETER.to_string(),
            measurement: Measurement::new(calculations.temperature, TEMPERATURE_UNIT),
            time: details.period.midpoint(),
            device: ReadingDevice {
                manufacturer: INSTRUMENT_MANUFACTURER.to_string(),
                model: INSTRUMENT_MODEL.to_string(),
                serial_number: UNKNOWN_PROBE_IDENTIFIER.to_string(),
            },
        }
    }
}

impl Default for DischargeActivityAssembler {
    fn default() -> Self {
        Self::new()
    }
}
