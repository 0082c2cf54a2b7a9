//! Main converter struct and per-file state machine

use super::outcome::ConversionOutcome;
use crate::app::models::{FieldVisit, RawMeasurement};
use crate::app::services::activity_assembler::DischargeActivityAssembler;
use crate::app::services::location_registry::{LocationInfo, LocationResolver};
use crate::app::services::measurement_reader::MeasurementReader;
use crate::app::services::results_sink::ResultsSink;
use crate::config::{ConverterConfig, MalformedContentPolicy};
use crate::error::{ReadError, render_error_chain};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Converts FlowTracker2 measurement files into field visits
///
/// Holds no per-file state, so one converter can serve many files at once.
#[derive(Clone)]
pub struct FieldVisitConverter {
    reader: Arc<dyn MeasurementReader>,
    resolver: Arc<dyn LocationResolver>,
    assembler: DischargeActivityAssembler,
    config: ConverterConfig,
}

impl FieldVisitConverter {
    /// Create a new converter
    ///
    /// # Arguments
    ///
    /// * `reader` - Instrument file reader
    /// * `resolver` - Location lookup used when no location is supplied
    /// * `config` - Converter configuration
    pub fn new(
        reader: Arc<dyn MeasurementReader>,
        resolver: Arc<dyn LocationResolver>,
        config: ConverterConfig,
    ) -> Self {
        Self {
            reader,
            resolver,
            assembler: DischargeActivityAssembler::new(),
            config,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert one file's bytes and deliver the results to `sink`
    ///
    /// `location` overrides resolution from the measurement's site number.
    pub fn convert(
        &self,
        bytes: &[u8],
        location: Option<&LocationInfo>,
        sink: &mut dyn ResultsSink,
    ) -> ConversionOutcome {
        let measurement = match self.reader.read_measurement(bytes) {
            Ok(measurement) => measurement,
            Err(read_error) => return self.read_failure(read_error),
        };

        match self.convert_measurement(&measurement, location, sink) {
            Ok(visit) => {
                info!(
                    "Converted measurement for site {} into field visit {}",
                    measurement.site_number, visit.identifier
                );
                ConversionOutcome::SuccessfullyParsedValid { visit }
            }
            Err(error) => {
                error!(
                    "Measurement for site {} is invalid: {}",
                    measurement.site_number,
                    render_error_chain(&error)
                );
                ConversionOutcome::ParsedButInvalid { error }
            }
        }
    }

    /// Convert an already-read measurement
    ///
    /// The activity and reading are fully assembled before the sink is
    /// touched, so an assembly failure leaves the sink unchanged. A failed
    /// append discards the visit again.
    pub fn convert_measurement(
        &self,
        measurement: &RawMeasurement,
        location: Option<&LocationInfo>,
        sink: &mut dyn ResultsSink,
    ) -> Result<FieldVisit> {
        let location = match location {
            Some(location) => location.clone(),
            None => self
                .resolver
                .resolve_by_site_number(&measurement.site_number)
                .map_err(|e| {
                    Error::transform_with_source(
                        format!(
                            "could not resolve a location for site number '{}'",
                            measurement.site_number
                        ),
                        e,
                    )
                })?,
        };

        let assembled = self.assembler.assemble(measurement)?;

        let visit = sink.create_field_visit(
            &location,
            &assembled.details.period,
            &assembled.details.party,
        )?;
        let appended = sink
            .append_discharge_activity(&visit, assembled.activity)
            .and_then(|()| sink.append_reading(&visit, assembled.temperature));

        if let Err(error) = appended {
            if let Err(discard_error) = sink.discard_field_visit(&visit) {
                warn!(
                    "Could not discard partial field visit {}: {}",
                    visit.identifier,
                    render_error_chain(&discard_error)
                );
            }
            return Err(error);
        }

        Ok(visit)
    }

    fn read_failure(&self, read_error: ReadError) -> ConversionOutcome {
        match read_error {
            ReadError::FormatMismatch { reason } => {
                debug!("Not a FlowTracker2 measurement: {}", reason);
                ConversionOutcome::CannotParse { reason }
            }
            malformed @ ReadError::MalformedContent { .. } => {
                match self.config.malformed_content_policy {
                    MalformedContentPolicy::TreatAsForeign => {
                        let reason = render_error_chain(&malformed);
                        debug!("Treating malformed measurement as foreign: {}", reason);
                        ConversionOutcome::CannotParse { reason }
                    }
                    MalformedContentPolicy::RejectAsInvalid => {
                        let error = Error::transform_with_source(
                            "measurement file could not be read",
                            malformed,
                        );
                        error!("{}", render_error_chain(&error));
                        ConversionOutcome::ParsedButInvalid { error }
                    }
                }
            }
            other @ ReadError::Other(_) => {
                let reason = render_error_chain(&other);
                debug!("Measurement could not be read: {}", reason);
                ConversionOutcome::CannotParse { reason }
            }
        }
    }
}
