//! Vertical construction
//!
//! Turns each instrument station into a standardized vertical: edge
//! classification, measurement conditions, the velocity observation with its
//! depth samples, and the segment summary.

use crate::app::models::{
    DeploymentMethodType, FlowDirectionType, HandheldInfo, IceCoveredData,
    MeasurementConditionData, MeterCalibration, MeterCalibrationEquation,
    PointVelocityObservationType, Segment, Station, StationType, UnitSystem,
    VelocityDepthObservation, VelocityObservation, Vertical, VerticalType,
};
use crate::app::services::velocity_method::map_method;
use crate::constants::{INSTRUMENT_MANUFACTURER, INSTRUMENT_MODEL};
use crate::{Error, Result};
use tracing::debug;

/// Classify a station as an edge or mid-river vertical
///
/// Matching is on station type, so any interior station sharing the type of
/// the first station is also a start edge, and likewise for the last.
pub fn classify_vertical(
    station_type: StationType,
    start_type: StationType,
    end_type: StationType,
) -> VerticalType {
    if station_type == start_type {
        VerticalType::StartEdgeNoWaterBefore
    } else if station_type == end_type {
        VerticalType::EndEdgeNoWaterAfter
    } else {
        VerticalType::MidRiver
    }
}

/// Builds verticals for the stations of one measurement
#[derive(Debug)]
pub struct VerticalBuilder<'a> {
    units: &'a UnitSystem,
    handheld: &'a HandheldInfo,
    start_type: StationType,
    end_type: StationType,
}

impl<'a> VerticalBuilder<'a> {
    /// Create a builder for the given stations
    ///
    /// Returns `None` when there are no stations to take the edges from.
    pub fn new(
        stations: &[Station],
        units: &'a UnitSystem,
        handheld: &'a HandheldInfo,
    ) -> Option<Self> {
        let first = stations.first()?;
        let last = stations.last()?;

        Some(Self {
            units,
            handheld,
            start_type: first.station_type,
            end_type: last.station_type,
        })
    }

    /// Build the vertical for one station
    ///
    /// `sequence_number` is the 1-based position of the station in the
    /// measurement and is used in error messages.
    pub fn build(&self, sequence_number: usize, station: &Station) -> Result<Vertical> {
        let calculations = station.calculations.as_ref().ok_or_else(|| {
            Error::transform(format!(
                "station {} ({}) has no calculations",
                sequence_number, station.station_type
            ))
        })?;

        let segment = Segment {
            width: calculations.width,
            area: calculations.area,
            discharge: calculations.discharge,
            velocity: calculations.mean_velocity.primary(),
            total_discharge_portion: 100.0 * calculations.fraction_of_total_discharge,
        };

        Ok(Vertical {
            sequence_number,
            vertical_type: classify_vertical(station.station_type, self.start_type, self.end_type),
            tagline_position: station.location,
            sounded_depth: station.depth,
            effective_depth: station.effective_depth,
            is_sounded_depth_estimated: false,
            measurement_time: station.creation_time,
            comments: station.comment.clone(),
            flow_direction: FlowDirectionType::Normal,
            measurement_condition_data: self.measurement_condition(sequence_number, station)?,
            velocity_observation: self.velocity_observation(
                sequence_number,
                station,
                calculations.mean_velocity.primary(),
            ),
            segment,
        })
    }

    fn measurement_condition(
        &self,
        sequence_number: usize,
        station: &Station,
    ) -> Result<MeasurementConditionData> {
        if station.station_type != StationType::Ice {
            return Ok(MeasurementConditionData::OpenWater);
        }

        let ice = station.ice.as_ref().ok_or_else(|| {
            Error::transform(format!(
                "ice station {} has no ice measurements",
                sequence_number
            ))
        })?;

        Ok(MeasurementConditionData::IceCovered(IceCoveredData {
            ice_thickness: ice.ice_thickness,
            water_surface_to_bottom_of_ice: ice.water_surface_to_bottom_of_ice,
            water_surface_to_bottom_of_slush: ice.water_surface_to_bottom_of_slush,
        }))
    }

    fn velocity_observation(
        &self,
        sequence_number: usize,
        station: &Station,
        mean_velocity: f64,
    ) -> VelocityObservation {
        let mut method = map_method(&station.velocity_method);

        let mut observations: Vec<VelocityDepthObservation> = station
            .points
            .iter()
            .map(|point| VelocityDepthObservation {
                depth: point.fractional_depth * station.effective_depth,
                velocity: point.velocity.primary(),
                observation_interval_seconds: point.interval_seconds(),
                revolution_count: 0,
            })
            .collect();

        if observations.is_empty() {
            debug!(
                "Station {} has no point measurements, substituting a surface sample",
                sequence_number
            );
            observations.push(VelocityDepthObservation::zero());
            method = PointVelocityObservationType::Surface;
        }

        VelocityObservation {
            velocity_observation_method: method,
            meter_calibration: self.meter_calibration(station),
            mean_velocity,
            deployment_method: DeploymentMethodType::Unspecified,
            observations,
        }
    }

    fn meter_calibration(&self, station: &Station) -> MeterCalibration {
        let (serial_number, firmware_version, software_version) = match station.points.first() {
            Some(point) => (
                point
                    .probe
                    .serial_number
                    .clone()
                    .unwrap_or_else(|| self.handheld.serial_number.clone()),
                point.probe.firmware_version.clone(),
                point.probe.software_version.clone(),
            ),
            None => (self.handheld.serial_number.clone(), None, None),
        };

        MeterCalibration {
            manufacturer: INSTRUMENT_MANUFACTURER.to_string(),
            model: INSTRUMENT_MODEL.to_string(),
            serial_number,
            firmware_version,
            software_version,
            equations: vec![MeterCalibrationEquation {
                range_start: None,
                range_end: None,
                slope: 0.0,
                intercept: 0.0,
                intercept_unit_id: self.units.distance_unit_id.clone(),
            }],
        }
    }
}
