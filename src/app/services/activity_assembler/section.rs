//! Manual gauging section construction
//!
//! Builds the single section of a discharge activity from the measurement
//! aggregates and appends one vertical per station.

use crate::app::models::{
    DeploymentMethodType, ManualGaugingDischargeSection, Measurement, MeasurementCalculations,
    RawMeasurement, StartPointType, StationType, TimeRange, UnitSystem,
};
use crate::app::services::discharge_method::select_discharge_method;
use crate::app::services::velocity_method::most_common_method;
use crate::app::services::vertical_builder::VerticalBuilder;
use crate::constants::DEFAULT_CHANNEL_NAME;
use crate::{Error, Result};
use tracing::debug;

/// Bank the section starts from, taken from the first station
pub fn starting_point(first_station_type: StationType) -> StartPointType {
    match first_station_type {
        StationType::RightBank => StartPointType::RightEdgeOfWater,
        _ => StartPointType::LeftEdgeOfWater,
    }
}

/// Build the manual gauging section with all of its verticals
///
/// # Arguments
///
/// * `measurement` - Raw measurement being converted
/// * `calculations` - The measurement's aggregate calculations
/// * `period` - Measurement period shared with the activity
/// * `units` - Resolved unit system
///
/// # Returns
///
/// The section, or an error when the stations are empty, the discharge
/// equation is unsupported, or a station cannot be mapped
pub fn build_section(
    measurement: &RawMeasurement,
    calculations: &MeasurementCalculations,
    period: TimeRange,
    units: &UnitSystem,
) -> Result<ManualGaugingDischargeSection> {
    let stations = &measurement.stations;

    let builder = VerticalBuilder::new(stations, units, &measurement.handheld)
        .ok_or_else(|| Error::transform("measurement contains no stations"))?;
    let velocity_observation_method = most_common_method(stations)
        .ok_or_else(|| Error::transform("measurement contains no stations"))?;
    let discharge_method = select_discharge_method(&measurement.discharge_equation)?;

    let verticals = stations
        .iter()
        .enumerate()
        .map(|(index, station)| builder.build(index + 1, station))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Built {} verticals using {:?} with {:?}",
        verticals.len(),
        velocity_observation_method,
        discharge_method
    );

    Ok(ManualGaugingDischargeSection {
        measurement_period: period,
        channel_name: DEFAULT_CHANNEL_NAME.to_string(),
        party: measurement.operator.clone(),
        distance_unit_id: units.distance_unit_id.clone(),
        area_unit_id: units.area_unit_id.clone(),
        velocity_unit_id: units.velocity_unit_id.clone(),
        width: calculations.width,
        area: calculations.area,
        velocity_average: calculations.mean_velocity.primary(),
        discharge: Measurement::new(calculations.discharge, units.discharge_unit_id.clone()),
        starting_point: starting_point(stations[0].station_type),
        velocity_observation_method,
        discharge_method,
        deployment_method: DeploymentMethodType::Unspecified,
        verticals,
    })
}
