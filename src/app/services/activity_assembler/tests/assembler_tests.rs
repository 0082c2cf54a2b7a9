//! Tests for the discharge activity assembler

use super::*;
use crate::Error;
use crate::app::models::{DischargeMethod, PointVelocityObservationType, VerticalType};
use crate::app::services::activity_assembler::DischargeActivityAssembler;

#[test]
fn test_assemble_three_station_measurement() {
    let assembler = DischargeActivityAssembler::new();
    let measurement = create_three_station_measurement();

    let visit = assembler.assemble(&measurement).unwrap();

    assert_eq!(visit.details.period.start, at("2024-05-01T10:00:00-06:00"));
    assert_eq!(visit.details.period.end, at("2024-05-01T11:00:00-06:00"));
    assert_eq!(visit.details.party, "J. Rivera");

    let activity = &visit.activity;
    assert_eq!(activity.measurement_period, visit.details.period);
    assert_eq!(activity.discharge.value, 1.5);
    assert_eq!(activity.discharge.unit_id, "m^3/s");
    assert_eq!(activity.comments, "Clear conditions");

    assert_eq!(activity.gauge_height_measurements.len(), 1);
    assert_eq!(activity.gauge_height_measurements[0].gauge_height.value, 1.50);
    assert_eq!(activity.gauge_height_measurements[0].gauge_height.unit_id, "m");

    let section = &activity.section;
    assert_eq!(section.discharge_method, DischargeMethod::MidSection);
    assert_eq!(
        section.velocity_observation_method,
        PointVelocityObservationType::OneAtPointSix
    );
    let types: Vec<VerticalType> = section.verticals.iter().map(|v| v.vertical_type).collect();
    assert_eq!(
        types,
        vec![
            VerticalType::StartEdgeNoWaterBefore,
            VerticalType::MidRiver,
            VerticalType::EndEdgeNoWaterAfter,
        ]
    );

    assert_eq!(visit.temperature.measurement.value, 15.0);
    assert_eq!(visit.temperature.measurement.unit_id, "degC");
    assert_eq!(visit.temperature.time, at("2024-05-01T10:30:00-06:00"));
    assert_eq!(visit.temperature.parameter_id, "TW");
    assert_eq!(visit.temperature.device.manufacturer, "SonTek");
    assert_eq!(visit.temperature.device.model, "FlowTracker2");
}

#[test]
fn test_nan_gauge_height_is_omitted() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.calculations.as_mut().unwrap().gauge_height = Some(f64::NAN);

    let visit = assembler.assemble(&measurement).unwrap();

    assert!(visit.activity.gauge_height_measurements.is_empty());
}

#[test]
fn test_missing_gauge_height_is_omitted() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.calculations.as_mut().unwrap().gauge_height = None;

    let visit = assembler.assemble(&measurement).unwrap();

    assert!(visit.activity.gauge_height_measurements.is_empty());
}

#[test]
fn test_gauge_height_value_is_kept_exactly() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.calculations.as_mut().unwrap().gauge_height = Some(1.23);

    let visit = assembler.assemble(&measurement).unwrap();

    let heights = &visit.activity.gauge_height_measurements;
    assert_eq!(heights.len(), 1);
    assert_eq!(heights[0].gauge_height.value, 1.23);
    assert!(heights[0].include);
}

#[test]
fn test_unsupported_discharge_equation_fails_assembly() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.discharge_equation = DischargeEquation::Other("Japanese".to_string());

    let result = assembler.assemble(&measurement);

    assert!(matches!(
        result,
        Err(Error::UnsupportedConfiguration { .. })
    ));
}

#[test]
fn test_missing_measurement_calculations_fails_assembly() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.calculations = None;

    let result = assembler.assemble(&measurement);

    match result {
        Err(Error::Transform { message, .. }) => assert!(message.contains("05420500")),
        other => panic!("Expected Transform error, got {:?}", other),
    }
}

#[test]
fn test_measurement_without_stations_fails_assembly() {
    let assembler = DischargeActivityAssembler::new();
    let measurement = create_test_measurement(Vec::new());

    let result = assembler.assemble(&measurement);

    assert!(matches!(result, Err(Error::Transform { .. })));
}

#[test]
fn test_reversed_period_fails_assembly() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    std::mem::swap(&mut measurement.start_time, &mut measurement.end_time);

    assert!(assembler.assemble(&measurement).is_err());
}

#[test]
fn test_temperature_reading_at_midpoint_of_odd_duration() {
    let assembler = DischargeActivityAssembler::new();
    let mut measurement = create_three_station_measurement();
    measurement.start_time = at("2024-05-01T10:00:00-06:00");
    measurement.end_time = at("2024-05-01T10:00:03-06:00");

    let visit = assembler.assemble(&measurement).unwrap();

    assert_eq!(visit.temperature.time, at("2024-05-01T10:00:01.5-06:00"));
}

#[test]
fn test_assembler_units_are_metric() {
    let assembler = DischargeActivityAssembler::default();
    assert_eq!(assembler.units().distance_unit_id, "m");
}
