//! Tests for discharge activity assembly
//!
//! Shared fixtures live here so the converter and sink tests can build the
//! same measurements.

pub mod assembler_tests;

use crate::app::models::{
    DischargeEquation, HandheldInfo, MeasurementCalculations, PointMeasurement, ProbeInfo,
    RawMeasurement, Station, StationCalculations, StationType, UnitsSetting, VelocityMethod,
    VelocityVector,
};
use chrono::{DateTime, FixedOffset};

/// Parse an RFC 3339 timestamp
pub fn at(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

/// Create a point sample 40 seconds long
pub fn create_test_point(fractional_depth: f64, velocity: f64) -> PointMeasurement {
    PointMeasurement {
        fractional_depth,
        start_time: at("2024-05-01T10:15:00-06:00"),
        end_time: at("2024-05-01T10:15:40-06:00"),
        probe: ProbeInfo {
            serial_number: Some("P3621".to_string()),
            firmware_version: Some("1.12".to_string()),
            software_version: Some("2.5".to_string()),
        },
        velocity: VelocityVector::new(velocity, 0.01),
    }
}

/// Create a station with one 0.6-depth point and a third of the discharge
pub fn create_test_station(station_type: StationType, location: f64) -> Station {
    Station {
        station_type,
        location,
        creation_time: at("2024-05-01T10:14:00-06:00"),
        comment: String::new(),
        effective_depth: 1.0,
        depth: 1.05,
        velocity_method: VelocityMethod::SixTenths,
        calculations: Some(StationCalculations {
            width: 1.0,
            area: 1.0,
            discharge: 0.5,
            fraction_of_total_discharge: 1.0 / 3.0,
            mean_velocity: VelocityVector::new(0.5, 0.0),
        }),
        ice: None,
        points: vec![create_test_point(0.6, 0.5)],
    }
}

/// Create a measurement with the given stations and reference aggregates
pub fn create_test_measurement(stations: Vec<Station>) -> RawMeasurement {
    RawMeasurement {
        site_number: "05420500".to_string(),
        operator: "J. Rivera".to_string(),
        comment: "Clear conditions".to_string(),
        start_time: at("2024-05-01T10:00:00-06:00"),
        end_time: at("2024-05-01T11:00:00-06:00"),
        handheld: HandheldInfo {
            serial_number: "FT2H-1187".to_string(),
            cpu_serial_number: "A1B2C3".to_string(),
            software_version: "1.6".to_string(),
            firmware_version: "1.20".to_string(),
        },
        units: UnitsSetting::Metric,
        discharge_equation: DischargeEquation::MidSection,
        stations,
        calculations: Some(MeasurementCalculations {
            discharge: 1.5,
            area: 3.0,
            width: 3.0,
            mean_velocity: VelocityVector::new(0.5, 0.0),
            gauge_height: Some(1.50),
            temperature: 15.0,
        }),
    }
}

/// Right bank, mid-river and left bank stations, each with one 0.6 point
pub fn create_three_station_measurement() -> RawMeasurement {
    create_test_measurement(vec![
        create_test_station(StationType::RightBank, 0.0),
        create_test_station(StationType::Open, 1.5),
        create_test_station(StationType::LeftBank, 3.0),
    ])
}

/// Create a station with a specific velocity method
pub fn create_station_with_method(method: VelocityMethod) -> Station {
    let mut station = create_test_station(StationType::Open, 1.0);
    station.velocity_method = method;
    station
}
