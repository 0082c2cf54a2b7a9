//! Raw FlowTracker2 measurement graph
//!
//! These structures mirror the decoded measurement document produced by the
//! handheld: one measurement made of ordered stations, each holding its point
//! velocity samples, plus the instrument's own aggregate calculations. They are
//! read-only inputs to the mapping services.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Shared Value Types
// =============================================================================

/// Velocity vector as reported by the probe
///
/// `x` is the primary component, measured along the tagline normal (the
/// downstream flow direction). `y` is the transverse component.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VelocityVector {
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl VelocityVector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Primary (longitudinal) component used for discharge
    pub fn primary(&self) -> f64 {
        self.x
    }
}

/// Handheld unit identity and versions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HandheldInfo {
    pub serial_number: String,
    #[serde(default)]
    pub cpu_serial_number: String,
    #[serde(default)]
    pub software_version: String,
    #[serde(default)]
    pub firmware_version: String,
}

/// Display units chosen on the handheld
///
/// Stored values are always SI regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitsSetting {
    #[default]
    Metric,
    English,
}

// =============================================================================
// Instrument Enumerations
// =============================================================================

/// Station classification selected by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    LeftBank,
    RightBank,
    Open,
    Ice,
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationType::LeftBank => write!(f, "LeftBank"),
            StationType::RightBank => write!(f, "RightBank"),
            StationType::Open => write!(f, "Open"),
            StationType::Ice => write!(f, "Ice"),
        }
    }
}

/// Velocity sampling method selected for a station
///
/// Labels match the handheld's method picker. Anything the converter does not
/// know is kept verbatim in `Other` so it can be classified as unknown rather
/// than rejected while reading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VelocityMethod {
    /// Single point at 0.5 of the depth
    HalfDepth,
    /// Single point at 0.6 of the depth
    SixTenths,
    /// Two points at 0.2 and 0.8
    TwoPoint,
    /// Three points at 0.2, 0.6 and 0.8
    ThreePoint,
    FivePoint,
    SixPoint,
    Other(String),
}

impl VelocityMethod {
    pub fn as_str(&self) -> &str {
        match self {
            VelocityMethod::HalfDepth => "0.5",
            VelocityMethod::SixTenths => "0.6",
            VelocityMethod::TwoPoint => "0.2/0.8",
            VelocityMethod::ThreePoint => "0.2/0.6/0.8",
            VelocityMethod::FivePoint => "5-Point",
            VelocityMethod::SixPoint => "6-Point",
            VelocityMethod::Other(label) => label,
        }
    }
}

impl From<String> for VelocityMethod {
    fn from(label: String) -> Self {
        match label.trim() {
            "0.5" => VelocityMethod::HalfDepth,
            "0.6" => VelocityMethod::SixTenths,
            "0.2/0.8" => VelocityMethod::TwoPoint,
            "0.2/0.6/0.8" => VelocityMethod::ThreePoint,
            "5-Point" => VelocityMethod::FivePoint,
            "6-Point" => VelocityMethod::SixPoint,
            _ => VelocityMethod::Other(label),
        }
    }
}

impl From<VelocityMethod> for String {
    fn from(method: VelocityMethod) -> Self {
        method.as_str().to_string()
    }
}

impl fmt::Display for VelocityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discharge equation configured on the handheld
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DischargeEquation {
    MeanSection,
    MidSection,
    Other(String),
}

impl DischargeEquation {
    pub fn as_str(&self) -> &str {
        match self {
            DischargeEquation::MeanSection => "MeanSection",
            DischargeEquation::MidSection => "MidSection",
            DischargeEquation::Other(label) => label,
        }
    }
}

impl From<String> for DischargeEquation {
    fn from(label: String) -> Self {
        match label.trim() {
            "MeanSection" => DischargeEquation::MeanSection,
            "MidSection" => DischargeEquation::MidSection,
            _ => DischargeEquation::Other(label),
        }
    }
}

impl From<DischargeEquation> for String {
    fn from(equation: DischargeEquation) -> Self {
        equation.as_str().to_string()
    }
}

impl fmt::Display for DischargeEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Calculations
// =============================================================================

/// Aggregate results computed by the handheld for the whole measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MeasurementCalculations {
    pub discharge: f64,
    pub area: f64,
    pub width: f64,
    pub mean_velocity: VelocityVector,
    /// Absent or NaN when no stage was entered
    #[serde(default)]
    pub gauge_height: Option<f64>,
    pub temperature: f64,
}

/// Per-station results computed by the handheld
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationCalculations {
    pub width: f64,
    pub area: f64,
    pub discharge: f64,
    /// Share of the total discharge, as a fraction in 0.0..=1.0
    pub fraction_of_total_discharge: f64,
    pub mean_velocity: VelocityVector,
}

/// Ice measurements, present on ice stations only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IceMeasurements {
    pub water_surface_to_bottom_of_ice: f64,
    pub water_surface_to_bottom_of_slush: f64,
    pub ice_thickness: f64,
}

// =============================================================================
// Stations and Points
// =============================================================================

/// Probe identity recorded with each point sample
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProbeInfo {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub software_version: Option<String>,
}

/// One depth-specific velocity sample within a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointMeasurement {
    /// Fraction of the station's effective depth, 0.0 at the surface
    pub fractional_depth: f64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub probe: ProbeInfo,
    pub velocity: VelocityVector,
}

impl PointMeasurement {
    /// Sampling duration in seconds
    pub fn interval_seconds(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// One cross-section sampling location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Station {
    pub station_type: StationType,
    /// Tagline position
    pub location: f64,
    pub creation_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub comment: String,
    pub effective_depth: f64,
    /// Final (sounded) depth
    pub depth: f64,
    pub velocity_method: VelocityMethod,
    #[serde(default)]
    pub calculations: Option<StationCalculations>,
    #[serde(default)]
    pub ice: Option<IceMeasurements>,
    #[serde(default)]
    pub points: Vec<PointMeasurement>,
}

// =============================================================================
// Measurement
// =============================================================================

/// Complete FlowTracker2 discharge measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMeasurement {
    pub site_number: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub comment: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub handheld: HandheldInfo,
    /// Handheld display units; not consulted when resolving output units
    #[serde(default)]
    pub units: UnitsSetting,
    pub discharge_equation: DischargeEquation,
    pub stations: Vec<Station>,
    #[serde(default)]
    pub calculations: Option<MeasurementCalculations>,
}
