//! Standardized field visit output records
//!
//! Everything here is freshly constructed by the mapping services and handed
//! to a results sink. Depth, position and intercept values are expressed in the
//! distance unit of the section's [`UnitSystem`](super::units::UnitSystem).

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

// =============================================================================
// Common Value Types
// =============================================================================

/// Closed time interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Instant halfway through the interval, in the start's offset
    pub fn midpoint(&self) -> DateTime<FixedOffset> {
        self.start + self.duration() / 2
    }
}

/// A value with its unit identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit_id: String,
}

impl Measurement {
    pub fn new(value: f64, unit_id: impl Into<String>) -> Self {
        Self {
            value,
            unit_id: unit_id.into(),
        }
    }
}

// =============================================================================
// Standardized Enumerations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DischargeMethod {
    MeanSection,
    MidSection,
}

/// How velocity was sampled along a vertical
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointVelocityObservationType {
    Unknown,
    Surface,
    OneAtPointFive,
    OneAtPointSix,
    OneAtPointTwoAndPointEight,
    OneAtPointTwoPointSixAndPointEight,
    FivePoint,
    SixPoint,
}

/// Bank the section starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartPointType {
    LeftEdgeOfWater,
    RightEdgeOfWater,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalType {
    StartEdgeNoWaterBefore,
    EndEdgeNoWaterAfter,
    MidRiver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirectionType {
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMethodType {
    Unspecified,
}

// =============================================================================
// Vertical Components
// =============================================================================

/// Ice cover details of a vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceCoveredData {
    pub ice_thickness: f64,
    pub water_surface_to_bottom_of_ice: f64,
    pub water_surface_to_bottom_of_slush: f64,
}

/// Conditions under which a vertical was measured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasurementConditionData {
    OpenWater,
    IceCovered(IceCoveredData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterCalibrationEquation {
    pub range_start: Option<f64>,
    pub range_end: Option<f64>,
    pub slope: f64,
    pub intercept: f64,
    pub intercept_unit_id: String,
}

/// Meter identity attached to each velocity observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterCalibration {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_version: Option<String>,
    pub software_version: Option<String>,
    pub equations: Vec<MeterCalibrationEquation>,
}

/// A single depth/velocity sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityDepthObservation {
    pub depth: f64,
    pub velocity: f64,
    pub observation_interval_seconds: f64,
    pub revolution_count: u32,
}

impl VelocityDepthObservation {
    /// Placeholder sample for verticals without any point measurement
    pub fn zero() -> Self {
        Self {
            depth: 0.0,
            velocity: 0.0,
            observation_interval_seconds: 0.0,
            revolution_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityObservation {
    pub velocity_observation_method: PointVelocityObservationType,
    pub meter_calibration: MeterCalibration,
    pub mean_velocity: f64,
    pub deployment_method: DeploymentMethodType,
    /// Never empty
    pub observations: Vec<VelocityDepthObservation>,
}

/// Width, area and flow summary of a vertical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub width: f64,
    pub area: f64,
    pub discharge: f64,
    pub velocity: f64,
    /// Percentage of the total discharge
    pub total_discharge_portion: f64,
}

/// Standardized record of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertical {
    pub sequence_number: usize,
    pub vertical_type: VerticalType,
    pub tagline_position: f64,
    pub sounded_depth: f64,
    pub effective_depth: f64,
    pub is_sounded_depth_estimated: bool,
    pub measurement_time: DateTime<FixedOffset>,
    pub comments: String,
    pub flow_direction: FlowDirectionType,
    pub measurement_condition_data: MeasurementConditionData,
    pub velocity_observation: VelocityObservation,
    pub segment: Segment,
}

// =============================================================================
// Activity and Visit
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualGaugingDischargeSection {
    pub measurement_period: TimeRange,
    pub channel_name: String,
    pub party: String,
    pub distance_unit_id: String,
    pub area_unit_id: String,
    pub velocity_unit_id: String,
    pub width: f64,
    pub area: f64,
    pub velocity_average: f64,
    pub discharge: Measurement,
    pub starting_point: StartPointType,
    pub velocity_observation_method: PointVelocityObservationType,
    pub discharge_method: DischargeMethod,
    pub deployment_method: DeploymentMethodType,
    pub verticals: Vec<Vertical>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeHeightMeasurement {
    pub gauge_height: Measurement,
    pub include: bool,
}

/// One complete discharge measurement event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeActivity {
    pub measurement_period: TimeRange,
    pub party: String,
    pub discharge: Measurement,
    pub gauge_height_measurements: Vec<GaugeHeightMeasurement>,
    pub section: ManualGaugingDischargeSection,
    pub comments: String,
}

/// Field visit as registered with a results sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVisit {
    /// Assigned by the sink
    pub identifier: String,
    pub location_identifier: String,
    pub period: TimeRange,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingDevice {
    pub manufacturer: String,
    pub model: String,
    pub serial_number: String,
}

/// Single parameter observation made during a visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub parameter_id: String,
    pub measurement: Measurement,
    pub time: DateTime<FixedOffset>,
    pub device: ReadingDevice,
}
