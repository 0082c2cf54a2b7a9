//! Data models for FlowTracker2 conversion
//!
//! The raw measurement graph read from the instrument, the standardized
//! field visit records produced from it, and the unit system tying the two
//! together.

pub mod discharge;
pub mod measurement;
pub mod units;

pub use discharge::{
    DeploymentMethodType, DischargeActivity, DischargeMethod, FieldVisit, FlowDirectionType,
    GaugeHeightMeasurement, IceCoveredData, ManualGaugingDischargeSection, Measurement,
    MeasurementConditionData, MeterCalibration, MeterCalibrationEquation,
    PointVelocityObservationType, Reading, ReadingDevice, Segment, StartPointType, TimeRange,
    VelocityDepthObservation, VelocityObservation, Vertical, VerticalType,
};
pub use measurement::{
    DischargeEquation, HandheldInfo, IceMeasurements, MeasurementCalculations, PointMeasurement,
    ProbeInfo, RawMeasurement, Station, StationCalculations, StationType, UnitsSetting,
    VelocityMethod, VelocityVector,
};
pub use units::UnitSystem;
