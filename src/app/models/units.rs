//! Unit system resolution
//!
//! A single decision point for the unit identifiers attached to every output
//! value. Only the metric system is produced today.

use crate::constants::metric_units;
use serde::{Deserialize, Serialize};

/// Unit identifiers shared read-only by all output builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    pub distance_unit_id: String,
    pub area_unit_id: String,
    pub velocity_unit_id: String,
    pub discharge_unit_id: String,
}

impl UnitSystem {
    /// Resolve the unit system for a measurement.
    ///
    /// Handheld values are stored in SI units whatever the display setting, so
    /// the metric identifiers are always returned.
    pub fn resolve() -> Self {
        Self::metric()
    }

    pub fn metric() -> Self {
        Self {
            distance_unit_id: metric_units::DISTANCE.to_string(),
            area_unit_id: metric_units::AREA.to_string(),
            velocity_unit_id: metric_units::VELOCITY.to_string(),
            discharge_unit_id: metric_units::DISCHARGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_returns_metric_identifiers() {
        let units = UnitSystem::resolve();
        assert_eq!(units.distance_unit_id, "m");
        assert_eq!(units.area_unit_id, "m^2");
        assert_eq!(units.velocity_unit_id, "m/s");
        assert_eq!(units.discharge_unit_id, "m^3/s");
        assert_eq!(units, UnitSystem::metric());
    }
}
