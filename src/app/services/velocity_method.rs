//! Velocity method classification
//!
//! Maps the handheld's sampling methods onto the standardized point velocity
//! observation types and picks the method used across a whole section.

use crate::app::models::{PointVelocityObservationType, Station, VelocityMethod};

/// Map an instrument sampling method to its standardized observation type
///
/// Methods outside the known table map to `Unknown`.
pub fn map_method(method: &VelocityMethod) -> PointVelocityObservationType {
    match method {
        VelocityMethod::HalfDepth => PointVelocityObservationType::OneAtPointFive,
        VelocityMethod::SixTenths => PointVelocityObservationType::OneAtPointSix,
        VelocityMethod::TwoPoint => PointVelocityObservationType::OneAtPointTwoAndPointEight,
        VelocityMethod::ThreePoint => {
            PointVelocityObservationType::OneAtPointTwoPointSixAndPointEight
        }
        VelocityMethod::FivePoint => PointVelocityObservationType::FivePoint,
        VelocityMethod::SixPoint => PointVelocityObservationType::SixPoint,
        VelocityMethod::Other(_) => PointVelocityObservationType::Unknown,
    }
}

/// Plurality vote over the stations' sampling methods
///
/// Ties go to the method seen first in station order. Returns `None` for an
/// empty station list.
pub fn most_common_method(stations: &[Station]) -> Option<PointVelocityObservationType> {
    let mut counts: Vec<(&VelocityMethod, usize)> = Vec::new();

    for station in stations {
        match counts
            .iter_mut()
            .find(|(method, _)| *method == &station.velocity_method)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((&station.velocity_method, 1)),
        }
    }

    let mut winner: Option<(&VelocityMethod, usize)> = None;
    for &(method, count) in &counts {
        match winner {
            Some((_, best)) if best >= count => {}
            _ => winner = Some((method, count)),
        }
    }

    winner.map(|(method, _)| map_method(method))
}
