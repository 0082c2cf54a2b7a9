//! In-memory results sink

use super::ResultsSink;
use crate::app::models::{DischargeActivity, FieldVisit, Reading, TimeRange};
use crate::app::services::location_registry::LocationInfo;
use crate::constants::FIELD_VISIT_ID_PREFIX;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A field visit with everything appended to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldVisitRecord {
    pub visit: FieldVisit,
    pub activities: Vec<DischargeActivity>,
    pub readings: Vec<Reading>,
}

/// Sink that collects field visits in memory
///
/// Visits get sequential identifiers (`visit-0001`, `visit-0002`, ...).
#[derive(Debug, Default)]
pub struct FieldVisitCollector {
    records: Vec<FieldVisitRecord>,
    visits_created: usize,
}

impl FieldVisitCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[FieldVisitRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FieldVisitRecord> {
        self.records
    }

    pub fn visit_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut(&mut self, visit: &FieldVisit) -> Result<&mut FieldVisitRecord> {
        self.records
            .iter_mut()
            .find(|record| record.visit.identifier == visit.identifier)
            .ok_or_else(|| Error::sink(format!("unknown field visit '{}'", visit.identifier)))
    }
}

impl ResultsSink for FieldVisitCollector {
    fn create_field_visit(
        &mut self,
        location: &LocationInfo,
        period: &TimeRange,
        party: &str,
    ) -> Result<FieldVisit> {
        self.visits_created += 1;
        let visit = FieldVisit {
            identifier: format!("{}-{:04}", FIELD_VISIT_ID_PREFIX, self.visits_created),
            location_identifier: location.identifier.clone(),
            period: *period,
            party: party.to_string(),
        };

        debug!(
            "Created field visit {} at {}",
            visit.identifier, visit.location_identifier
        );

        self.records.push(FieldVisitRecord {
            visit: visit.clone(),
            activities: Vec::new(),
            readings: Vec::new(),
        });

        Ok(visit)
    }

    fn append_discharge_activity(
        &mut self,
        visit: &FieldVisit,
        activity: DischargeActivity,
    ) -> Result<()> {
        self.record_mut(visit)?.activities.push(activity);
        Ok(())
    }

    fn append_reading(&mut self, visit: &FieldVisit, reading: Reading) -> Result<()> {
        self.record_mut(visit)?.readings.push(reading);
        Ok(())
    }

    fn discard_field_visit(&mut self, visit: &FieldVisit) -> Result<()> {
        let before = self.records.len();
        self.records
            .retain(|record| record.visit.identifier != visit.identifier);
        if self.records.len() == before {
            return Err(Error::sink(format!(
                "unknown field visit '{}'",
                visit.identifier
            )));
        }

        debug!("Discarded field visit {}", visit.identifier);
        Ok(())
    }
}
