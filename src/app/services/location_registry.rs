//! Location lookup by instrument site number
//!
//! Measurements carry the site number typed into the handheld. When the
//! caller does not supply a location, the converter resolves one through a
//! [`LocationResolver`]. [`LocationRegistry`] is an in-memory resolver loaded
//! from a JSON list of locations.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Location a field visit is recorded against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub utc_offset_hours: Option<f64>,
}

impl LocationInfo {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            utc_offset_hours: None,
        }
    }
}

/// Resolves instrument site numbers to locations
pub trait LocationResolver: Send + Sync {
    fn resolve_by_site_number(&self, site_number: &str) -> Result<LocationInfo>;
}

/// In-memory location registry keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct LocationRegistry {
    locations: HashMap<String, LocationInfo>,
}

impl LocationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a list of locations
    ///
    /// Later entries replace earlier ones with the same identifier.
    pub fn from_locations(locations: impl IntoIterator<Item = LocationInfo>) -> Self {
        let mut registry = Self::new();
        for location in locations {
            registry.insert(location);
        }
        registry
    }

    /// Load a registry from a JSON array of locations
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read location registry {}", path.display()),
                e,
            )
        })?;

        let locations: Vec<LocationInfo> = serde_json::from_str(&contents)
            .map_err(|e| Error::location_registry(path, e.to_string()))?;

        if let Some(blank) = locations.iter().position(|l| l.identifier.trim().is_empty()) {
            return Err(Error::location_registry(
                path,
                format!("entry {} has an empty identifier", blank + 1),
            ));
        }

        let registry = Self::from_locations(locations);
        info!(
            "Loaded {} locations from {}",
            registry.location_count(),
            path.display()
        );
        Ok(registry)
    }

    /// Add or replace a location
    pub fn insert(&mut self, location: LocationInfo) {
        self.locations
            .insert(location.identifier.trim().to_string(), location);
    }

    /// Get a location by identifier
    pub fn get_location(&self, identifier: &str) -> Option<&LocationInfo> {
        self.locations.get(identifier.trim())
    }

    /// Get all identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.locations.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl LocationResolver for LocationRegistry {
    fn resolve_by_site_number(&self, site_number: &str) -> Result<LocationInfo> {
        match self.get_location(site_number) {
            Some(location) => {
                debug!("Resolved site {} to {}", site_number, location.name);
                Ok(location.clone())
            }
            None => Err(Error::location_not_found(site_number.trim())),
        }
    }
}
