//! Configuration management and validation.
//!
//! Provides the converter configuration: how malformed instrument files are
//! reported, batch concurrency, and where converted field visits are written.

use crate::constants::{DEFAULT_INPUT_EXTENSIONS, DEFAULT_OUTPUT_DIR, MAX_WORKERS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How a recognised file with unusable content is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedContentPolicy {
    /// Acknowledge the format and report the file as parsed but invalid
    #[default]
    RejectAsInvalid,
    /// Report the file as not ours so another interpreter can try it
    TreatAsForeign,
}

/// Global configuration for FlowTracker2 conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Reporting of malformed measurement files
    pub malformed_content_policy: MalformedContentPolicy,

    /// Number of files converted concurrently
    pub workers: usize,

    /// Directory receiving the field visit documents
    pub output_dir: PathBuf,

    /// Replace existing field visit documents
    pub overwrite: bool,

    /// Convert without writing any output
    pub dry_run: bool,

    /// File extensions picked up when scanning input directories
    pub input_extensions: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            malformed_content_policy: MalformedContentPolicy::default(),
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            overwrite: false,
            dry_run: false,
            input_extensions: DEFAULT_INPUT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0",
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_WORKERS
            )));
        }

        if self.input_extensions.is_empty() {
            return Err(Error::configuration(
                "At least one input file extension is required",
            ));
        }

        if self
            .input_extensions
            .iter()
            .any(|ext| ext.trim().is_empty() || ext.starts_with('.'))
        {
            return Err(Error::configuration(
                "Input extensions must be non-empty and given without a leading dot",
            ));
        }

        Ok(())
    }

    /// Check whether a path has one of the configured input extensions
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.input_extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = ConverterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.malformed_content_policy,
            MalformedContentPolicy::RejectAsInvalid
        );
        assert!(config.workers >= 1);
        assert!(!config.overwrite);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = ConverterConfig {
            workers: 0,
            ..ConverterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_too_many_workers_rejected() {
        let config = ConverterConfig {
            workers: MAX_WORKERS + 1,
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dotted_extension_rejected() {
        let config = ConverterConfig {
            input_extensions: vec![".json".to_string()],
            ..ConverterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accepts_extension_case_insensitively() {
        let config = ConverterConfig::default();
        assert!(config.accepts_extension(Path::new("survey.JSON")));
        assert!(!config.accepts_extension(Path::new("survey.ft")));
        assert!(!config.accepts_extension(Path::new("survey")));
    }

    #[test]
    fn test_from_file_fills_missing_fields_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"malformed_content_policy": "treat_as_foreign", "workers": 3}"#,
        )
        .unwrap();

        let config = ConverterConfig::from_file(&path).unwrap();

        assert_eq!(
            config.malformed_content_policy,
            MalformedContentPolicy::TreatAsForeign
        );
        assert_eq!(config.workers, 3);
        assert_eq!(config.input_extensions, vec!["json".to_string()]);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"workers": 0}"#).unwrap();

        assert!(ConverterConfig::from_file(&path).is_err());
    }
}
