//! Shared components for CLI commands
//!
//! Logging setup, input discovery, location loading and progress bars used
//! by more than one command.

use crate::app::services::location_registry::{LocationInfo, LocationRegistry};
use crate::config::ConverterConfig;
use crate::constants::OUTPUT_FILE_SUFFIX;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Set up structured logging at the given level
///
/// `RUST_LOG` takes precedence over the level derived from the flags.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("flowtracker2_converter={}", log_level)));

    let result = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand files and directories into the list of measurement files to convert
///
/// Directories are walked recursively and filtered by the configured
/// extensions, skipping field visit documents written by earlier runs.
/// Explicitly named files are always included. The result is
/// sorted and free of duplicates.
pub fn discover_input_files(inputs: &[PathBuf], config: &ConverterConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }

        if !input.is_dir() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                input.display()
            )));
        }

        for entry in WalkDir::new(input).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", input.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if entry.file_type().is_file()
                && config.accepts_extension(path)
                && !is_field_visit_document(path)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();

    info!("Discovered {} measurement files", files.len());
    Ok(files)
}

fn is_field_visit_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| {
            name.to_ascii_lowercase()
                .ends_with(&format!(".{}", OUTPUT_FILE_SUFFIX))
        })
        .unwrap_or(false)
}

/// Load the location registry, or an empty one when no file is given
pub fn load_registry(locations_file: Option<&Path>) -> Result<LocationRegistry> {
    match locations_file {
        Some(path) => {
            let registry = LocationRegistry::load_from_file(path)?;
            info!(
                "Loaded {} locations from {}",
                registry.location_count(),
                path.display()
            );
            Ok(registry)
        }
        None => {
            debug!("No locations file given, site numbers resolve against an empty registry");
            Ok(LocationRegistry::new())
        }
    }
}

/// Location used for every visit when an override identifier is given
pub fn location_override(
    registry: &LocationRegistry,
    identifier: Option<&str>,
) -> Option<LocationInfo> {
    let identifier = identifier?.trim();
    match registry.get_location(identifier) {
        Some(location) => Some(location.clone()),
        None => {
            warn!(
                "Location '{}' is not in the registry, using it as given",
                identifier
            );
            Some(LocationInfo::new(identifier, ""))
        }
    }
}

/// Create a progress bar with the standard style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_walks_directories_and_filters_extensions() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("2024").join("may");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join("a.json"), "{}").unwrap();
        fs::write(nested.join("b.JSON"), "{}").unwrap();
        fs::write(nested.join("notes.txt"), "ignored").unwrap();

        let files =
            discover_input_files(&[temp_dir.path().to_path_buf()], &ConverterConfig::default())
                .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|path| !path.ends_with("notes.txt")));
    }

    #[test]
    fn test_discover_skips_earlier_field_visit_documents() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("output");
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(temp_dir.path().join("survey.json"), "{}").unwrap();
        fs::write(output_dir.join("survey.fieldvisit.json"), "{}").unwrap();

        let files =
            discover_input_files(&[temp_dir.path().to_path_buf()], &ConverterConfig::default())
                .unwrap();

        assert_eq!(files, vec![temp_dir.path().join("survey.json")]);
    }

    #[test]
    fn test_discover_keeps_explicit_files_and_dedups() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().join("survey.ft");
        fs::write(&explicit, "{}").unwrap();

        let files = discover_input_files(
            &[explicit.clone(), explicit.clone()],
            &ConverterConfig::default(),
        )
        .unwrap();

        assert_eq!(files, vec![explicit]);
    }

    #[test]
    fn test_discover_rejects_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let result = discover_input_files(
            &[temp_dir.path().join("missing")],
            &ConverterConfig::default(),
        );
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_location_override() {
        let registry =
            LocationRegistry::from_locations([LocationInfo::new("05420500", "Mississippi")]);

        let known = location_override(&registry, Some("05420500")).unwrap();
        assert_eq!(known.name, "Mississippi");

        let unknown = location_override(&registry, Some(" NEW-1 ")).unwrap();
        assert_eq!(unknown.identifier, "NEW-1");
        assert!(unknown.name.is_empty());

        assert!(location_override(&registry, None).is_none());
    }

    #[test]
    fn test_load_registry_without_file_is_empty() {
        assert!(load_registry(None).unwrap().is_empty());
    }
}
