//! Command-line argument definitions for the FlowTracker2 converter
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{ConverterConfig, MalformedContentPolicy};
use crate::constants::MAX_WORKERS;
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the FlowTracker2 converter
///
/// Converts SonTek FlowTracker2 discharge measurements into field visit
/// records with a discharge activity, gauge height and water temperature.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ft2-convert",
    version,
    about = "Convert SonTek FlowTracker2 discharge measurements into field visit records",
    long_about = "Reads FlowTracker2 measurement documents, maps every station onto a \
                  standardized vertical, and writes one field visit document per input \
                  file containing the discharge activity and the mid-visit water \
                  temperature reading."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert measurement files into field visit documents
    Convert(ConvertArgs),
    /// Summarise a single measurement without converting it
    Inspect(InspectArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Measurement files or directories to scan
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the field visit documents
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file listing known locations, used to resolve site numbers
    #[arg(long = "locations", value_name = "FILE")]
    pub locations_file: Option<PathBuf>,

    /// Record every visit against this location instead of resolving site numbers
    #[arg(long = "location", value_name = "ID")]
    pub location: Option<String>,

    /// JSON configuration file; command-line flags take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of files converted concurrently
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Replace existing field visit documents
    #[arg(long)]
    pub overwrite: bool,

    /// Convert without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Report malformed measurement files as foreign instead of invalid
    #[arg(long)]
    pub malformed_as_foreign: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Measurement file to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Increase logging verbosity
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ConvertArgs {
    /// Validate the convert arguments for consistency
    pub fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            if !input.exists() {
                return Err(Error::configuration(format!(
                    "Input path does not exist: {}",
                    input.display()
                )));
            }
        }

        if let Some(locations_file) = &self.locations_file {
            if !locations_file.is_file() {
                return Err(Error::configuration(format!(
                    "Locations file does not exist: {}",
                    locations_file.display()
                )));
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers must be between 1 and {}",
                    MAX_WORKERS
                )));
            }
        }

        if let Some(location) = &self.location {
            if location.trim().is_empty() {
                return Err(Error::configuration("Location identifier cannot be empty"));
            }
        }

        Ok(())
    }

    /// Build the converter configuration from the config file and flags
    pub fn to_config(&self) -> Result<ConverterConfig> {
        let mut config = match &self.config_file {
            Some(path) => ConverterConfig::from_file(path)?,
            None => ConverterConfig::default(),
        };

        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.overwrite {
            config.overwrite = true;
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.malformed_as_foreign {
            config.malformed_content_policy = MalformedContentPolicy::TreatAsForeign;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl InspectArgs {
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_convert_command() {
        let args = Args::try_parse_from([
            "ft2-convert",
            "convert",
            "a.json",
            "b.json",
            "-o",
            "out",
            "-w",
            "2",
            "-vv",
            "--malformed-as-foreign",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Convert(convert)) => {
                assert_eq!(convert.inputs.len(), 2);
                assert_eq!(convert.output_dir, Some(PathBuf::from("out")));
                assert_eq!(convert.workers, Some(2));
                assert_eq!(convert.get_log_level(), "debug");
                assert!(convert.malformed_as_foreign);
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Args::try_parse_from(["ft2-convert", "convert"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["ft2-convert", "convert", "a.json", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let temp_dir = TempDir::new().unwrap();
        let args = ConvertArgs {
            inputs: vec![temp_dir.path().to_path_buf()],
            output_dir: Some(temp_dir.path().join("out")),
            locations_file: None,
            location: None,
            config_file: None,
            workers: Some(3),
            overwrite: true,
            dry_run: false,
            malformed_as_foreign: true,
            verbose: 0,
            quiet: true,
        };

        assert!(args.validate().is_ok());
        let config = args.to_config().unwrap();

        assert_eq!(config.output_dir, temp_dir.path().join("out"));
        assert_eq!(config.workers, 3);
        assert!(config.overwrite);
        assert_eq!(
            config.malformed_content_policy,
            MalformedContentPolicy::TreatAsForeign
        );
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }

    #[test]
    fn test_validate_rejects_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let args = ConvertArgs {
            inputs: vec![temp_dir.path().join("absent.json")],
            output_dir: None,
            locations_file: None,
            location: None,
            config_file: None,
            workers: None,
            overwrite: false,
            dry_run: false,
            malformed_as_foreign: false,
            verbose: 0,
            quiet: false,
        };

        assert!(matches!(
            args.validate(),
            Err(Error::Configuration { .. })
        ));
    }
}
