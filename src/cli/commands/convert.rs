//! Convert command implementation
//!
//! Discovers measurement files, converts them concurrently on the blocking
//! thread pool, writes one field visit document per converted file and
//! prints a summary.

use super::shared::{
    create_progress_bar, discover_input_files, load_registry, location_override, setup_logging,
};
use crate::app::services::converter::{ConversionOutcome, ConversionStats, FieldVisitConverter};
use crate::app::services::location_registry::LocationInfo;
use crate::app::services::measurement_reader::JsonMeasurementReader;
use crate::app::services::results_sink::{FieldVisitCollector, JsonResultsWriter};
use crate::cli::args::ConvertArgs;
use crate::error::render_error_chain;
use crate::{Error, Result};
use colored::*;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task;
use tracing::{debug, info, info_span, warn};

/// Result of handling one input file
#[derive(Debug)]
pub enum FileReport {
    /// The converter ran and produced an outcome
    Converted(ConversionOutcome),
    /// The file could not be handed to the converter
    Failed(String),
}

/// Convert command runner
///
/// 1. Set up logging and validate arguments
/// 2. Build configuration, location registry and converter
/// 3. Convert every discovered file with bounded concurrency
/// 4. Print the summary
pub async fn run_convert(args: ConvertArgs) -> Result<ConversionStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level(), args.quiet)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config()?;
    debug!("Loaded configuration: {:?}", config);

    let registry = load_registry(args.locations_file.as_deref())?;
    let location = location_override(&registry, args.location.as_deref());
    if let Some(location) = &location {
        info!("Recording every visit against location {}", location.identifier);
    }

    let files = discover_input_files(&args.inputs, &config)?;
    if files.is_empty() {
        warn!("No measurement files found");
        return Ok(ConversionStats::new());
    }

    let writer = Arc::new(
        JsonResultsWriter::new(&config.output_dir)
            .with_overwrite(config.overwrite)
            .with_dry_run(config.dry_run),
    );
    let workers = config.workers;
    let converter = Arc::new(FieldVisitConverter::new(
        Arc::new(JsonMeasurementReader::new()),
        Arc::new(registry),
        config,
    ));

    info!(
        "Converting {} files with {} workers into {}",
        files.len(),
        workers,
        writer.output_dir().display()
    );

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(files.len() as u64, "Converting measurements"));

    let reports = convert_files(files, converter, writer, location, workers, progress.clone()).await;

    if let Some(pb) = &progress {
        pb.finish_with_message("Conversion complete");
    }

    let mut stats = ConversionStats::new();
    for (path, report) in &reports {
        match report {
            FileReport::Converted(outcome) => stats.record(path, outcome),
            FileReport::Failed(message) => stats.record_failure(path, message),
        }
    }

    info!("{}", stats.summary());
    if !args.quiet {
        print_summary(&stats, start_time.elapsed());
    }

    Ok(stats)
}

/// Split off inputs whose field visit document would share a path with an
/// earlier input
///
/// Inputs are taken in order, so the first file claiming an output path keeps
/// it and every later one is reported as failed.
pub fn reject_output_collisions(
    files: Vec<PathBuf>,
    writer: &JsonResultsWriter,
) -> (Vec<PathBuf>, Vec<(PathBuf, FileReport)>) {
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for path in files {
        let output_path = writer.output_path_for(&path);
        match claimed.get(&output_path) {
            Some(owner) => {
                let message = format!(
                    "output file {} is already produced by {}",
                    output_path.display(),
                    owner.display()
                );
                warn!("{}: {}", path.display(), message);
                rejected.push((path, FileReport::Failed(message)));
            }
            None => {
                claimed.insert(output_path, path.clone());
                accepted.push(path);
            }
        }
    }

    (accepted, rejected)
}

/// Convert files concurrently, at most `workers` at a time
///
/// Inputs that would overwrite another input's document are not converted.
/// Reports come back sorted by input path.
pub async fn convert_files(
    files: Vec<PathBuf>,
    converter: Arc<FieldVisitConverter>,
    writer: Arc<JsonResultsWriter>,
    location: Option<LocationInfo>,
    workers: usize,
    progress: Option<indicatif::ProgressBar>,
) -> Vec<(PathBuf, FileReport)> {
    let (files, rejected) = reject_output_collisions(files, &writer);
    if let Some(pb) = &progress {
        pb.inc(rejected.len() as u64);
    }

    let semaphore = Arc::new(Semaphore::new(workers));

    let mut reports = stream::iter(files)
        .map(|path| {
            let sem = semaphore.clone();
            let converter = converter.clone();
            let writer = writer.clone();
            let location = location.clone();
            let progress = progress.clone();
            async move {
                let _permit = sem.acquire().await.ok();
                let task_path = path.clone();
                let report = task::spawn_blocking(move || {
                    convert_file(&converter, &writer, location.as_ref(), &task_path)
                })
                .await
                .unwrap_or_else(|e| FileReport::Failed(format!("conversion task failed: {}", e)));

                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                (path, report)
            }
        })
        .buffer_unordered(workers)
        .collect::<Vec<_>>()
        .await;

    reports.extend(rejected);
    reports.sort_by(|a, b| a.0.cmp(&b.0));
    reports
}

/// Convert one file and write its field visit document
///
/// A write failure turns a successful conversion into an invalid one.
pub fn convert_file(
    converter: &FieldVisitConverter,
    writer: &JsonResultsWriter,
    location: Option<&LocationInfo>,
    path: &Path,
) -> FileReport {
    let _span = info_span!("convert", file = %path.display()).entered();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let error = Error::io(format!("Failed to read {}", path.display()), e);
            warn!("{}", render_error_chain(&error));
            return FileReport::Failed(error.to_string());
        }
    };

    let mut collector = FieldVisitCollector::new();
    let outcome = converter.convert(&bytes, location, &mut collector);

    if !outcome.is_success() {
        debug!("{}: {}", path.display(), outcome);
        return FileReport::Converted(outcome);
    }

    match writer.write(path, collector.into_records()) {
        Ok(_) => FileReport::Converted(outcome),
        Err(error) => {
            warn!("{}", render_error_chain(&error));
            FileReport::Converted(ConversionOutcome::ParsedButInvalid { error })
        }
    }
}

fn print_summary(stats: &ConversionStats, elapsed: std::time::Duration) {
    println!();
    println!("{}", "FlowTracker2 Conversion Complete".bright_green().bold());
    println!("{}", "━".repeat(40));
    println!("   • Files seen: {}", stats.files_seen);
    println!(
        "   • Converted: {} ({:.1}%)",
        stats.converted.to_string().green(),
        stats.success_rate()
    );
    println!(
        "   • Not FlowTracker2: {}",
        stats.cannot_parse.to_string().yellow()
    );
    println!("   • Invalid: {}", stats.invalid.to_string().red());
    println!("   • Time: {}", indicatif::HumanDuration(elapsed));

    if !stats.failures.is_empty() {
        println!();
        println!("{}", "Files not converted:".bright_yellow().bold());
        for failure in &stats.failures {
            println!("   • {}", failure);
        }
    }
    println!();
}
