//! Inspect command implementation
//!
//! Reads one measurement and prints what the converter would see: the
//! survey header, each station with its type and velocity method, and the
//! methods the section would be recorded with.

use super::shared::setup_logging;
use crate::app::models::RawMeasurement;
use crate::app::services::converter::ConversionStats;
use crate::app::services::discharge_method::select_discharge_method;
use crate::app::services::measurement_reader::{JsonMeasurementReader, MeasurementReader};
use crate::app::services::velocity_method::{map_method, most_common_method};
use crate::cli::args::InspectArgs;
use crate::error::render_error_chain;
use crate::{Error, ReadError, Result};
use colored::*;
use std::fs;
use tracing::debug;

pub async fn run_inspect(args: InspectArgs) -> Result<ConversionStats> {
    setup_logging(args.get_log_level(), false)?;
    debug!("Inspecting {}", args.file.display());

    let bytes = fs::read(&args.file)
        .map_err(|e| Error::io(format!("Failed to read {}", args.file.display()), e))?;

    let measurement = match JsonMeasurementReader::new().read_measurement(&bytes) {
        Ok(measurement) => measurement,
        Err(error @ ReadError::FormatMismatch { .. }) => {
            println!(
                "{} {}",
                "Not a FlowTracker2 measurement:".bright_yellow().bold(),
                error
            );
            return Ok(ConversionStats::new());
        }
        Err(error) => {
            return Err(Error::transform_with_source(
                format!("{} could not be read", args.file.display()),
                error,
            ));
        }
    };

    print_measurement(&measurement);
    Ok(ConversionStats::new())
}

fn print_measurement(measurement: &RawMeasurement) {
    println!("{}", "FlowTracker2 Measurement".bright_green().bold());
    println!("{}", "━".repeat(40));
    println!("   • Site: {}", measurement.site_number);
    println!("   • Operator: {}", measurement.operator);
    println!(
        "   • Period: {} to {}",
        measurement.start_time, measurement.end_time
    );
    println!(
        "   • Handheld: {} (software {})",
        measurement.handheld.serial_number, measurement.handheld.software_version
    );
    if let Some(calculations) = &measurement.calculations {
        println!(
            "   • Discharge: {:.4} m^3/s over {:.3} m^2",
            calculations.discharge, calculations.area
        );
    }

    println!();
    println!("{}", "Stations:".bright_yellow().bold());
    for (index, station) in measurement.stations.iter().enumerate() {
        println!(
            "   {:>3}. {:<10} at {:>8.3} m  {} -> {:?}",
            index + 1,
            station.station_type.to_string(),
            station.location,
            station.velocity_method,
            map_method(&station.velocity_method)
        );
    }

    println!();
    match most_common_method(&measurement.stations) {
        Some(method) => println!("   • Section velocity method: {:?}", method),
        None => println!("   • Section velocity method: {}", "no stations".red()),
    }
    match select_discharge_method(&measurement.discharge_equation) {
        Ok(method) => println!("   • Discharge method: {:?}", method),
        Err(error) => println!(
            "   • Discharge method: {}",
            render_error_chain(&error).red()
        ),
    }
}
