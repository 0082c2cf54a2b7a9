//! Command implementations for the FlowTracker2 converter CLI
//!
//! Each command lives in its own module:
//! - `convert`: batch conversion into field visit documents
//! - `inspect`: summary of a single measurement

pub mod convert;
pub mod inspect;
pub mod shared;

use crate::app::services::converter::ConversionStats;
use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Dispatch to the handler for the parsed subcommand
pub async fn run(args: Args) -> Result<ConversionStats> {
    match args.command {
        Some(Commands::Convert(convert_args)) => convert::run_convert(convert_args).await,
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
