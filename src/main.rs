use anyhow::Context;
use clap::{CommandFactory, Parser};
use flowtracker2_converter::cli::{args::Args, commands};
use flowtracker2_converter::error::render_error_chain;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and exit
    if args.command.is_none() {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    }

    let runtime = match tokio::runtime::Runtime::new().context("Failed to create async runtime") {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // Without a signal handler the command runs to completion
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(flowtracker2_converter::Error::interrupted(
                    "Conversion interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(stats) => {
            // Recognised measurements that failed to convert make the run fail
            if stats.has_invalid() {
                process::exit(1);
            }
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {}", render_error_chain(&error));
            process::exit(1);
        }
    }
}
