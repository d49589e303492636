//! Layout Shift Filmstrip CLI
//!
//! Reads a DevTools performance trace and writes an HTML report showing
//! layout shifts on top of the recorded screenshots.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use layout_shift_filmstrip::commands::{execute_report, validate_args, ReportArgs};

/// Visualize layout shifts from a DevTools performance trace
#[derive(Parser, Debug)]
#[command(name = "layoutshifts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// DevTools performance trace (JSON)
    trace: PathBuf,

    /// HTML report to write
    output: PathBuf,
}

fn main() -> Result<()> {
    // Missing or extra positionals exit with usage here
    let cli = Cli::parse();

    // Setup logging
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = ReportArgs {
        trace_path: cli.trace,
        output_path: cli.output,
    };

    validate_args(&args)?;
    execute_report(&args)?;

    Ok(())
}
