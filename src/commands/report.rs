//! Report command implementation.
//!
//! The report command:
//! 1. Reads the trace file
//! 2. Ingests screenshots, shifts and the navigation reference
//! 3. Assembles both filmstrips
//! 4. Renders the HTML document
//! 5. Writes it out

use crate::filmstrip::build_report;
use crate::output::{render_report, write_html};
use crate::parser::{parse_trace, read_trace_file};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// DevTools performance trace (JSON)
    pub trace_path: PathBuf,

    /// HTML file to write
    pub output_path: PathBuf,
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or non-JSON trace
/// * Screenshot events without image data, or no screenshots at all
/// * File write errors
pub fn execute_report(args: &ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Reading trace {}...", args.trace_path.display());
    let raw_trace = read_trace_file(&args.trace_path)
        .with_context(|| format!("Failed to read trace {}", args.trace_path.display()))?;

    info!("Step 2/4: Ingesting trace events...");
    let trace = parse_trace(&raw_trace).context("Failed to parse trace data")?;

    match &trace.navigation.url {
        Some(url) => info!("Navigation to {} at {}", url, trace.navigation.ts),
        None => info!(
            "No main-frame navigation found, timing from first screenshot at {}",
            trace.navigation.ts
        ),
    }

    info!("Step 3/4: Assembling filmstrips...");
    let report = build_report(&trace);
    info!("Shift summary: {}", report.stats.summary());

    info!("Step 4/4: Rendering and writing report...");
    let html = render_report(&report);
    write_html(&html, &args.output_path).context("Failed to write HTML report")?;

    info!(
        "✓ Report written to {} in {:.2}s",
        args.output_path.display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if !args.trace_path.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_path.display());
    }

    if args.output_path.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output_path == args.trace_path {
        anyhow::bail!("Output path would overwrite the input trace");
    }

    Ok(())
}
