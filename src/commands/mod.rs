//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod report;

// Re-export main command functions
pub use report::{execute_report, validate_args, ReportArgs};
