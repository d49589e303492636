//! Filmstrip assembly.
//!
//! This module turns sorted screenshots and shifts into:
//! - Annotated frame sequences (shifts-only and full)
//! - Shift statistics
//! - The report model handed to the renderer

pub mod assembler;
pub mod metrics;
pub mod report;

// Re-export main types and functions
pub use assembler::{assemble_filmstrip, FilmFrame, Filmstrip, FilmstripPolicy};
pub use metrics::{calculate_shift_stats, ShiftStats};
pub use report::{build_report, Report};
