//! Trace parsing and typed event records.
//!
//! This module handles:
//! - Reading the DevTools trace JSON
//! - Classifying events by name
//! - Sorting screenshots and layout shifts
//! - Choosing the navigation reference

pub mod schema;
pub mod trace_events;

// Re-export main types
pub use schema::{
    ImpactedNode, IngestedTrace, LayoutShift, LayoutShiftData, NavigationReference, Rect,
    Screenshot,
};
pub use trace_events::{ingest_events, parse_trace, read_trace_file, NavigationStart, TraceEvent};
