//! Layout Shift Filmstrip
//!
//! Turns a DevTools performance trace into a static HTML filmstrip of
//! screenshots, with each layout shift drawn over the frames it affected.
//!
//! This crate provides the implementation for the `layoutshifts` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! layoutshifts trace.json report.html
//! ```
//!
//! Record the trace in the DevTools Performance panel with screenshots
//! enabled, then save the profile as JSON.

pub mod commands;
pub mod correlator;
pub mod filmstrip;
pub mod output;
pub mod parser;
pub mod utils;
