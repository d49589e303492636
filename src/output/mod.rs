//! Report rendering and output.
//!
//! This module handles:
//! - Rendering the report model as a self-contained HTML document
//! - Writing the document to disk

pub mod html;
pub mod render;

// Re-export main functions
pub use html::write_html;
pub use render::{render_filmstrip, render_report};
