//! HTML report writer.
//!
//! The renderer produces the whole document in memory; this module puts it
//! on disk in a single write.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Write a rendered report
///
/// **Public** - main entry point for HTML output
///
/// Missing parent directories are created. An existing file is replaced.
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, a directory, or a parent
///   directory that cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_html(html_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if output_path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            output_path.display()
        )));
    }

    ensure_parent_dir(output_path)?;
    fs::write(output_path, html_content)?;

    info!(
        "Report written to {} ({:.2} KB)",
        output_path.display(),
        html_content.len() as f64 / 1024.0
    );
    Ok(())
}

/// **Private** - a bare file name has an empty parent, which needs nothing
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }

    debug!("Creating parent directories: {}", parent.display());
    fs::create_dir_all(parent).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
    })
}
