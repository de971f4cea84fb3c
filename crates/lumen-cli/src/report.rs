//! JSON output of batch reports.

use std::fs;
use std::path::Path;

use lumen_core::BatchReport;
use serde::Serialize;

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {}", path.display(), e))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {}", path.display(), e))
}

/// Write every report of an invocation to `path` as one JSON array.
pub fn write_reports(path: &Path, reports: &[BatchReport]) -> Result<(), String> {
    write_json_file(path, &reports)?;
    println!("Report written to: {}", path.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}
