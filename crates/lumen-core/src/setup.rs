//! Setup phase: populate the working input folder.

use std::path::{Path, PathBuf};

use crate::error::EnhanceError;
use crate::progress_println;

/// Copy each source file into `input_dir`, creating the folder if needed.
///
/// Files keep their names and overwrite earlier copies. Any missing or
/// unreadable source aborts the setup, since the working input set cannot
/// be established without it. Returns the copied destinations in order.
pub fn copy_sources(
    source_paths: &[PathBuf],
    input_dir: &Path,
) -> Result<Vec<PathBuf>, EnhanceError> {
    std::fs::create_dir_all(input_dir).map_err(|e| {
        EnhanceError::Setup(format!(
            "Failed to create input directory {}: {}",
            input_dir.display(),
            e
        ))
    })?;

    let mut copied = Vec::with_capacity(source_paths.len());
    for source in source_paths {
        let file_name = source.file_name().ok_or_else(|| {
            EnhanceError::Setup(format!("Invalid path (no filename): {}", source.display()))
        })?;
        let dest = input_dir.join(file_name);

        std::fs::copy(source, &dest).map_err(|e| {
            EnhanceError::Setup(format!("Failed to copy {}: {}", source.display(), e))
        })?;
        progress_println!(
            "Copied {} to {}",
            file_name.to_string_lossy(),
            input_dir.display()
        );
        copied.push(dest);
    }

    Ok(copied)
}
