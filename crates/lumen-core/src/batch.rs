//! Folder batch driver.
//!
//! Runs the enhancement pipeline over every supported image in a folder with
//! one parameter set. Per-file failures are reported and skipped.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::display::ComparisonDisplay;
use crate::error::EnhanceError;
use crate::models::{EnhanceParams, SUPPORTED_EXTENSIONS};
use crate::pipeline::enhance_image;
use crate::{progress_println, verbose_println};

/// A file the batch could not enhance.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one `process_folder` call.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub params: EnhanceParams,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Saved outputs, in processing order
    pub saved: Vec<PathBuf>,
    pub failures: Vec<BatchFailure>,
    pub elapsed_secs: f64,
}

impl BatchReport {
    fn new(params: EnhanceParams, input_dir: &Path, output_dir: &Path) -> Self {
        Self {
            params,
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            saved: Vec::new(),
            failures: Vec::new(),
            elapsed_secs: 0.0,
        }
    }

    pub fn processed(&self) -> usize {
        self.saved.len() + self.failures.len()
    }

    /// Print the summary block to stdout.
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("BATCH COMPLETE ({})", self.params.tag());
        println!("========================================");
        println!("  Successful: {}", self.saved.len());
        println!("  Failed:     {}", self.failures.len());
        println!("  Output dir: {}", self.output_dir.display());
        println!("  Total time: {:.2}s", self.elapsed_secs);

        if !self.failures.is_empty() {
            println!("\nErrors:");
            for failure in &self.failures {
                println!("  {}: {}", failure.path.display(), failure.reason);
            }
        }
    }
}

/// Whether `path` carries an allow-listed image extension (any case).
///
/// The extension is taken from the file name after its last dot, and a
/// leading dot does not count: a hidden file named `.png` has no extension
/// and is skipped, while `.hidden.png` is accepted.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List supported image files directly inside `dir`.
///
/// Entries keep the directory's enumeration order. Subdirectories and files
/// with other extensions are ignored.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, EnhanceError> {
    let io_error = |e: std::io::Error| EnhanceError::Io {
        path: dir.to_path_buf(),
        reason: format!("Failed to read directory: {}", e),
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && is_supported_image(&path) {
            files.push(path);
        } else {
            verbose_println!("[lumen] Ignoring {}", path.display());
        }
    }
    Ok(files)
}

/// Create `dir` and its parents; an existing directory is fine.
pub fn ensure_dir(dir: &Path) -> Result<(), EnhanceError> {
    std::fs::create_dir_all(dir).map_err(|e| EnhanceError::Io {
        path: dir.to_path_buf(),
        reason: format!("Failed to create directory: {}", e),
    })
}

/// Enhance every supported image in `input_dir` into `output_dir`.
///
/// Parameters are validated before anything touches the file system. Decode
/// and encode failures are reported on stderr, recorded in the report and do
/// not stop the batch; any other error aborts it.
pub fn process_folder(
    input_dir: &Path,
    output_dir: &Path,
    params: &EnhanceParams,
    display: &mut dyn ComparisonDisplay,
) -> Result<BatchReport, EnhanceError> {
    params.validate()?;
    let start = Instant::now();

    ensure_dir(output_dir)?;
    let inputs = list_images(input_dir)?;
    verbose_println!(
        "[lumen] {} image(s) in {} with median {} gamma {:?}",
        inputs.len(),
        input_dir.display(),
        params.median_window_size,
        params.gamma
    );

    let mut report = BatchReport::new(*params, input_dir, output_dir);

    for input in &inputs {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress_println!("Processing: {}", file_name);

        match enhance_image(input, output_dir, params, display) {
            Ok(saved) => report.saved.push(saved),
            Err(err) if err.is_per_file() => {
                eprintln!("{}", err);
                report.failures.push(BatchFailure {
                    path: input.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    report.elapsed_secs = start.elapsed().as_secs_f64();
    Ok(report)
}
