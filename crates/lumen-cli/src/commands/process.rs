use std::path::PathBuf;

use lumen_cli::{parse_sweep, write_reports, OutputArgs};
use lumen_core::display::{ComparisonDisplay, ContactSheet, Headless};
use lumen_core::process_folder;
use lumen_core::verbose_println;

/// Batch one folder with one or more parameter sets, without a setup copy.
pub fn cmd_process(
    input_dir: PathBuf,
    output_dir: PathBuf,
    median: u32,
    gamma: f64,
    sweep: Vec<String>,
    contact_sheets: Option<PathBuf>,
    output: OutputArgs,
) -> Result<(), String> {
    output.apply();

    let runs = parse_sweep(&sweep, median, gamma)?;

    if !input_dir.is_dir() {
        return Err(format!("Input directory not found: {}", input_dir.display()));
    }

    let mut display: Box<dyn ComparisonDisplay> = match contact_sheets {
        Some(dir) => {
            verbose_println!("[lumen] Contact sheets go to {}", dir.display());
            Box::new(ContactSheet::new(dir))
        }
        None => Box::new(Headless),
    };

    let mut reports = Vec::with_capacity(runs.len());
    for params in &runs {
        let report = process_folder(&input_dir, &output_dir, params, display.as_mut())
            .map_err(|e| e.to_string())?;
        report.print_summary();
        reports.push(report);
    }

    if let Some(path) = &output.report {
        write_reports(path, &reports)?;
    }

    Ok(())
}
