//! Orchestration entry point: setup, then one batch per parameter set.

use crate::batch::{process_folder, BatchReport};
use crate::config::RunConfig;
use crate::display::ComparisonDisplay;
use crate::error::EnhanceError;
use crate::setup::copy_sources;
use crate::verbose_println;

/// Copy the configured sources into the input folder, then run
/// `process_folder` once per configured parameter set, in order.
///
/// The configuration is validated first and a setup failure stops the run
/// before any batch starts. Outputs of all passes accumulate in the same
/// output folder under parameter-specific names.
pub fn run_sweep(
    config: &RunConfig,
    display: &mut dyn ComparisonDisplay,
) -> Result<Vec<BatchReport>, EnhanceError> {
    config.validate()?;

    copy_sources(&config.source_paths, &config.input_dir)?;

    let mut reports = Vec::with_capacity(config.runs.len());
    for params in &config.runs {
        verbose_println!(
            "[lumen] Pass {}/{}: median {} gamma {:?}",
            reports.len() + 1,
            config.runs.len(),
            params.median_window_size,
            params.gamma
        );
        reports.push(process_folder(
            &config.input_dir,
            &config.output_dir,
            params,
            display,
        )?);
    }

    Ok(reports)
}
