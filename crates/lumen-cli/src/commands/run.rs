use std::path::PathBuf;

use lumen_cli::{write_reports, OutputArgs};
use lumen_core::config::{load_run_config, DisplayMode};
use lumen_core::display::display_for;
use lumen_core::run_sweep;

/// Run the configured sweep: copy sources into the input folder, then one
/// batch per parameter set.
pub fn cmd_run(
    config: Option<PathBuf>,
    contact_sheets: bool,
    output: OutputArgs,
) -> Result<(), String> {
    output.apply();

    let handle = load_run_config(config.as_deref()).map_err(|e| e.to_string())?;
    handle.log_usage();

    let mut run_config = handle.config;
    if contact_sheets {
        run_config.display.mode = DisplayMode::ContactSheet;
    }

    println!(
        "Running {} pass(es) over {}",
        run_config.runs.len(),
        run_config.input_dir.display()
    );

    let mut display = display_for(&run_config);
    let reports = run_sweep(&run_config, display.as_mut()).map_err(|e| e.to_string())?;

    for report in &reports {
        report.print_summary();
    }

    if let Some(path) = &output.report {
        write_reports(path, &reports)?;
    }

    Ok(())
}
