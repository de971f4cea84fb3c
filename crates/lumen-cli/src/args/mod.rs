//! Argument groups shared by several subcommands.

use clap::Args;
use std::path::PathBuf;

/// Output and diagnostics flags common to `run` and `process`.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Write the batch reports of this invocation as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Suppress per-file progress output (failures are still reported)
    #[arg(short, long)]
    pub silent: bool,

    /// Print configuration and per-stage details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl OutputArgs {
    /// Apply the diagnostics flags to the process-wide output switches.
    pub fn apply(&self) {
        lumen_core::config::set_verbose(self.verbose);
        lumen_core::config::set_silent(self.silent);
    }
}
