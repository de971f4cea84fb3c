//! Shared utilities for lumen-cli
//!
//! Argument groups, parsers and report writing used by the `lumen` binary.

pub mod args;
pub mod parsers;
pub mod report;

// Re-export commonly used items at the crate root for convenience
pub use args::OutputArgs;
pub use parsers::{parse_param_set, parse_sweep};
pub use report::{write_json_file, write_reports};
