//! Parsing functions for CLI arguments.

mod params;

pub use params::{parse_param_set, parse_sweep};
