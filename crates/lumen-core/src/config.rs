//! Run configuration management.
//!
//! Global verbose/silent flags, the YAML run configuration (source files,
//! working folders, parameter sweep, display) and its on-disk discovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;
use crate::models::EnhanceParams;

// Global flags controlling diagnostic output
static VERBOSE: AtomicBool = AtomicBool::new(false);
static SILENT: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Set the global silent flag. When true, per-file progress lines are suppressed.
pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::SeqCst);
}

/// Check if silent mode is enabled.
pub fn is_silent() -> bool {
    SILENT.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a progress message to stdout unless silent mode is enabled.
#[macro_export]
macro_rules! progress_println {
    ($($arg:tt)*) => {
        if !$crate::config::is_silent() {
            println!($($arg)*);
        }
    };
}

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["lumen.yml", "lumen.yaml"];

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LUMEN_CONFIG";

/// How comparisons of the enhancement stages are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// No display surface; comparisons are skipped.
    #[default]
    None,
    /// Four-panel PNG strips written to a folder.
    ContactSheet,
}

/// Display settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Contact-sheet folder; defaults to `<output_dir>/comparisons`
    pub dir: Option<PathBuf>,
}

/// Complete configuration file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Files copied into `input_dir` before any processing
    pub source_paths: Vec<PathBuf>,
    /// Working folder the batch driver reads from
    pub input_dir: PathBuf,
    /// Folder receiving enhanced images
    pub output_dir: PathBuf,
    /// Parameter sets, processed in order
    pub runs: Vec<EnhanceParams>,
    pub display: DisplayConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_paths: Vec::new(),
            input_dir: PathBuf::from("input_image"),
            output_dir: PathBuf::from("output_image"),
            runs: default_sweep(),
            display: DisplayConfig::default(),
        }
    }
}

/// The three-pass sweep: light denoise with brightening, medium neutral,
/// heavy denoise with darkening.
pub fn default_sweep() -> Vec<EnhanceParams> {
    vec![
        EnhanceParams {
            median_window_size: 3,
            gamma: 0.5,
        },
        EnhanceParams {
            median_window_size: 5,
            gamma: 1.0,
        },
        EnhanceParams {
            median_window_size: 7,
            gamma: 2.0,
        },
    ]
}

impl RunConfig {
    /// Parse a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, String> {
        serde_yaml::from_str(contents).map_err(|e| format!("Failed to parse config YAML: {}", e))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    /// Reject sweeps that would fail partway through a run.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        if self.runs.is_empty() {
            return Err(EnhanceError::Config(
                "at least one parameter set is required".to_string(),
            ));
        }
        for (index, params) in self.runs.iter().enumerate() {
            params.validate().map_err(|e| {
                EnhanceError::Config(format!("run {} ({}): {}", index + 1, params.tag(), e))
            })?;
        }
        Ok(())
    }

    /// Folder that receives contact sheets.
    pub fn contact_sheet_dir(&self) -> PathBuf {
        self.display
            .dir
            .clone()
            .unwrap_or_else(|| self.output_dir.join("comparisons"))
    }
}

/// Public handle that stores the loaded configuration, its source path, and warnings.
pub struct RunConfigHandle {
    pub config: RunConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl RunConfigHandle {
    fn with_config(config: RunConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }

    /// Print config source and warnings (only in verbose mode).
    pub fn log_usage(&self) {
        if !is_verbose() {
            return;
        }
        if let Some(source) = &self.source {
            eprintln!("[lumen] Loaded run config from {}", source.display());
        } else {
            eprintln!("[lumen] Using built-in run defaults");
        }
        for warning in &self.warnings {
            eprintln!("[lumen] Config warning: {}", warning);
        }
    }
}

/// Load a config file from an explicit path.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<RunConfig, String> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    RunConfig::from_yaml_str(&contents).map_err(|e| format!("{} ({})", e, path.display()))
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// An explicit `custom_path` must load; discovered candidates that fail to
/// read or parse are recorded as warnings and skipped. With no usable file
/// the built-in defaults are returned. The result is validated either way.
pub fn load_run_config(custom_path: Option<&Path>) -> Result<RunConfigHandle, EnhanceError> {
    let handle = match custom_path {
        Some(path) => {
            let config = load_config_file(path).map_err(EnhanceError::Config)?;
            let source = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            RunConfigHandle::with_config(config, Some(source), Vec::new())
        }
        None => discover_run_config(&get_config_candidates()),
    };

    handle.config.validate()?;
    Ok(handle)
}

/// First candidate that reads and parses, or defaults with a warning trail.
fn discover_run_config(candidates: &[PathBuf]) -> RunConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match load_config_file(candidate) {
            Ok(config) => {
                let source = fs::canonicalize(candidate).unwrap_or_else(|_| candidate.clone());
                return RunConfigHandle::with_config(config, Some(source), warnings);
            }
            Err(err) => warnings.push(err),
        }
    }

    warnings.push("No run config found; using built-in defaults.".to_string());
    RunConfigHandle::with_config(RunConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("lumen").join(name));
        }
    }

    candidates
}
