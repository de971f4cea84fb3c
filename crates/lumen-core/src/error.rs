//! Error kinds surfaced by the enhancement pipeline and its drivers.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while enhancing images.
///
/// `Decode` and `Encode` concern a single file and are recovered by the batch
/// driver. Every other variant stops the current run.
#[derive(Debug, Error)]
pub enum EnhanceError {
    /// A parameter set that cannot produce meaningful output.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source image is missing, unreadable, corrupt or of an unsupported format.
    #[error("Could not read {}: {}", .path.display(), .reason)]
    Decode { path: PathBuf, reason: String },

    /// The enhanced image could not be written to its destination.
    #[error("Could not write {}: {}", .path.display(), .reason)]
    Encode { path: PathBuf, reason: String },

    /// A directory could not be created or listed.
    #[error("I/O error on {}: {}", .path.display(), .reason)]
    Io { path: PathBuf, reason: String },

    /// The working input set could not be established.
    #[error("Setup failed: {0}")]
    Setup(String),

    /// The run configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EnhanceError {
    /// Whether the batch driver may skip the file and carry on.
    pub fn is_per_file(&self) -> bool {
        matches!(self, EnhanceError::Decode { .. } | EnhanceError::Encode { .. })
    }
}
