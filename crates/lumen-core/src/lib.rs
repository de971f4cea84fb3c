//! Lumen Core Library
//!
//! Grayscale conversion, median denoising and gamma correction for folders
//! of images, plus the setup and sweep orchestration around them.

pub mod batch;
pub mod config;
pub mod decoders;
pub mod display;
pub mod error;
pub mod exporters;
pub mod models;
pub mod pipeline;
pub mod run;
pub mod setup;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use batch::{process_folder, BatchFailure, BatchReport};
pub use config::{DisplayConfig, DisplayMode, RunConfig};
pub use display::{ComparisonDisplay, ContactSheet, Headless, RecordingDisplay};
pub use error::EnhanceError;
pub use models::{EnhanceParams, GrayImage, ImageFormat, RgbImage};
pub use pipeline::{enhance_image, gamma_transform, median_filter, output_file_name, rgb_to_gray};
pub use run::run_sweep;
