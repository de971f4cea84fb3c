//! Comparison display for the enhancement stages.
//!
//! The pipeline hands each result to a `ComparisonDisplay` as a row of
//! labelled panels. Implementations decide what "showing" means: nothing at
//! all on a headless machine, a PNG contact sheet on disk, or an in-memory
//! record for tests.

use std::path::{Path, PathBuf};

use crate::config::{DisplayConfig, DisplayMode, RunConfig};
use crate::exporters::export_rgb_png;
use crate::models::{GrayImage, RgbImage};
use crate::verbose_println;

/// Pixels of black between contact-sheet panels.
const PANEL_GAP: u32 = 8;

/// Image data of one panel.
#[derive(Debug, Clone, Copy)]
pub enum PanelImage<'a> {
    Rgb(&'a RgbImage),
    Gray(&'a GrayImage),
}

impl PanelImage<'_> {
    pub fn width(&self) -> u32 {
        match self {
            PanelImage::Rgb(image) => image.width,
            PanelImage::Gray(image) => image.width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PanelImage::Rgb(image) => image.height,
            PanelImage::Gray(image) => image.height,
        }
    }

    /// RGB triple at (`x`, `y`); gray samples are replicated.
    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        match self {
            PanelImage::Rgb(image) => {
                let idx = (y as usize * image.width as usize + x as usize) * 3;
                [image.data[idx], image.data[idx + 1], image.data[idx + 2]]
            }
            PanelImage::Gray(image) => {
                let v = image.get(x, y);
                [v, v, v]
            }
        }
    }
}

/// A titled image in a comparison row.
#[derive(Debug, Clone)]
pub struct ComparisonPanel<'a> {
    pub title: String,
    pub image: PanelImage<'a>,
}

impl<'a> ComparisonPanel<'a> {
    pub fn new(title: impl Into<String>, image: PanelImage<'a>) -> Self {
        Self {
            title: title.into(),
            image,
        }
    }
}

/// Capability to present a row of comparison panels.
pub trait ComparisonDisplay {
    /// Present `panels` under `name`. Errors are reported by the caller and
    /// never abort the pipeline.
    fn show(&mut self, name: &str, panels: &[ComparisonPanel<'_>]) -> Result<(), String>;
}

/// Display for environments without a display surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct Headless;

impl ComparisonDisplay for Headless {
    fn show(&mut self, _name: &str, _panels: &[ComparisonPanel<'_>]) -> Result<(), String> {
        Ok(())
    }
}

/// Writes each comparison as a single PNG, panels left to right.
///
/// Panel titles are stored in `tEXt` chunks (`Panel 1` .. `Panel N`).
#[derive(Debug, Clone)]
pub struct ContactSheet {
    dir: PathBuf,
    gap: u32,
}

impl ContactSheet {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            gap: PANEL_GAP,
        }
    }

    /// Path of the sheet written for `name`.
    pub fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.png", name))
    }
}

impl ComparisonDisplay for ContactSheet {
    fn show(&mut self, name: &str, panels: &[ComparisonPanel<'_>]) -> Result<(), String> {
        if panels.is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            format!(
                "Failed to create comparison directory {}: {}",
                self.dir.display(),
                e
            )
        })?;

        let sheet = compose_row(panels, self.gap);
        let mut text = vec![("Title".to_string(), name.to_string())];
        text.extend(
            panels
                .iter()
                .enumerate()
                .map(|(i, panel)| (format!("Panel {}", i + 1), panel.title.clone())),
        );

        let path = self.sheet_path(name);
        export_rgb_png(&sheet, &path, &text)?;
        verbose_println!("[lumen] Wrote comparison {}", path.display());
        Ok(())
    }
}

/// Keeps the names and panel titles it was shown, for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub shown: Vec<(String, Vec<String>)>,
}

impl ComparisonDisplay for RecordingDisplay {
    fn show(&mut self, name: &str, panels: &[ComparisonPanel<'_>]) -> Result<(), String> {
        self.shown.push((
            name.to_string(),
            panels.iter().map(|p| p.title.clone()).collect(),
        ));
        Ok(())
    }
}

/// Build the display described by a run configuration.
pub fn display_for(config: &RunConfig) -> Box<dyn ComparisonDisplay> {
    display_from_settings(&config.display, &config.contact_sheet_dir())
}

/// Build a display from settings, with `default_dir` used for contact sheets
/// when the settings name no folder.
pub fn display_from_settings(
    settings: &DisplayConfig,
    default_dir: &Path,
) -> Box<dyn ComparisonDisplay> {
    match settings.mode {
        DisplayMode::None => Box::new(Headless),
        DisplayMode::ContactSheet => Box::new(ContactSheet::new(
            settings.dir.clone().unwrap_or_else(|| default_dir.to_path_buf()),
        )),
    }
}

/// Lay panels out left to right on black, top-aligned.
fn compose_row(panels: &[ComparisonPanel<'_>], gap: u32) -> RgbImage {
    let gaps = gap * (panels.len() as u32).saturating_sub(1);
    let width = panels.iter().map(|p| p.image.width()).sum::<u32>() + gaps;
    let height = panels.iter().map(|p| p.image.height()).max().unwrap_or(0);

    let row_len = width as usize * 3;
    let mut data = vec![0u8; row_len * height as usize];

    let mut x_offset = 0u32;
    for panel in panels {
        let image = &panel.image;
        for y in 0..image.height() {
            let row_start = y as usize * row_len;
            for x in 0..image.width() {
                let idx = row_start + (x_offset + x) as usize * 3;
                data[idx..idx + 3].copy_from_slice(&image.rgb_at(x, y));
            }
        }
        x_offset += image.width() + gap;
    }

    RgbImage {
        width,
        height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoders::decode_image;
    use tempfile::tempdir;

    fn sample_panels<'a>(rgb: &'a RgbImage, gray: &'a GrayImage) -> Vec<ComparisonPanel<'a>> {
        vec![
            ComparisonPanel::new("Original", PanelImage::Rgb(rgb)),
            ComparisonPanel::new("Grayscale", PanelImage::Gray(gray)),
        ]
    }

    #[test]
    fn test_headless_accepts_everything() {
        let rgb = RgbImage::new(1, 1, vec![1, 2, 3]).unwrap();
        let gray = GrayImage::filled(1, 1, 9);
        assert!(Headless.show("x", &sample_panels(&rgb, &gray)).is_ok());
    }

    #[test]
    fn test_recording_display_keeps_titles() {
        let rgb = RgbImage::new(1, 1, vec![1, 2, 3]).unwrap();
        let gray = GrayImage::filled(1, 1, 9);
        let mut display = RecordingDisplay::default();

        display.show("comparison_3_0.5_a", &sample_panels(&rgb, &gray)).unwrap();

        assert_eq!(display.shown.len(), 1);
        assert_eq!(display.shown[0].0, "comparison_3_0.5_a");
        assert_eq!(display.shown[0].1, vec!["Original", "Grayscale"]);
    }

    #[test]
    fn test_compose_row_layout() {
        let rgb = RgbImage::new(2, 2, vec![255, 0, 0].repeat(4)).unwrap();
        let gray = GrayImage::filled(3, 1, 77);

        let sheet = compose_row(&sample_panels(&rgb, &gray), 1);

        assert_eq!((sheet.width, sheet.height), (6, 2));
        // Red panel, black gap, gray panel
        assert_eq!(&sheet.data[0..3], &[255, 0, 0]);
        assert_eq!(&sheet.data[6..9], &[0, 0, 0]);
        assert_eq!(&sheet.data[9..12], &[77, 77, 77]);
        // Second row below the shorter gray panel stays black
        let second_row = 6 * 3;
        assert_eq!(&sheet.data[second_row + 9..second_row + 12], &[0, 0, 0]);
    }

    #[test]
    fn test_contact_sheet_writes_png() {
        let dir = tempdir().unwrap();
        let rgb = RgbImage::new(4, 3, vec![10; 36]).unwrap();
        let gray = GrayImage::filled(4, 3, 200);
        let mut display = ContactSheet::new(dir.path().join("sheets"));

        display.show("comparison_5_1.0_photo", &sample_panels(&rgb, &gray)).unwrap();

        let path = display.sheet_path("comparison_5_1.0_photo");
        let sheet = decode_image(&path).unwrap();
        assert_eq!((sheet.width, sheet.height), (4 + PANEL_GAP + 4, 3));
    }

    #[test]
    fn test_display_from_settings() {
        let dir = tempdir().unwrap();
        let rgb = RgbImage::new(1, 1, vec![1, 2, 3]).unwrap();
        let gray = GrayImage::filled(1, 1, 9);
        let settings = DisplayConfig {
            mode: DisplayMode::ContactSheet,
            dir: None,
        };

        let mut display = display_from_settings(&settings, dir.path());
        display.show("sheet", &sample_panels(&rgb, &gray)).unwrap();

        assert!(dir.path().join("sheet.png").exists());
    }
}
