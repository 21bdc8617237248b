//! Engine settings
//!
//! Settings are stored as camelCase JSON. Every field has a default, so a
//! partial file only overrides what it names.

use crate::{ComposeError, Result};
use barcode::RasterOptions;
use layout_engine::{CellOverflow, PageConfig, PageSize};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Barcode size on the page and raster resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarcodeSettings {
    /// Width of one module in points
    pub module_width: f32,
    /// Bar height in points
    pub height: f32,
    /// Raster pixels per module
    pub pixels_per_module: u32,
    /// Quiet zone on each side, in modules
    pub quiet_zone: u32,
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        Self {
            module_width: 1.2,
            height: 40.0,
            pixels_per_module: 2,
            quiet_zone: 10,
        }
    }
}

impl BarcodeSettings {
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            module_width_px: self.pixels_per_module,
            // Keep the raster roughly proportional to the printed size
            height_px: ((self.height / self.module_width) * self.pixels_per_module as f32)
                .round()
                .max(1.0) as u32,
            quiet_zone_modules: self.quiet_zone,
        }
    }
}

/// Settings for document generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub page_size: PageSize,
    /// Margin on every side, in points
    pub margin: f32,
    pub currency_prefix: String,
    /// chrono format for dates
    pub date_format: String,
    /// chrono format for timestamps
    pub timestamp_format: String,
    /// Redraw table headers after a page break
    pub repeat_table_header: bool,
    /// Overflow policy for tables that do not choose their own
    pub cell_overflow: CellOverflow,
    pub barcode: BarcodeSettings,
    pub output_dir: PathBuf,
    pub compress_pdf: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            margin: 40.0,
            currency_prefix: "Rs. ".to_string(),
            date_format: "%d-%m-%Y".to_string(),
            timestamp_format: "%d-%m-%Y %I:%M %p".to_string(),
            repeat_table_header: true,
            cell_overflow: CellOverflow::Clip,
            barcode: BarcodeSettings::default(),
            output_dir: PathBuf::from("output"),
            compress_pdf: true,
        }
    }
}

impl EngineSettings {
    pub fn page_config(&self) -> PageConfig {
        PageConfig::new(self.page_size, self.margin)
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_config().content_width()
    }
}

/// Loads [`EngineSettings`] from a JSON file
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    path: PathBuf,
}

impl SettingsLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings. A missing file gives defaults, and so does a file that
    /// fails to parse (with a warning).
    pub fn load(&self) -> Result<EngineSettings> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(EngineSettings::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        match serde_json::from_str::<EngineSettings>(&content) {
            Ok(settings) => {
                settings.page_config().validate().map_err(|e| {
                    ComposeError::Settings(format!("{}: {}", self.path.display(), e))
                })?;
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Failed to parse settings file, using defaults: {}",
                    e
                );
                Ok(EngineSettings::default())
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, settings: &EngineSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
