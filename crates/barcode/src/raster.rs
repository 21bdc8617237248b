//! Barcode rasterisation
//!
//! A symbol becomes an 8-bit grayscale bitmap, one byte per pixel, 0 for a
//! bar and 255 for a space. There is no human-readable text under the bars.

use crate::code128::Symbol;
use crate::{BarcodeError, Result};
use serde::{Deserialize, Serialize};

pub const BLACK: u8 = 0;
pub const WHITE: u8 = 255;

/// Raster parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RasterOptions {
    /// Pixels per module
    pub module_width_px: u32,
    /// Bitmap height in pixels
    pub height_px: u32,
    /// Blank modules on each side of the symbol
    pub quiet_zone_modules: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            module_width_px: 2,
            height_px: 60,
            quiet_zone_modules: 10,
        }
    }
}

impl RasterOptions {
    pub fn with_module_width(mut self, px: u32) -> Self {
        self.module_width_px = px;
        self
    }

    pub fn with_height(mut self, px: u32) -> Self {
        self.height_px = px;
        self
    }

    pub fn with_quiet_zone(mut self, modules: u32) -> Self {
        self.quiet_zone_modules = modules;
        self
    }
}

/// A grayscale bitmap, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Pixels of row `y`
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y * self.width) as usize;
        self.pixels.get(start..start + self.width as usize)
    }

    /// Aspect ratio as width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Draw a symbol into a bitmap
pub fn rasterize(symbol: &Symbol, options: &RasterOptions) -> Result<Raster> {
    if options.module_width_px == 0 {
        return Err(BarcodeError::InvalidRaster(
            "module width must be at least one pixel".to_string(),
        ));
    }
    if options.height_px == 0 {
        return Err(BarcodeError::InvalidRaster(
            "height must be at least one pixel".to_string(),
        ));
    }

    let scale = options.module_width_px as usize;
    let quiet = options.quiet_zone_modules as usize * scale;

    let mut row = vec![WHITE; quiet];
    for bar in symbol.modules() {
        let shade = if bar { BLACK } else { WHITE };
        row.extend(std::iter::repeat(shade).take(scale));
    }
    row.extend(std::iter::repeat(WHITE).take(quiet));

    let width = u32::try_from(row.len())
        .map_err(|_| BarcodeError::InvalidRaster("symbol too wide".to_string()))?;
    let mut pixels = Vec::with_capacity(row.len() * options.height_px as usize);
    for _ in 0..options.height_px {
        pixels.extend_from_slice(&row);
    }

    tracing::debug!(
        data = symbol.data(),
        width,
        height = options.height_px,
        "rasterized barcode"
    );

    Ok(Raster {
        width,
        height: options.height_px,
        pixels,
    })
}
