//! Render items
//!
//! Everything here is in points with a top-left origin, the same space the
//! layout tree uses. Backends flip y themselves.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Bottom edge in top-left space
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl From<layout_engine::Rect> for Rect {
    fn from(r: layout_engine::Rect) -> Self {
        Self::new(r.x as f64, r.y as f64, r.width as f64, r.height as f64)
    }
}

/// 8-bit RGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Components scaled to 0..=1
    pub fn unit(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<layout_engine::Color> for Color {
    fn from(c: layout_engine::Color) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

/// Outline color and width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl From<layout_engine::Stroke> for StrokeStyle {
    fn from(s: layout_engine::Stroke) -> Self {
        Self::new(s.color.into(), s.width as f64)
    }
}

/// Font selection for a text run; the family is resolved by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// One line of text, positioned by its baseline start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub font: FontSpec,
    pub color: Color,
    pub origin: Point,
}

/// Where a raster from [`RenderModel::images`] is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePlacement {
    pub resource_id: String,
    pub bounds: Rect,
}

impl ImagePlacement {
    pub fn new(resource_id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            resource_id: resource_id.into(),
            bounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderItem {
    TextRun(TextRun),
    Rectangle {
        bounds: Rect,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeStyle,
    },
    Image(ImagePlacement),
}

/// A grayscale raster referenced by image items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderImage {
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Row-major 8-bit gray samples
    #[serde(skip)]
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRender {
    pub page_index: u32,
    pub width: f64,
    pub height: f64,
    pub items: Vec<RenderItem>,
}

impl PageRender {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.items.iter().filter_map(|item| match item {
            RenderItem::TextRun(run) => Some(run),
            _ => None,
        })
    }
}

/// Pages ready for a backend, plus the rasters they reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderModel {
    pub pages: Vec<PageRender>,
    pub images: Vec<RenderImage>,
}

impl RenderModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_page(&mut self, page: PageRender) {
        self.pages.push(page);
    }

    pub fn image(&self, id: &str) -> Option<&RenderImage> {
        self.images.iter().find(|img| img.id == id)
    }
}
