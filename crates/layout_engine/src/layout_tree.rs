//! Layout tree structure
//!
//! The tree is the retained document model: a [`LayoutTree`] owns pages, each
//! [`PageBox`] owns positioned blocks. Coordinates are in points with the
//! origin at the top-left corner of the page.

use crate::{Color, Stroke, TextStyle};
use serde::{Deserialize, Serialize};

/// A rectangle in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A point in layout coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a block draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockContent {
    /// A single line of text; the block bounds are the line box
    Text { text: String, style: TextStyle },
    /// A straight line between two points
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Stroke,
    },
    /// A filled and/or stroked rectangle covering the block bounds
    Rectangle {
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// A raster image scaled into the block bounds
    Image { resource_id: String },
}

/// A positioned block on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockBox {
    pub bounds: Rect,
    pub content: BlockContent,
}

impl BlockBox {
    pub fn new(bounds: Rect, content: BlockContent) -> Self {
        Self { bounds, content }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, BlockContent::Text { .. })
    }

    /// Text of a text block
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            BlockContent::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Copy of this block moved by the given offsets
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        let mut moved = self.clone();
        moved.bounds.x += dx;
        moved.bounds.y += dy;
        if let BlockContent::Line { x1, y1, x2, y2, .. } = &mut moved.content {
            *x1 += dx;
            *x2 += dx;
            *y1 += dy;
            *y2 += dy;
        }
        moved
    }
}

/// A page in the layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBox {
    /// Page index (0-based)
    pub index: usize,
    /// Full page bounds
    pub bounds: Rect,
    /// Content area (excluding margins)
    pub content_area: Rect,
    /// Blocks in drawing order
    pub blocks: Vec<BlockBox>,
}

impl PageBox {
    /// Create a new page box
    pub fn new(index: usize, bounds: Rect, content_area: Rect) -> Self {
        Self {
            index,
            bounds,
            content_area,
            blocks: Vec::new(),
        }
    }

    /// Add a block to this page
    pub fn add_block(&mut self, block: BlockBox) {
        self.blocks.push(block);
    }

    /// Check if the page has no content
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over the text of all text blocks in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|b| b.text())
    }

    /// Check if any text block on the page equals `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// The lowest block edge on the page
    pub fn content_bottom(&self) -> f32 {
        self.blocks
            .iter()
            .map(|b| b.bounds.bottom())
            .fold(self.content_area.y, f32::max)
    }
}

/// An 8-bit grayscale raster referenced by image blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResource {
    pub id: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major gray samples, 0 = black, 255 = white
    #[serde(skip_serializing)]
    #[serde(default)]
    pub pixels: Vec<u8>,
}

/// The complete layout tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutTree {
    pub pages: Vec<PageBox>,
    /// Raster images referenced by image blocks
    #[serde(default)]
    pub images: Vec<ImageResource>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn add_page(&mut self, page: PageBox) {
        self.pages.push(page);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Register an image and return its resource id
    pub fn add_image(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> String {
        let id = format!("img{}", self.images.len());
        self.images.push(ImageResource {
            id: id.clone(),
            width,
            height,
            pixels,
        });
        id
    }

    pub fn image(&self, id: &str) -> Option<&ImageResource> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Find the index of the first page that contains the given text
    pub fn find_text(&self, needle: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(needle))
    }

    /// All text blocks across all pages, in order
    pub fn all_texts(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|p| p.texts()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert!(r.contains(10.0, 20.0));
        assert!(!r.contains(40.0, 20.0));
    }

    #[test]
    fn test_translate_line_block() {
        let block = BlockBox::new(
            Rect::new(0.0, 0.0, 10.0, 0.0),
            BlockContent::Line {
                x1: 0.0,
                y1: 0.0,
                x2: 10.0,
                y2: 0.0,
                stroke: Stroke::hairline(),
            },
        );
        let moved = block.translated(5.0, 7.0);
        assert_eq!(moved.bounds.x, 5.0);
        assert_eq!(moved.bounds.y, 7.0);
        match moved.content {
            BlockContent::Line { x1, y1, x2, y2, .. } => {
                assert_eq!((x1, y1, x2, y2), (5.0, 7.0, 15.0, 7.0));
            }
            _ => panic!("expected line"),
        }
    }

    #[test]
    fn test_image_registry() {
        let mut tree = LayoutTree::new();
        let a = tree.add_image(2, 1, vec![0, 255]);
        let b = tree.add_image(1, 1, vec![0]);
        assert_ne!(a, b);
        assert_eq!(tree.image(&a).map(|i| i.width), Some(2));
        assert!(tree.image("missing").is_none());
    }
}
