//! Layout cursor and page manager
//!
//! The [`PageManager`] owns the page being filled and the single vertical
//! [`Cursor`] on it. Callers ask for room with [`PageManager::ensure_space`]
//! *before* drawing an atomic element; when the element would cross the bottom
//! margin the current page is finalized, a fresh one is started, the cursor is
//! reset to the top margin and the continuation header (if any) is re-emitted.

use crate::{BlockBox, LayoutError, LayoutTree, PageBox, Point, Rect, Result};
use serde::{Deserialize, Serialize};

/// Standard page sizes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PageSize {
    /// A4 (210mm x 297mm)
    #[default]
    A4,
    /// US Letter (8.5" x 11")
    Letter,
    /// Custom size in points
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Get the width and height in points
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.276, 841.89),  // 210mm x 297mm at 72 dpi
            PageSize::Letter => (612.0, 792.0), // 8.5" x 11" at 72 dpi
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page layout configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Top margin in points
    pub margin_top: f32,
    /// Bottom margin in points
    pub margin_bottom: f32,
    /// Left margin in points
    pub margin_left: f32,
    /// Right margin in points
    pub margin_right: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageConfig {
    /// A4 page with 40pt margins
    pub fn a4() -> Self {
        Self::new(PageSize::A4, 40.0)
    }

    /// Page of the given size with the same margin on every side
    pub fn new(size: PageSize, margin: f32) -> Self {
        let (width, height) = size.dimensions();
        Self {
            page_width: width,
            page_height: height,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }

    /// Width available between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Height available between the top and bottom margins
    pub fn usable_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Y coordinate of the bottom margin line
    pub fn content_bottom(&self) -> f32 {
        self.page_height - self.margin_bottom
    }

    pub fn page_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height)
    }

    pub fn content_area(&self) -> Rect {
        Rect::new(
            self.margin_left,
            self.margin_top,
            self.content_width(),
            self.usable_height(),
        )
    }

    /// Validate that the margins leave a usable content area
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        let margins = [
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
        ];
        if margins.iter().any(|m| *m < 0.0) {
            return Err(LayoutError::InvalidPageSetup(
                "margins must not be negative".to_string(),
            ));
        }
        if self.content_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(LayoutError::InvalidPageSetup(
                "margins leave no content area".to_string(),
            ));
        }
        Ok(())
    }
}

/// The vertical write position within the current page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f32,
}

impl Cursor {
    fn at(y: f32) -> Self {
        Self { y }
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}

/// Vertical coordinate for [`PageManager::place_at`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalPosition {
    /// Absolute y from the top edge of the page
    Absolute(f32),
    /// Offset from the current cursor
    Relative(f32),
}

/// Blocks re-emitted at the top of every page after the first.
///
/// Block coordinates are relative to the top margin; `height` is the space the
/// header occupies before body content resumes.
#[derive(Debug, Clone, Default)]
pub struct ContinuationHeader {
    pub blocks: Vec<BlockBox>,
    pub height: f32,
}

/// Owns the pages being built and the layout cursor
#[derive(Debug)]
pub struct PageManager {
    config: PageConfig,
    tree: LayoutTree,
    current: PageBox,
    cursor: Cursor,
    continuation: Option<ContinuationHeader>,
}

impl PageManager {
    /// Start a document with one empty page
    pub fn new(config: PageConfig) -> Result<Self> {
        config.validate()?;
        let current = PageBox::new(0, config.page_bounds(), config.content_area());
        let cursor = Cursor::at(config.margin_top);
        Ok(Self {
            config,
            tree: LayoutTree::new(),
            current,
            cursor,
            continuation: None,
        })
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor.y
    }

    /// Index of the page currently being filled
    pub fn page_index(&self) -> usize {
        self.current.index
    }

    /// Space left between the cursor and the bottom margin
    pub fn remaining_height(&self) -> f32 {
        (self.config.content_bottom() - self.cursor.y).max(0.0)
    }

    /// Left edge of the content area
    pub fn left(&self) -> f32 {
        self.config.margin_left
    }

    /// Right edge of the content area
    pub fn right(&self) -> f32 {
        self.config.page_width - self.config.margin_right
    }

    pub fn content_width(&self) -> f32 {
        self.config.content_width()
    }

    /// Move the cursor down by `height`
    pub fn advance(&mut self, height: f32) {
        self.cursor.y += height.max(0.0);
    }

    /// Whether an element of `height` fits below the cursor on this page
    pub fn fits(&self, height: f32) -> bool {
        self.cursor.y + height <= self.config.content_bottom()
    }

    /// Whether nothing has been placed below the top of the body area yet
    fn at_page_top(&self) -> bool {
        let top = self.config.margin_top + self.continuation_height();
        self.cursor.y <= top
    }

    fn continuation_height(&self) -> f32 {
        if self.current.index == 0 {
            return 0.0;
        }
        self.continuation.as_ref().map(|c| c.height).unwrap_or(0.0)
    }

    /// Make room for an atomic element of `height`.
    ///
    /// Returns `true` when a page break happened. An element taller than a
    /// whole page is placed at the top of a fresh page and allowed to overflow
    /// rather than looping.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.fits(height) {
            return false;
        }
        if self.at_page_top() {
            tracing::debug!(
                height,
                page = self.current.index,
                "element taller than a page; placing without break"
            );
            return false;
        }
        self.new_page();
        true
    }

    /// Finalize the current page and start the next one
    pub fn new_page(&mut self) {
        let next_index = self.current.index + 1;
        let next = PageBox::new(
            next_index,
            self.config.page_bounds(),
            self.config.content_area(),
        );
        let finished = std::mem::replace(&mut self.current, next);
        self.tree.add_page(finished);
        self.cursor = Cursor::at(self.config.margin_top);

        tracing::debug!(page = next_index, "started new page");

        if let Some(header) = &self.continuation {
            let dy = self.config.margin_top;
            for block in &header.blocks {
                self.current.add_block(block.translated(0.0, dy));
            }
            self.cursor.y += header.height;
        }
    }

    /// Set or clear the header re-emitted on pages after a break
    pub fn set_continuation(&mut self, header: Option<ContinuationHeader>) {
        self.continuation = header;
    }

    /// Resolve a position for side-by-side layouts without moving the cursor
    pub fn place_at(&self, x: f32, y: VerticalPosition) -> Point {
        let y = match y {
            VerticalPosition::Absolute(y) => y,
            VerticalPosition::Relative(dy) => self.cursor.y + dy,
        };
        Point::new(x, y)
    }

    /// The page currently being filled
    pub fn page_mut(&mut self) -> &mut PageBox {
        &mut self.current
    }

    pub fn page(&self) -> &PageBox {
        &self.current
    }

    /// Register a raster image for image blocks
    pub fn add_image(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> String {
        self.tree.add_image(width, height, pixels)
    }

    /// Flush the last page and return the finished tree
    pub fn finish(mut self) -> LayoutTree {
        self.tree.add_page(self.current);
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockContent, TextStyle};

    fn small_config() -> PageConfig {
        // 200pt of usable height
        PageConfig::new(
            PageSize::Custom {
                width: 300.0,
                height: 240.0,
            },
            20.0,
        )
    }

    #[test]
    fn test_page_size_dimensions() {
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
        let (w, h) = PageSize::A4.dimensions();
        assert!((w - 595.276).abs() < 0.01);
        assert!((h - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_config_geometry() {
        let config = small_config();
        assert_eq!(config.content_width(), 260.0);
        assert_eq!(config.usable_height(), 200.0);
        assert_eq!(config.content_bottom(), 220.0);
    }

    #[test]
    fn test_invalid_margins_rejected() {
        let config = PageConfig::new(
            PageSize::Custom {
                width: 100.0,
                height: 100.0,
            },
            60.0,
        );
        assert!(matches!(
            PageManager::new(config),
            Err(LayoutError::InvalidPageSetup(_))
        ));
    }

    #[test]
    fn test_advance_and_fits() {
        let mut pm = PageManager::new(small_config()).unwrap();
        assert_eq!(pm.cursor_y(), 20.0);
        pm.advance(150.0);
        assert_eq!(pm.cursor_y(), 170.0);
        assert!(pm.fits(50.0));
        assert!(!pm.fits(50.1));
        assert_eq!(pm.remaining_height(), 50.0);
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let mut pm = PageManager::new(small_config()).unwrap();
        pm.advance(190.0);
        assert!(!pm.ensure_space(10.0));
        assert!(pm.ensure_space(20.0));
        assert_eq!(pm.page_index(), 1);
        assert_eq!(pm.cursor_y(), 20.0);
        let tree = pm.finish();
        assert_eq!(tree.page_count(), 2);
    }

    #[test]
    fn test_oversized_element_at_top_does_not_loop() {
        let mut pm = PageManager::new(small_config()).unwrap();
        assert!(!pm.ensure_space(500.0));
        assert_eq!(pm.page_index(), 0);
    }

    #[test]
    fn test_continuation_header_re_emitted() {
        let mut pm = PageManager::new(small_config()).unwrap();
        let header = ContinuationHeader {
            blocks: vec![BlockBox::new(
                Rect::new(20.0, 0.0, 100.0, 12.0),
                BlockContent::Text {
                    text: "Report (continued)".to_string(),
                    style: TextStyle::default(),
                },
            )],
            height: 16.0,
        };
        pm.set_continuation(Some(header));
        pm.advance(195.0);
        assert!(pm.ensure_space(10.0));
        assert_eq!(pm.cursor_y(), 36.0);
        assert!(pm.page().contains_text("Report (continued)"));
        assert_eq!(pm.page().blocks[0].bounds.y, 20.0);

        // A fresh continued page counts as the top; no second break
        assert!(!pm.ensure_space(400.0));
        assert_eq!(pm.page_index(), 1);
    }

    #[test]
    fn test_place_at() {
        let mut pm = PageManager::new(small_config()).unwrap();
        pm.advance(30.0);
        assert_eq!(
            pm.place_at(100.0, VerticalPosition::Relative(0.0)),
            Point::new(100.0, 50.0)
        );
        assert_eq!(
            pm.place_at(10.0, VerticalPosition::Absolute(5.0)),
            Point::new(10.0, 5.0)
        );
        // place_at never moves the cursor
        assert_eq!(pm.cursor_y(), 50.0);
    }
}
