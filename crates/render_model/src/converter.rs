//! Convert layout tree to render model

use crate::{
    Color, FontSpec, ImagePlacement, PageRender, Point, Rect, RenderError, RenderImage,
    RenderItem, RenderModel, Result, StrokeStyle, TextRun,
};
use layout_engine::{BlockBox, BlockContent, LayoutTree, PageBox};

/// Configuration for render conversion
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Background painted under every page, if any
    pub page_background: Option<Color>,
    /// Baseline position as a fraction of the font size below the line top
    pub baseline_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_background: None,
            baseline_ratio: 0.8,
        }
    }
}

/// Converts layout tree to render model
pub struct RenderConverter {
    config: RenderConfig,
}

impl RenderConverter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Convert a layout tree to a render model
    pub fn convert(&self, layout: &LayoutTree) -> Result<RenderModel> {
        if layout.pages.is_empty() {
            return Err(RenderError::InvalidLayout("layout has no pages".to_string()));
        }

        let mut model = RenderModel::new();
        for page in &layout.pages {
            model.add_page(self.convert_page(page, layout)?);
        }

        model.images = layout
            .images
            .iter()
            .map(|img| RenderImage {
                id: img.id.clone(),
                width: img.width,
                height: img.height,
                pixels: img.pixels.clone(),
            })
            .collect();

        tracing::debug!(
            pages = model.pages.len(),
            images = model.images.len(),
            "converted layout to render model"
        );
        Ok(model)
    }

    fn convert_page(&self, page: &PageBox, layout: &LayoutTree) -> Result<PageRender> {
        let mut page_render = PageRender {
            page_index: page.index as u32,
            width: page.bounds.width as f64,
            height: page.bounds.height as f64,
            items: Vec::with_capacity(page.blocks.len() + 1),
        };

        if let Some(background) = self.config.page_background {
            page_render.items.push(RenderItem::Rectangle {
                bounds: Rect::from(page.bounds),
                fill: Some(background),
                stroke: None,
            });
        }

        for block in &page.blocks {
            page_render.items.push(self.convert_block(block, layout)?);
        }
        Ok(page_render)
    }

    fn convert_block(&self, block: &BlockBox, layout: &LayoutTree) -> Result<RenderItem> {
        let item = match &block.content {
            BlockContent::Text { text, style } => {
                let size = style.size as f64;
                // The block top is the line box top; leading is split evenly
                let leading = (style.line_height() - style.size) as f64 / 2.0;
                let mut font = FontSpec::new(style.family.name(), size);
                font.bold = style.is_bold();
                font.italic = style.italic;
                RenderItem::TextRun(TextRun {
                    text: text.clone(),
                    font,
                    color: style.color.into(),
                    origin: Point::new(
                        block.bounds.x as f64,
                        block.bounds.y as f64 + leading + size * self.config.baseline_ratio,
                    ),
                })
            }
            BlockContent::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
            } => RenderItem::Line {
                from: Point::new(*x1 as f64, *y1 as f64),
                to: Point::new(*x2 as f64, *y2 as f64),
                stroke: StrokeStyle::from(*stroke),
            },
            BlockContent::Rectangle { fill, stroke } => RenderItem::Rectangle {
                bounds: Rect::from(block.bounds),
                fill: fill.map(Color::from),
                stroke: stroke.map(StrokeStyle::from),
            },
            BlockContent::Image { resource_id } => {
                if layout.image(resource_id).is_none() {
                    return Err(RenderError::MissingImage(resource_id.clone()));
                }
                RenderItem::Image(ImagePlacement::new(
                    resource_id.clone(),
                    Rect::from(block.bounds),
                ))
            }
        };
        Ok(item)
    }
}

impl Default for RenderConverter {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
