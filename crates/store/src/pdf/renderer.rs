//! Render Model to PDF Conversion
//!
//! Turns render model pages into content streams. Render coordinates have a
//! top-left origin; PDF user space starts bottom-left, so every y is flipped
//! against the page height.

use super::content::ContentStream;
use super::fonts::FontManager;
use super::images::ImageManager;
use crate::{PdfError, Result};
use render_model::{Color, PageRender, Rect, RenderItem, StrokeStyle, TextRun};

/// PDF page renderer
pub struct PdfRenderer<'a> {
    font_manager: FontManager,
    images: &'a ImageManager,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(images: &'a ImageManager) -> Self {
        Self {
            font_manager: FontManager::new(),
            images,
        }
    }

    /// Fonts used by every page rendered so far
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }

    /// Render a page to a content stream.
    ///
    /// Graphics are painted first in item order, text on top of them.
    pub fn render_page(&mut self, page: &PageRender) -> Result<ContentStream> {
        let mut content = ContentStream::new();
        let height = page.height;
        let mut texts: Vec<&TextRun> = Vec::new();

        for item in &page.items {
            match item {
                RenderItem::TextRun(run) => texts.push(run),
                RenderItem::Rectangle {
                    bounds,
                    fill,
                    stroke,
                } => render_rectangle(&mut content, bounds, *fill, *stroke, height),
                RenderItem::Line { from, to, stroke } => {
                    let (r, g, b) = stroke.color.unit();
                    content
                        .save_state()
                        .set_stroke_rgb(r, g, b)
                        .set_line_width(stroke.width)
                        .move_to(from.x, height - from.y)
                        .line_to(to.x, height - to.y)
                        .stroke()
                        .restore_state();
                }
                RenderItem::Image(image) => {
                    let name = self.images.resource_name(&image.resource_id).ok_or_else(|| {
                        PdfError::InvalidDocument(format!(
                            "page {} references unknown image {}",
                            page.page_index, image.resource_id
                        ))
                    })?;
                    let b = image.bounds;
                    content
                        .save_state()
                        .transform(b.width, 0.0, 0.0, b.height, b.x, height - b.y - b.height)
                        .draw_xobject(name)
                        .restore_state();
                }
            }
        }

        if !texts.is_empty() {
            self.render_texts(&mut content, &texts, height);
        }
        Ok(content)
    }

    fn render_texts(&mut self, content: &mut ContentStream, texts: &[&TextRun], height: f64) {
        content.begin_text();
        let mut current_font: Option<(String, f64)> = None;
        let mut current_color: Option<Color> = None;

        for run in texts {
            let font = &run.font;
            let name = self
                .font_manager
                .resource_name(&font.family, font.bold, font.italic)
                .to_string();
            let font_changed = match &current_font {
                Some((current, size)) => *current != name || *size != font.size,
                None => true,
            };
            if font_changed {
                content.set_font(&name, font.size);
                current_font = Some((name, font.size));
            }

            if current_color != Some(run.color) {
                let (r, g, b) = run.color.unit();
                content.set_fill_rgb(r, g, b);
                current_color = Some(run.color);
            }

            content
                .set_text_matrix(1.0, 0.0, 0.0, 1.0, run.origin.x, height - run.origin.y)
                .show_text(&run.text);
        }
        content.end_text();
    }
}

fn render_rectangle(
    content: &mut ContentStream,
    bounds: &Rect,
    fill: Option<Color>,
    stroke: Option<StrokeStyle>,
    page_height: f64,
) {
    content.save_state();
    if let Some(fill) = fill {
        let (r, g, b) = fill.unit();
        content.set_fill_rgb(r, g, b);
    }
    if let Some(stroke) = stroke {
        let (r, g, b) = stroke.color.unit();
        content.set_stroke_rgb(r, g, b).set_line_width(stroke.width);
    }
    content.rect(
        bounds.x,
        page_height - bounds.y - bounds.height,
        bounds.width,
        bounds.height,
    );
    match (fill.is_some(), stroke.is_some()) {
        (true, true) => content.fill_and_stroke(),
        (true, false) => content.fill(),
        (false, true) => content.stroke(),
        (false, false) => content.end_path(),
    };
    content.restore_state();
}
