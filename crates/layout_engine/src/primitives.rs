//! Primitive drawing operations
//!
//! Each primitive appends blocks to a page and returns the vertical space it
//! used. None of them touch the cursor; advancing is the caller's job.

use crate::{
    text_width, wrap_text, Align, BlockBox, BlockContent, Color, PageBox, Point, Rect, Stroke,
    TextStyle,
};

/// Left edge for a line of `width` aligned inside a box starting at `x`.
///
/// Without a box width, `x` is the anchor: the left edge, the center or the
/// right edge depending on the alignment.
fn aligned_left(x: f32, box_width: Option<f32>, width: f32, align: Align) -> f32 {
    match (align, box_width) {
        (Align::Left, _) => x,
        (Align::Center, Some(w)) => x + (w - width) / 2.0,
        (Align::Center, None) => x - width / 2.0,
        (Align::Right, Some(w)) => x + w - width,
        (Align::Right, None) => x - width,
    }
}

/// Draw a single unwrapped line of text with its line box top at `at.y`.
///
/// Returns the line height.
pub fn draw_text_line(
    page: &mut PageBox,
    at: Point,
    text: &str,
    style: &TextStyle,
    align: Align,
    box_width: Option<f32>,
) -> f32 {
    let width = text_width(text, style);
    let x = aligned_left(at.x, box_width, width, align);
    let height = style.line_height();
    page.add_block(BlockBox::new(
        Rect::new(x, at.y, width, height),
        BlockContent::Text {
            text: text.to_string(),
            style: style.clone(),
        },
    ));
    height
}

/// Draw text, word-wrapping it to `max_width` when given.
///
/// Returns the total height of all lines drawn.
pub fn draw_text(
    page: &mut PageBox,
    at: Point,
    text: &str,
    style: &TextStyle,
    align: Align,
    max_width: Option<f32>,
) -> f32 {
    let lines = match max_width {
        Some(width) => wrap_text(text, style, width),
        None => vec![text.to_string()],
    };

    let mut y = at.y;
    for line in &lines {
        y += draw_text_line(page, Point::new(at.x, y), line, style, align, max_width);
    }
    y - at.y
}

/// Height that [`draw_text`] would use, without drawing
pub fn measure_text_height(text: &str, style: &TextStyle, max_width: Option<f32>) -> f32 {
    let lines = match max_width {
        Some(width) => wrap_text(text, style, width).len(),
        None => 1,
    };
    lines as f32 * style.line_height()
}

/// Draw a straight line
pub fn draw_line(page: &mut PageBox, from: Point, to: Point, stroke: Stroke) {
    let bounds = Rect::new(
        from.x.min(to.x),
        from.y.min(to.y),
        (to.x - from.x).abs(),
        (to.y - from.y).abs(),
    );
    page.add_block(BlockBox::new(
        bounds,
        BlockContent::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke,
        },
    ));
}

/// Draw a horizontal rule from `x1` to `x2` at `y`
pub fn draw_rule(page: &mut PageBox, x1: f32, x2: f32, y: f32, stroke: Stroke) {
    draw_line(page, Point::new(x1, y), Point::new(x2, y), stroke);
}

/// Draw a filled and/or stroked rectangle
pub fn draw_rect(page: &mut PageBox, bounds: Rect, fill: Option<Color>, stroke: Option<Stroke>) {
    page.add_block(BlockBox::new(bounds, BlockContent::Rectangle { fill, stroke }));
}

/// Place a registered raster image into `bounds`
pub fn draw_image(page: &mut PageBox, bounds: Rect, resource_id: &str) {
    page.add_block(BlockBox::new(
        bounds,
        BlockContent::Image {
            resource_id: resource_id.to_string(),
        },
    ));
}
