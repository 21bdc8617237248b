//! Table Layout Algorithm
//!
//! This module lays out fixed-width tables onto pages:
//! - Column edges from prefix sums of absolute widths
//! - Header row with filled background, optionally repeated after page breaks
//! - Vertical separators at every column boundary
//! - Per-column cell alignment
//! - Clip or grow handling for cell text wider than its column
//! - Rows are atomic: a row is never split across two pages

use crate::{
    clip_text, draw_line, draw_rect, draw_text_line, wrap_text, Align, Color, LayoutError,
    PageManager, Point, Rect, Result, Stroke, TextStyle,
};
use serde::{Deserialize, Serialize};

/// A table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    /// Absolute width in points
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f32, align: Align) -> Self {
        Self {
            header: header.into(),
            width,
            align,
        }
    }

    pub fn left(header: impl Into<String>, width: f32) -> Self {
        Self::new(header, width, Align::Left)
    }

    pub fn center(header: impl Into<String>, width: f32) -> Self {
        Self::new(header, width, Align::Center)
    }

    pub fn right(header: impl Into<String>, width: f32) -> Self {
        Self::new(header, width, Align::Right)
    }
}

/// What to do with cell text wider than its column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellOverflow {
    /// Truncate with an ellipsis; every row keeps the table's row height
    #[default]
    Clip,
    /// Wrap the text and grow the row to fit the tallest cell
    Grow,
}

/// Table definition: columns plus presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<Column>,
    /// Height of the header row and the minimum height of data rows
    pub row_height: f32,
    /// Re-emit the header row at the top of every continued page
    pub repeat_header: bool,
    pub overflow: CellOverflow,
    pub header_style: TextStyle,
    pub cell_style: TextStyle,
    pub header_fill: Color,
    pub border: Stroke,
    /// Horizontal and vertical padding inside each cell
    pub cell_padding: f32,
}

impl TableSpec {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            row_height: 18.0,
            repeat_header: true,
            overflow: CellOverflow::Clip,
            header_style: TextStyle::new(9.0).bold(),
            cell_style: TextStyle::new(9.0),
            header_fill: Color::LIGHT_GRAY,
            border: Stroke::hairline(),
            cell_padding: 3.0,
        }
    }

    pub fn with_row_height(mut self, height: f32) -> Self {
        self.row_height = height;
        self
    }

    pub fn with_repeat_header(mut self, repeat: bool) -> Self {
        self.repeat_header = repeat;
        self
    }

    pub fn with_overflow(mut self, overflow: CellOverflow) -> Self {
        self.overflow = overflow;
        self
    }

    /// Sum of all column widths
    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// X coordinate of every column boundary, starting at `left`.
    ///
    /// Returns `columns.len() + 1` edges.
    pub fn column_edges(&self, left: f32) -> Vec<f32> {
        let mut edges = Vec::with_capacity(self.columns.len() + 1);
        let mut x = left;
        edges.push(x);
        for column in &self.columns {
            x += column.width;
            edges.push(x);
        }
        edges
    }

    /// Check the spec against the available content width
    pub fn validate(&self, content_width: f32) -> Result<()> {
        if self.columns.is_empty() {
            return Err(LayoutError::InvalidTable("table has no columns".to_string()));
        }
        if self.row_height <= 0.0 {
            return Err(LayoutError::InvalidTable(format!(
                "row height must be positive, got {}",
                self.row_height
            )));
        }
        if let Some(column) = self.columns.iter().find(|c| c.width <= 0.0) {
            return Err(LayoutError::InvalidTable(format!(
                "column '{}' has non-positive width {}",
                column.header, column.width
            )));
        }
        // Allow for float noise when widths are derived from the page width
        if self.total_width() > content_width + 0.01 {
            return Err(LayoutError::InvalidTable(format!(
                "columns total {:.2}pt but only {:.2}pt is available",
                self.total_width(),
                content_width
            )));
        }
        Ok(())
    }
}

/// Where a laid-out table ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableOutcome {
    /// Cursor y after the last row
    pub end_y: f32,
    /// Number of page breaks the table caused
    pub page_breaks: usize,
}

/// Lay out a table at the current cursor, paginating row by row
pub fn layout_table(pm: &mut PageManager, spec: &TableSpec, rows: &[Vec<String>]) -> Result<TableOutcome> {
    spec.validate(pm.content_width())?;
    if let Some((index, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != spec.columns.len())
    {
        return Err(LayoutError::InvalidTable(format!(
            "row {} has {} cells but the table has {} columns",
            index,
            row.len(),
            spec.columns.len()
        )));
    }

    let mut page_breaks = 0;
    let first_row_height = rows.first().map(|r| row_height(spec, r)).unwrap_or(0.0);

    // Keep the header together with the first data row
    if pm.ensure_space(spec.row_height + first_row_height) {
        page_breaks += 1;
    }
    draw_header(pm, spec);

    for row in rows {
        let height = row_height(spec, row);
        if pm.ensure_space(height) {
            page_breaks += 1;
            if spec.repeat_header {
                draw_header(pm, spec);
            }
        }
        draw_row(pm, spec, row, height);
    }

    Ok(TableOutcome {
        end_y: pm.cursor_y(),
        page_breaks,
    })
}

/// Height of a data row under the table's overflow policy
pub fn row_height(spec: &TableSpec, row: &[String]) -> f32 {
    match spec.overflow {
        CellOverflow::Clip => spec.row_height,
        CellOverflow::Grow => {
            let tallest = row
                .iter()
                .zip(&spec.columns)
                .map(|(cell, column)| {
                    let lines = wrap_text(cell, &spec.cell_style, inner_width(spec, column)).len();
                    lines as f32 * spec.cell_style.line_height() + 2.0 * spec.cell_padding
                })
                .fold(0.0, f32::max);
            tallest.max(spec.row_height)
        }
    }
}

fn inner_width(spec: &TableSpec, column: &Column) -> f32 {
    (column.width - 2.0 * spec.cell_padding).max(0.0)
}

fn draw_header(pm: &mut PageManager, spec: &TableSpec) {
    let cells: Vec<String> = spec.columns.iter().map(|c| c.header.clone()).collect();
    draw_cells(pm, spec, &cells, spec.row_height, &spec.header_style, Some(spec.header_fill), true);
}

fn draw_row(pm: &mut PageManager, spec: &TableSpec, row: &[String], height: f32) {
    draw_cells(pm, spec, row, height, &spec.cell_style, None, false);
}

fn draw_cells(
    pm: &mut PageManager,
    spec: &TableSpec,
    cells: &[String],
    height: f32,
    style: &TextStyle,
    fill: Option<Color>,
    is_header: bool,
) {
    let top = pm.cursor_y();
    let edges = spec.column_edges(pm.left());
    let width = spec.total_width();
    let page = pm.page_mut();

    draw_rect(page, Rect::new(edges[0], top, width, height), fill, Some(spec.border));
    for x in &edges[1..edges.len() - 1] {
        draw_line(page, Point::new(*x, top), Point::new(*x, top + height), spec.border);
    }

    for ((cell, column), left) in cells.iter().zip(&spec.columns).zip(&edges) {
        let inner = inner_width(spec, column);
        let x = left + spec.cell_padding;
        let align = if is_header { Align::Center } else { column.align };

        match spec.overflow {
            CellOverflow::Grow if !is_header => {
                let mut y = top + spec.cell_padding;
                for line in wrap_text(cell, style, inner) {
                    y += draw_text_line(page, Point::new(x, y), &line, style, align, Some(inner));
                }
            }
            _ => {
                let text = clip_text(cell, style, inner);
                if text != *cell {
                    tracing::debug!(column = %column.header, "clipped cell text");
                }
                let y = top + (height - style.line_height()) / 2.0;
                draw_text_line(page, Point::new(x, y), &text, style, align, Some(inner));
            }
        }
    }

    pm.advance(height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockContent, PageConfig, PageSize};
    use proptest::prelude::*;

    /// 260pt wide, 200pt tall content area
    fn config() -> PageConfig {
        PageConfig::new(
            PageSize::Custom {
                width: 300.0,
                height: 240.0,
            },
            20.0,
        )
    }

    fn full_width_spec() -> TableSpec {
        TableSpec::new(vec![
            Column::left("Medicine", 140.0),
            Column::center("Qty", 40.0),
            Column::right("Amount", 80.0),
        ])
        .with_row_height(20.0)
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("Item {}", i), "1".to_string(), format!("{}.00", i)])
            .collect()
    }

    #[test]
    fn test_column_edges_are_prefix_sums() {
        let spec = full_width_spec();
        assert_eq!(spec.column_edges(20.0), vec![20.0, 160.0, 200.0, 280.0]);
        assert_eq!(spec.total_width(), 260.0);
    }

    #[test]
    fn test_widths_exceeding_content_rejected() {
        let spec = TableSpec::new(vec![Column::left("A", 200.0), Column::left("B", 100.0)]);
        let mut pm = PageManager::new(config()).unwrap();
        assert!(matches!(
            layout_table(&mut pm, &spec, &[]),
            Err(LayoutError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_row_length_mismatch_rejected() {
        let spec = full_width_spec();
        let mut pm = PageManager::new(config()).unwrap();
        let bad = vec![vec!["only one".to_string()]];
        assert!(layout_table(&mut pm, &spec, &bad).is_err());
    }

    #[test]
    fn test_single_page_table() {
        let spec = full_width_spec();
        let mut pm = PageManager::new(config()).unwrap();
        let outcome = layout_table(&mut pm, &spec, &rows(3)).unwrap();
        assert_eq!(outcome.page_breaks, 0);
        // header + three rows
        assert_eq!(outcome.end_y, 20.0 + 4.0 * 20.0);
        let tree = pm.finish();
        assert_eq!(tree.page_count(), 1);
        assert!(tree.pages[0].contains_text("Medicine"));
        assert!(tree.pages[0].contains_text("Item 2"));
    }

    #[test]
    fn test_pagination_page_count() {
        // 200pt usable / 20pt rows = 10 rows per page.
        // Header + 29 rows = 600pt = exactly 3 pages.
        let spec = full_width_spec().with_repeat_header(false);
        let mut pm = PageManager::new(config()).unwrap();
        let outcome = layout_table(&mut pm, &spec, &rows(29)).unwrap();
        let tree = pm.finish();

        let total_height = 30.0 * 20.0;
        let usable = config().usable_height();
        let expected = (total_height / usable).ceil() as usize;
        assert_eq!(tree.page_count(), expected);
        assert_eq!(outcome.page_breaks, 2);
    }

    #[test]
    fn test_header_repeated_on_new_page() {
        let spec = full_width_spec();
        let mut pm = PageManager::new(config()).unwrap();
        layout_table(&mut pm, &spec, &rows(15)).unwrap();
        let tree = pm.finish();
        assert_eq!(tree.page_count(), 2);
        assert!(tree.pages[0].contains_text("Medicine"));
        assert!(tree.pages[1].contains_text("Medicine"));
        assert_eq!(tree.find_text("Item 14"), Some(1));
    }

    #[test]
    fn test_header_not_orphaned() {
        let spec = full_width_spec();
        let mut pm = PageManager::new(config()).unwrap();
        // Room for the header but not the first row
        pm.advance(170.0);
        layout_table(&mut pm, &spec, &rows(1)).unwrap();
        let tree = pm.finish();
        assert_eq!(tree.page_count(), 2);
        assert!(!tree.pages[0].contains_text("Medicine"));
        assert!(tree.pages[1].contains_text("Medicine"));
    }

    #[test]
    fn test_clip_overflow() {
        let spec = TableSpec::new(vec![Column::left("Medicine", 60.0)]);
        let mut pm = PageManager::new(config()).unwrap();
        let long = vec![vec!["Amoxicillin and Clavulanate Potassium".to_string()]];
        layout_table(&mut pm, &spec, &long).unwrap();
        let tree = pm.finish();
        assert!(tree.pages[0].texts().any(|t| t.ends_with("...")));
    }

    #[test]
    fn test_grow_overflow_increases_row_height() {
        let spec = TableSpec::new(vec![Column::left("Notes", 60.0)])
            .with_row_height(18.0)
            .with_overflow(CellOverflow::Grow);
        let row = vec!["Take one tablet twice daily after meals".to_string()];
        let height = row_height(&spec, &row);
        assert!(height > 18.0);

        let mut pm = PageManager::new(config()).unwrap();
        let outcome = layout_table(&mut pm, &spec, &[row]).unwrap();
        assert_eq!(outcome.end_y, 20.0 + 18.0 + height);
        let tree = pm.finish();
        assert!(tree.pages[0].texts().all(|t| !t.ends_with("...")));
    }

    #[test]
    fn test_vertical_separators_at_interior_edges() {
        let spec = full_width_spec();
        let mut pm = PageManager::new(config()).unwrap();
        layout_table(&mut pm, &spec, &[]).unwrap();
        let tree = pm.finish();
        let xs: Vec<f32> = tree.pages[0]
            .blocks
            .iter()
            .filter_map(|b| match b.content {
                BlockContent::Line { x1, x2, .. } if x1 == x2 => Some(x1),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![160.0, 200.0]);
    }

    proptest! {
        #[test]
        fn prop_no_row_spans_two_pages(
            n in 0usize..80,
            row_h in 8.0f32..60.0,
            offset in 0.0f32..150.0,
        ) {
            let spec = full_width_spec().with_row_height(row_h);
            let mut pm = PageManager::new(config()).unwrap();
            pm.advance(offset);
            layout_table(&mut pm, &spec, &rows(n)).unwrap();
            let tree = pm.finish();
            let bottom = config().content_bottom();
            for page in &tree.pages {
                for block in &page.blocks {
                    prop_assert!(block.bounds.bottom() <= bottom + 0.01);
                }
            }
        }
    }
}
