//! Generic composer
//!
//! Interprets a [`DocumentPlan`] section by section against a
//! [`PageManager`]. Every atomic element asks for its full height before it
//! is drawn, so nothing is split across a page break.

use crate::{
    artifact_filename, Artifact, DocumentPlan, EngineSettings, Field, Formatter,
    GenerationContext, HospitalBranding, ResolvedBranding, Result, Section, TotalLine,
    NOT_AVAILABLE,
};
use layout_engine::{
    clip_text, draw_image, draw_rect, draw_rule, draw_text_line, layout_table, text_width,
    wrap_text, Align, Color, ContinuationHeader, LayoutTree, PageBox, PageManager, Point, Rect,
    Stroke, TableSpec, TextStyle,
};
use render_model::RenderConverter;
use store::{export_pdf_bytes, PdfExportOptions};

const SECTION_GAP: f32 = 10.0;
const RULE_SPACING: f32 = 18.0;
const SIGNATURE_HEIGHT: f32 = 50.0;
const SIGNATURE_GAP: f32 = 16.0;
const TOTALS_WIDTH: f32 = 220.0;

fn name_style() -> TextStyle {
    TextStyle::new(16.0).bold().with_color(Color::ACCENT)
}

fn small_style() -> TextStyle {
    TextStyle::new(9.0).with_color(Color::DARK_GRAY)
}

fn title_style() -> TextStyle {
    TextStyle::new(13.0).bold()
}

fn heading_style() -> TextStyle {
    TextStyle::new(11.0).bold()
}

fn body_style() -> TextStyle {
    TextStyle::new(10.0)
}

fn footer_style() -> TextStyle {
    TextStyle::new(8.0).italic().with_color(Color::GRAY)
}

/// Lays out and renders document plans for one hospital
#[derive(Debug, Clone)]
pub struct Composer {
    settings: EngineSettings,
    branding: ResolvedBranding,
    formatter: Formatter,
}

impl Composer {
    pub fn new(settings: EngineSettings, branding: &HospitalBranding) -> Self {
        let formatter = Formatter::from_settings(&settings);
        Self {
            settings,
            branding: branding.resolve(),
            formatter,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn branding(&self) -> &ResolvedBranding {
        &self.branding
    }

    /// Build the layout tree for a plan
    pub fn layout(&self, plan: &DocumentPlan, ctx: &GenerationContext) -> Result<LayoutTree> {
        plan.validate()?;

        let mut pm = PageManager::new(self.settings.page_config())?;
        for section in &plan.sections {
            match section {
                Section::Header => {
                    self.header(&mut pm, plan, ctx);
                    let continuation = self.continuation(&pm, plan);
                    pm.set_continuation(Some(continuation));
                }
                Section::Identity { left, right } => identity(&mut pm, left, right),
                Section::FreeText {
                    heading,
                    body,
                    ruled_lines,
                } => free_text(&mut pm, heading, body.as_deref(), *ruled_lines),
                Section::Table {
                    heading,
                    spec,
                    rows,
                } => table(&mut pm, heading.as_deref(), spec, rows)?,
                Section::Totals { lines } => totals(&mut pm, lines),
                Section::Barcode { value } => self.barcode(&mut pm, value),
                Section::Signatures { labels } => signatures(&mut pm, labels),
                Section::PageBreak { title } => {
                    pm.new_page();
                    if let Some(title) = title {
                        text_line(&mut pm, title, &title_style(), Align::Center);
                        pm.advance(SECTION_GAP);
                    }
                }
                Section::Footer => self.footer(&mut pm, ctx),
            }
        }

        let mut tree = pm.finish();
        self.number_pages(&mut tree);
        Ok(tree)
    }

    /// Lay out, render and serialise a plan to a PDF artifact
    pub fn render(&self, plan: &DocumentPlan, ctx: &GenerationContext) -> Result<Artifact> {
        let tree = self.layout(plan, ctx)?;
        let model = RenderConverter::default().convert(&tree)?;

        let options = PdfExportOptions::new()
            .with_title(format!("{} {}", plan.title(), plan.primary_id))
            .with_author(self.branding.name.clone())
            .with_subject(plan.kind.file_prefix())
            .with_creator("docgen")
            .with_creation_date(ctx.pdf_date())
            .with_compression(self.settings.compress_pdf);
        let bytes = export_pdf_bytes(&model, options)?;

        let artifact = Artifact {
            filename: artifact_filename(plan.kind, &plan.primary_id, ctx.date()),
            page_count: tree.page_count(),
            bytes,
        };
        tracing::info!(
            kind = %plan.kind,
            pages = artifact.page_count,
            bytes = artifact.bytes.len(),
            filename = %artifact.filename,
            "generated document"
        );
        Ok(artifact)
    }

    fn header(&self, pm: &mut PageManager, plan: &DocumentPlan, ctx: &GenerationContext) {
        let b = &self.branding;
        text_line(pm, &b.name, &name_style(), Align::Center);
        if let Some(subtitle) = &b.subtitle {
            text_line(pm, subtitle, &small_style().italic(), Align::Center);
        }
        text_line(pm, &b.address, &small_style(), Align::Center);
        text_line(pm, &b.contact_line(), &small_style(), Align::Center);
        if let Some(accreditation) = &b.accreditation {
            text_line(pm, accreditation, &small_style().bold(), Align::Center);
        }

        pm.advance(4.0);
        rule(pm, Stroke::new(Color::ACCENT, 1.0));
        pm.advance(8.0);

        text_line(pm, plan.title(), &title_style(), Align::Center);
        let generated = format!("Generated on: {}", self.formatter.timestamp(ctx.generated_at));
        text_line(pm, &generated, &small_style(), Align::Right);
        pm.advance(SECTION_GAP);
    }

    /// Hospital name and "<title> (continued)", relative to the top margin
    fn continuation(&self, pm: &PageManager, plan: &DocumentPlan) -> ContinuationHeader {
        let config = pm.config();
        let mut scratch = PageBox::new(0, config.page_bounds(), config.content_area());
        let style = TextStyle::new(10.0).bold();
        let left = pm.left();
        let width = pm.content_width();

        draw_text_line(&mut scratch, Point::new(left, 0.0), &self.branding.name, &style, Align::Left, Some(width));
        draw_text_line(
            &mut scratch,
            Point::new(left, 0.0),
            &format!("{} (continued)", plan.title()),
            &small_style(),
            Align::Right,
            Some(width),
        );
        let rule_y = style.line_height() + 2.0;
        draw_rule(&mut scratch, left, left + width, rule_y, Stroke::hairline());

        ContinuationHeader {
            blocks: scratch.blocks,
            height: rule_y + 8.0,
        }
    }

    fn barcode(&self, pm: &mut PageManager, value: &str) {
        let settings = &self.settings.barcode;
        let encoded = barcode::encode(value).and_then(|symbol| {
            barcode::rasterize(&symbol, &settings.raster_options()).map(|raster| (symbol, raster))
        });

        match encoded {
            Ok((symbol, raster)) => {
                let modules = symbol.module_count() + 2 * settings.quiet_zone as usize;
                let width = (modules as f32 * settings.module_width).min(pm.content_width());
                let height = settings.height;

                pm.ensure_space(height);
                let x = pm.left() + (pm.content_width() - width) / 2.0;
                let y = pm.cursor_y();
                let id = pm.add_image(raster.width, raster.height, raster.pixels);
                draw_image(pm.page_mut(), Rect::new(x, y, width, height), &id);
                pm.advance(height);
            }
            Err(e) => {
                tracing::warn!(value, error = %e, "barcode encoding failed; printing value as text");
                text_line(pm, value, &TextStyle::new(12.0).bold(), Align::Center);
            }
        }
        pm.advance(SECTION_GAP);
    }

    fn footer(&self, pm: &mut PageManager, ctx: &GenerationContext) {
        let style = footer_style();
        pm.ensure_space(6.0 + 2.0 * style.line_height());
        rule(pm, Stroke::new(Color::GRAY, 0.5));
        pm.advance(6.0);
        text_line(pm, &self.branding.tagline, &style, Align::Center);
        let printed = format!("Printed on: {}", self.formatter.timestamp(ctx.generated_at));
        text_line(pm, &printed, &style, Align::Center);
    }

    /// "Page i of n" in the bottom margin of every page
    fn number_pages(&self, tree: &mut LayoutTree) {
        let config = self.settings.page_config();
        let total = tree.pages.len();
        let style = footer_style();
        let y = config.content_bottom() + (config.margin_bottom - style.line_height()) / 2.0;

        for (i, page) in tree.pages.iter_mut().enumerate() {
            draw_text_line(
                page,
                Point::new(config.margin_left, y),
                &format!("Page {} of {}", i + 1, total),
                &style,
                Align::Center,
                Some(config.content_width()),
            );
        }
    }
}

/// One unwrapped line across the content width, paginating first
fn text_line(pm: &mut PageManager, text: &str, style: &TextStyle, align: Align) {
    let height = style.line_height();
    pm.ensure_space(height);
    let at = Point::new(pm.left(), pm.cursor_y());
    let width = pm.content_width();
    draw_text_line(pm.page_mut(), at, text, style, align, Some(width));
    pm.advance(height);
}

/// Full-width rule at the cursor
fn rule(pm: &mut PageManager, stroke: Stroke) {
    let (left, right, y) = (pm.left(), pm.right(), pm.cursor_y());
    draw_rule(pm.page_mut(), left, right, y, stroke);
}

/// Bold heading with an underline rule the width of the text
fn heading(pm: &mut PageManager, text: &str) {
    let style = heading_style();
    let (x, y) = (pm.left(), pm.cursor_y());
    let height = draw_text_line(pm.page_mut(), Point::new(x, y), text, &style, Align::Left, None);
    let underline = y + height - 1.0;
    draw_rule(pm.page_mut(), x, x + text_width(text, &style), underline, Stroke::hairline());
    pm.advance(height + 3.0);
}

fn heading_height() -> f32 {
    heading_style().line_height() + 3.0
}

/// "Label: value" with a bold label, clipped to `width`
fn field(page: &mut PageBox, x: f32, y: f32, width: f32, field: &Field) {
    let label_style = body_style().bold();
    let label = format!("{}:", field.label);
    let label_width = text_width(&label, &label_style) + 4.0;
    draw_text_line(page, Point::new(x, y), &label, &label_style, Align::Left, None);

    let value_style = body_style();
    let value = if field.value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        clip_text(&field.value, &value_style, (width - label_width).max(0.0))
    };
    draw_text_line(page, Point::new(x + label_width, y), &value, &value_style, Align::Left, None);
}

fn identity(pm: &mut PageManager, left: &[Field], right: &[Field]) {
    let height = body_style().line_height();
    let column_width = pm.content_width() / 2.0;
    let left_x = pm.left();
    let right_x = left_x + column_width;

    for i in 0..left.len().max(right.len()) {
        pm.ensure_space(height);
        let y = pm.cursor_y();
        if let Some(f) = left.get(i) {
            field(pm.page_mut(), left_x, y, column_width - 8.0, f);
        }
        if let Some(f) = right.get(i) {
            field(pm.page_mut(), right_x, y, column_width, f);
        }
        pm.advance(height);
    }

    pm.advance(4.0);
    rule(pm, Stroke::new(Color::GRAY, 0.5));
    pm.advance(SECTION_GAP);
}

fn free_text(pm: &mut PageManager, title: &str, body: Option<&str>, ruled_lines: usize) {
    let style = body_style();
    let lines = match body {
        Some(text) => wrap_text(text, &style, pm.content_width()),
        None if ruled_lines == 0 => vec![NOT_AVAILABLE.to_string()],
        None => Vec::new(),
    };

    // Keep the heading with the first line beneath it
    let first = if lines.is_empty() {
        if ruled_lines > 0 {
            RULE_SPACING
        } else {
            0.0
        }
    } else {
        style.line_height()
    };
    pm.ensure_space(heading_height() + first);
    heading(pm, title);

    for line in &lines {
        text_line(pm, line, &style, Align::Left);
    }
    for _ in 0..ruled_lines {
        pm.ensure_space(RULE_SPACING);
        pm.advance(RULE_SPACING);
        rule(pm, Stroke::new(Color::GRAY, 0.5));
    }
    pm.advance(SECTION_GAP);
}

fn table(
    pm: &mut PageManager,
    title: Option<&str>,
    spec: &TableSpec,
    rows: &[Vec<String>],
) -> Result<()> {
    if let Some(title) = title {
        pm.ensure_space(heading_height() + 2.0 * spec.row_height);
        heading(pm, title);
    }
    let outcome = layout_table(pm, spec, rows)?;
    if outcome.page_breaks > 0 {
        tracing::debug!(
            rows = rows.len(),
            page_breaks = outcome.page_breaks,
            "table continued across pages"
        );
    }
    pm.advance(SECTION_GAP);
    Ok(())
}

fn totals(pm: &mut PageManager, lines: &[TotalLine]) {
    let style = body_style();
    let block: f32 = lines
        .iter()
        .map(|l| style.line_height() + if l.emphasized { 4.0 } else { 0.0 })
        .sum();
    pm.ensure_space(block);

    let right = pm.right();
    let x = right - TOTALS_WIDTH;
    for line in lines {
        let style = if line.emphasized {
            pm.advance(2.0);
            let y = pm.cursor_y();
            draw_rule(pm.page_mut(), x, right, y, Stroke::hairline());
            pm.advance(2.0);
            body_style().bold()
        } else {
            body_style()
        };
        let y = pm.cursor_y();
        let page = pm.page_mut();
        draw_text_line(page, Point::new(x, y), &line.label, &style, Align::Left, None);
        draw_text_line(page, Point::new(right, y), &line.value, &style, Align::Right, None);
        pm.advance(style.line_height());
    }
    pm.advance(SECTION_GAP);
}

fn signatures(pm: &mut PageManager, labels: &[String]) {
    if labels.is_empty() {
        return;
    }
    let style = small_style();
    let count = labels.len() as f32;
    let width = (pm.content_width() - SIGNATURE_GAP * (count - 1.0)) / count;
    let height = SIGNATURE_HEIGHT + 4.0 + style.line_height();

    pm.ensure_space(height);
    let (left, y) = (pm.left(), pm.cursor_y());
    let page = pm.page_mut();
    for (i, label) in labels.iter().enumerate() {
        let x = left + i as f32 * (width + SIGNATURE_GAP);
        draw_rect(page, Rect::new(x, y, width, SIGNATURE_HEIGHT), None, Some(Stroke::hairline()));
        draw_text_line(
            page,
            Point::new(x, y + SIGNATURE_HEIGHT + 4.0),
            label,
            &style,
            Align::Center,
            Some(width),
        );
    }
    pm.advance(height + SECTION_GAP);
}
