//! PDF Export Public API

use super::options::PdfExportOptions;
use super::writer::PdfDocumentWriter;
use crate::{PdfError, Result};
use render_model::RenderModel;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Export a render model to a PDF file
///
/// # Example
///
/// ```ignore
/// use store::pdf::{export_pdf, PdfExportOptions};
///
/// let options = PdfExportOptions::new().with_title("Lab Report");
/// export_pdf(&model, "LabReport_P001_2024-03-05.pdf", options)?;
/// ```
pub fn export_pdf(
    model: &RenderModel,
    path: impl AsRef<Path>,
    options: PdfExportOptions,
) -> Result<()> {
    validate_model(model)?;
    let writer = BufWriter::new(File::create(path)?);
    PdfDocumentWriter::new(options).write(model, writer)
}

/// Export a render model to PDF bytes in memory
pub fn export_pdf_bytes(model: &RenderModel, options: PdfExportOptions) -> Result<Vec<u8>> {
    validate_model(model)?;
    PdfDocumentWriter::new(options).write_to_bytes(model)
}

/// Validate that a render model can be exported to PDF
pub fn validate_model(model: &RenderModel) -> Result<()> {
    if model.pages.is_empty() {
        return Err(PdfError::InvalidDocument("No pages to export".to_string()));
    }

    for (i, page) in model.pages.iter().enumerate() {
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(PdfError::InvalidDocument(format!(
                "Page {} has invalid size: {}x{}",
                i, page.width, page.height
            )));
        }
    }
    Ok(())
}
