//! Store - PDF output and artifact files
//!
//! This crate serializes a render model into PDF bytes and writes finished
//! artifacts to disk.

mod artifact;
mod error;
pub mod pdf;

pub use artifact::*;
pub use error::*;
pub use pdf::{export_pdf, export_pdf_bytes, validate_model, PdfExportOptions};
