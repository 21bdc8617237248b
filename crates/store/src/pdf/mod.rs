//! PDF Export Module
//!
//! Serializes a render model into a PDF file.
//!
//! # Architecture
//!
//! - `objects`: PDF object model (Dictionary, Array, Stream, Reference)
//! - `document`: Catalog, page tree and info dictionary
//! - `content`: Content stream generation (text, graphics operators)
//! - `fonts`: Standard font selection
//! - `images`: Grayscale image XObjects
//! - `renderer`: Converts render pages to content streams
//! - `options`: PDF export configuration
//! - `api`: Public API for PDF export

mod api;
mod content;
mod document;
mod fonts;
mod images;
mod objects;
mod options;
mod renderer;
mod writer;

pub use api::*;
pub use content::{encode_win_ansi, encode_win_ansi_counted};
pub use options::*;
pub use writer::PdfDocumentWriter;
