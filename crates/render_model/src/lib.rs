//! Render Model - Layout to render conversion
//!
//! This crate converts a finished layout tree into flat, per-page lists of
//! render items that an output backend can draw in a single pass.

mod converter;
mod error;
mod render_item;

pub use converter::*;
pub use error::*;
pub use render_item::*;
