//! Layout Engine - Page geometry, cursor, primitives and tables
//!
//! This crate builds the Document/Page/Block tree for a printable document.
//! Composers drive a [`PageManager`] which owns the layout cursor and decides
//! page breaks; the finished [`LayoutTree`] is handed to the render model.

mod error;
mod layout_tree;
mod metrics;
mod paginator;
mod primitives;
mod style;
mod table_layout;

pub use error::*;
pub use layout_tree::*;
pub use metrics::*;
pub use paginator::*;
pub use primitives::*;
pub use style::*;
pub use table_layout::*;
