//! Composer - Hospital document generation
//!
//! A [`DocumentRequest`] is turned into a declarative [`DocumentPlan`] by the
//! builder for its kind, then the generic [`Composer`] lays the plan out on
//! pages and renders it to a PDF [`Artifact`].
//!
//! ```text
//! request -> plan -> LayoutTree -> RenderModel -> PDF bytes
//! ```

mod artifact;
mod branding;
mod composer;
mod context;
mod error;
mod filename;
mod format;
mod kind;
pub mod plans;
pub mod records;
mod request;
mod section;
mod sequence;
mod settings;

pub use artifact::*;
pub use branding::*;
pub use composer::*;
pub use context::*;
pub use error::*;
pub use filename::*;
pub use format::*;
pub use kind::*;
pub use request::*;
pub use section::*;
pub use sequence::*;
pub use settings::*;

#[cfg(test)]
mod tests;
