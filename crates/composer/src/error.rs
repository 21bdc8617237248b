//! Composer error types

use thiserror::Error;

/// Document composition errors
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("Layout error: {0}")]
    Layout(#[from] layout_engine::LayoutError),

    #[error("Render error: {0}")]
    Render(#[from] render_model::RenderError),

    #[error("PDF error: {0}")]
    Pdf(#[from] store::PdfError),

    #[error("Billing error: {0}")]
    Billing(#[from] billing::BillingError),

    #[error("Invalid document plan: {0}")]
    InvalidPlan(String),

    #[error("Case number sequence error: {0}")]
    Sequence(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ComposeError>;
