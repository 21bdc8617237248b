//! Error types for render model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Image resource not found: {0}")]
    MissingImage(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
