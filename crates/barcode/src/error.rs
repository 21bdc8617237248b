//! Error types for barcode encoding and decoding

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("Nothing to encode")]
    Empty,

    #[error("Character {ch:?} at position {position} cannot be encoded")]
    UnsupportedCharacter { ch: char, position: usize },

    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    #[error("Malformed symbol: {0}")]
    MalformedSymbol(String),

    #[error("Checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: u8, found: u8 },
}

pub type Result<T> = std::result::Result<T, BarcodeError>;
