//! Generated artifacts

use crate::Result;
use std::path::{Path, PathBuf};

/// A rendered document ready to save or return
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `<Kind>_<Identifier>_<YYYY-MM-DD>.pdf`
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl Artifact {
    /// Write the artifact into `dir`, returning the saved path
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        Ok(store::save_artifact(dir, &self.filename, &self.bytes)?)
    }
}
