//! Writing finished artifacts to disk

use crate::{PdfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write `bytes` to `dir/filename`, creating the directory if needed.
///
/// The bytes go to a temporary sibling first and are renamed into place, so
/// a reader never sees a half-written file.
pub fn save_artifact(dir: impl AsRef<Path>, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    if filename.is_empty() || filename.contains(['/', '\\']) {
        return Err(PdfError::InvalidDocument(format!(
            "invalid artifact filename: {:?}",
            filename
        )));
    }

    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(filename);
    let tmp = dir.join(format!(".{}.tmp", filename));
    fs::write(&tmp, bytes)?;
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved artifact");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let path = save_artifact(&out, "LabReport_P1_2024-01-02.pdf", b"%PDF-1.4").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
        assert!(!out.join(".LabReport_P1_2024-01-02.pdf.tmp").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        save_artifact(dir.path(), "a.pdf", b"one").unwrap();
        let path = save_artifact(dir.path(), "a.pdf", b"two").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"two");
    }

    #[test]
    fn test_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_artifact(dir.path(), "../escape.pdf", b"x").is_err());
        assert!(save_artifact(dir.path(), "", b"x").is_err());
    }
}
