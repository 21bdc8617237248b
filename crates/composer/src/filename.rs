//! Artifact file names

use crate::DocumentKind;
use chrono::NaiveDate;

/// Keep `[A-Za-z0-9_-]`, replacing anything else with `-`
pub fn sanitize_identifier(id: &str) -> String {
    let cleaned: String = id
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// `<Kind>_<Identifier>_<YYYY-MM-DD>.pdf`
pub fn artifact_filename(kind: DocumentKind, id: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.pdf",
        kind.file_prefix(),
        sanitize_identifier(id),
        date.format("%Y-%m-%d")
    )
}
