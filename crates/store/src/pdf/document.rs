//! PDF Document Structure
//!
//! Catalog, page tree and information dictionary.

use super::objects::{PdfDictionary, PdfObject};
use super::options::PdfExportOptions;

/// PDF version written in the file header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PdfVersion {
    /// PDF 1.4 (Acrobat 5)
    #[default]
    V1_4,
    /// PDF 1.7 (Acrobat 8)
    V1_7,
}

impl PdfVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_7 => "1.7",
        }
    }
}

/// PDF document information
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// PDF date string (`D:YYYYMMDDHHmmSS`)
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    pub fn from_options(options: &PdfExportOptions) -> Self {
        Self {
            title: options.title.clone(),
            author: options.author.clone(),
            subject: options.subject.clone(),
            keywords: options.keywords.clone(),
            creator: options.creator.clone(),
            producer: Some(format!("docgen {}", env!("CARGO_PKG_VERSION"))),
            creation_date: options.creation_date.clone(),
        }
    }

    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::new();
        let text_entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
        ];
        for (key, value) in text_entries {
            if let Some(value) = value {
                dict.insert(key, PdfObject::String(super::content::encode_win_ansi(value)));
            }
        }
        if !self.keywords.is_empty() {
            dict.insert("Keywords", PdfObject::text(&self.keywords.join(", ")));
        }
        dict
    }
}

/// Document catalog pointing at the page tree
pub fn create_catalog(pages_ref: u32) -> PdfDictionary {
    let mut catalog = PdfDictionary::typed("Catalog");
    catalog.insert("Pages", PdfObject::reference(pages_ref));
    catalog
}

/// Flat page tree over all page objects
pub fn create_pages(page_refs: &[u32]) -> PdfDictionary {
    let mut pages = PdfDictionary::typed("Pages");
    pages.insert(
        "Kids",
        PdfObject::Array(page_refs.iter().map(|r| PdfObject::reference(*r)).collect()),
    );
    pages.insert("Count", page_refs.len() as i64);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_dictionary() {
        let options = PdfExportOptions::new()
            .with_title("Lab Report")
            .with_keywords(vec!["lab".into(), "report".into()]);
        let dict = DocumentInfo::from_options(&options).to_dictionary();
        assert_eq!(dict.get("Title"), Some(&PdfObject::text("Lab Report")));
        assert_eq!(dict.get("Keywords"), Some(&PdfObject::text("lab, report")));
        assert!(dict.get("Author").is_none());
        assert!(dict.get("Producer").is_some());
    }

    #[test]
    fn test_page_tree() {
        let pages = create_pages(&[4, 6]);
        assert_eq!(pages.get("Count"), Some(&PdfObject::Integer(2)));
        assert_eq!(
            pages.get("Kids"),
            Some(&PdfObject::Array(vec![PdfObject::reference(4), PdfObject::reference(6)]))
        );
    }
}
