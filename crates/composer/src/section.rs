//! Declarative document plans
//!
//! A [`DocumentPlan`] is the ordered list of sections one document kind
//! prints. Every plan follows the same shape:
//!
//! ```text
//! Header -> Identity -> Body* -> (Totals -> Barcode)? -> Footer
//! ```
//!
//! where body sections are free text, tables, signature boxes and page
//! breaks. Billing kinds must include totals and barcode; the others must not.

use crate::{ComposeError, DocumentKind, Result};
use layout_engine::TableSpec;
use serde::{Deserialize, Serialize};

/// A label/value pair in an identity block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One line of a totals block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalLine {
    pub label: String,
    pub value: String,
    /// Printed bold with a rule above
    #[serde(default)]
    pub emphasized: bool,
}

impl TotalLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(mut self) -> Self {
        self.emphasized = true;
        self
    }
}

/// A section of a document plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Section {
    /// Branding, document title and generated-on timestamp
    Header,
    /// Two-column metadata block
    Identity { left: Vec<Field>, right: Vec<Field> },
    /// Heading with an underline rule, then wrapped text and optional blank
    /// ruled lines for handwriting
    FreeText {
        heading: String,
        body: Option<String>,
        #[serde(default)]
        ruled_lines: usize,
    },
    Table {
        heading: Option<String>,
        spec: TableSpec,
        rows: Vec<Vec<String>>,
    },
    Totals { lines: Vec<TotalLine> },
    /// Barcode of `value`, or the plain value when it cannot be encoded
    Barcode { value: String },
    /// Signature boxes side by side, one per label
    Signatures { labels: Vec<String> },
    /// Start a new page; `title` is printed at its top
    PageBreak { title: Option<String> },
    Footer,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Identity { .. } => "identity",
            Section::FreeText { .. } => "freeText",
            Section::Table { .. } => "table",
            Section::Totals { .. } => "totals",
            Section::Barcode { .. } => "barcode",
            Section::Signatures { .. } => "signatures",
            Section::PageBreak { .. } => "pageBreak",
            Section::Footer => "footer",
        }
    }

    fn is_body(&self) -> bool {
        matches!(
            self,
            Section::FreeText { .. }
                | Section::Table { .. }
                | Section::Signatures { .. }
                | Section::PageBreak { .. }
        )
    }
}

/// Position in the plan state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    Header,
    Identity,
    Body,
    Totals,
    Barcode,
    Footer,
}

impl Stage {
    fn next(self, section: &Section) -> Option<Stage> {
        use Stage::*;
        match (self, section) {
            (Start, Section::Header) => Some(Header),
            (Header, Section::Identity { .. }) => Some(Identity),
            (Identity | Body, s) if s.is_body() => Some(Body),
            (Identity | Body, Section::Totals { .. }) => Some(Totals),
            (Totals, Section::Barcode { .. }) => Some(Barcode),
            (Identity | Body | Barcode, Section::Footer) => Some(Footer),
            _ => None,
        }
    }
}

/// The sections of one document, in print order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPlan {
    pub kind: DocumentKind,
    /// Identifier used in the file name
    pub primary_id: String,
    pub sections: Vec<Section>,
}

impl DocumentPlan {
    pub fn new(kind: DocumentKind, primary_id: impl Into<String>) -> Self {
        Self {
            kind,
            primary_id: primary_id.into(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    /// Check section order and the billing rules for this kind
    pub fn validate(&self) -> Result<()> {
        let mut stage = Stage::Start;
        let mut has_totals = false;

        for (index, section) in self.sections.iter().enumerate() {
            if matches!(section, Section::Totals { .. } | Section::Barcode { .. })
                && !self.kind.is_billing()
            {
                return Err(ComposeError::InvalidPlan(format!(
                    "{} cannot contain a {} section",
                    self.kind,
                    section.name()
                )));
            }
            has_totals |= matches!(section, Section::Totals { .. });

            stage = stage.next(section).ok_or_else(|| {
                ComposeError::InvalidPlan(format!(
                    "{}: unexpected {} section at position {}",
                    self.kind,
                    section.name(),
                    index
                ))
            })?;
        }

        if stage != Stage::Footer {
            return Err(ComposeError::InvalidPlan(format!(
                "{}: plan must end with a footer",
                self.kind
            )));
        }
        if self.kind.is_billing() && !has_totals {
            return Err(ComposeError::InvalidPlan(format!(
                "{} requires totals and barcode sections",
                self.kind
            )));
        }
        Ok(())
    }
}
