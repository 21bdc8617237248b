//! Document kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every document the engine can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    PharmacyInvoice,
    PrescriptionBill,
    ConsultationCard,
    LabReport,
    DischargeSummary,
    SurgicalCaseSheet,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::PharmacyInvoice,
        DocumentKind::PrescriptionBill,
        DocumentKind::ConsultationCard,
        DocumentKind::LabReport,
        DocumentKind::DischargeSummary,
        DocumentKind::SurgicalCaseSheet,
    ];

    /// Printed document title
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::PharmacyInvoice => "PHARMACY INVOICE",
            DocumentKind::PrescriptionBill => "PRESCRIPTION BILL",
            DocumentKind::ConsultationCard => "CONSULTATION CARD",
            DocumentKind::LabReport => "LABORATORY REPORT",
            DocumentKind::DischargeSummary => "DISCHARGE SUMMARY",
            DocumentKind::SurgicalCaseSheet => "SURGICAL CASE SHEET",
        }
    }

    /// First segment of artifact file names
    pub fn file_prefix(&self) -> &'static str {
        match self {
            DocumentKind::PharmacyInvoice => "PharmacyInvoice",
            DocumentKind::PrescriptionBill => "PrescriptionBill",
            DocumentKind::ConsultationCard => "ConsultationCard",
            DocumentKind::LabReport => "LabReport",
            DocumentKind::DischargeSummary => "DischargeSummary",
            DocumentKind::SurgicalCaseSheet => "SurgicalCaseSheet",
        }
    }

    /// Request tag, as used in JSON
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::PharmacyInvoice => "pharmacyInvoice",
            DocumentKind::PrescriptionBill => "prescriptionBill",
            DocumentKind::ConsultationCard => "consultationCard",
            DocumentKind::LabReport => "labReport",
            DocumentKind::DischargeSummary => "dischargeSummary",
            DocumentKind::SurgicalCaseSheet => "surgicalCaseSheet",
        }
    }

    /// Billing documents carry totals and a barcode
    pub fn is_billing(&self) -> bool {
        matches!(
            self,
            DocumentKind::PharmacyInvoice | DocumentKind::PrescriptionBill
        )
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_prefix())
    }
}
