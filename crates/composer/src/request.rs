//! Document requests and the engine entry point

use crate::records::*;
use crate::{
    plans, Artifact, CaseNumberSequence, Composer, DocumentKind, DocumentPlan, EngineSettings,
    GenerationContext, HospitalBranding, Result,
};
use layout_engine::LayoutTree;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A generation request, tagged by document kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DocumentRequest {
    PharmacyInvoice(PharmacyInvoice),
    PrescriptionBill(PrescriptionBill),
    ConsultationCard(ConsultationCard),
    LabReport(LabReport),
    DischargeSummary(DischargeSummary),
    SurgicalCaseSheet(SurgicalCaseSheet),
}

impl DocumentRequest {
    pub fn kind(&self) -> DocumentKind {
        match self {
            DocumentRequest::PharmacyInvoice(_) => DocumentKind::PharmacyInvoice,
            DocumentRequest::PrescriptionBill(_) => DocumentKind::PrescriptionBill,
            DocumentRequest::ConsultationCard(_) => DocumentKind::ConsultationCard,
            DocumentRequest::LabReport(_) => DocumentKind::LabReport,
            DocumentRequest::DischargeSummary(_) => DocumentKind::DischargeSummary,
            DocumentRequest::SurgicalCaseSheet(_) => DocumentKind::SurgicalCaseSheet,
        }
    }
}

/// Turns requests into plans, layouts and artifacts
pub struct DocumentEngine {
    composer: Composer,
    sequence: Arc<dyn CaseNumberSequence>,
}

impl DocumentEngine {
    pub fn new(
        settings: EngineSettings,
        branding: &HospitalBranding,
        sequence: Arc<dyn CaseNumberSequence>,
    ) -> Self {
        Self {
            composer: Composer::new(settings, branding),
            sequence,
        }
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Build the plan for a request. Surgical case sheets reserve a case
    /// number here, once the record has been checked.
    pub fn plan(&self, request: &DocumentRequest) -> Result<DocumentPlan> {
        self.build_plan(request, CaseNumber::Reserve)
    }

    /// Lay a request out without consuming a case number
    pub fn layout(&self, request: &DocumentRequest, ctx: &GenerationContext) -> Result<LayoutTree> {
        let plan = self.build_plan(request, CaseNumber::Preview)?;
        self.composer.layout(&plan, ctx)
    }

    pub fn generate(&self, request: &DocumentRequest, ctx: &GenerationContext) -> Result<Artifact> {
        let plan = self.plan(request)?;
        self.composer.render(&plan, ctx)
    }

    fn build_plan(&self, request: &DocumentRequest, case_number: CaseNumber) -> Result<DocumentPlan> {
        let settings = self.composer.settings();
        let plan = match request {
            DocumentRequest::PharmacyInvoice(r) => plans::pharmacy_invoice(r, settings)?,
            DocumentRequest::PrescriptionBill(r) => plans::prescription_bill(r, settings)?,
            DocumentRequest::ConsultationCard(r) => plans::consultation_card(r, settings)?,
            DocumentRequest::LabReport(r) => plans::lab_report(r, settings)?,
            DocumentRequest::DischargeSummary(r) => plans::discharge_summary(r, settings)?,
            DocumentRequest::SurgicalCaseSheet(r) => {
                plans::check_surgical_case_sheet(r)?;
                let number = match case_number {
                    CaseNumber::Reserve => self.sequence.reserve()?,
                    CaseNumber::Preview => self.sequence.preview()?,
                };
                tracing::debug!(number, ?case_number, "case number");
                plans::surgical_case_sheet(r, number, settings)?
            }
        };
        Ok(plan)
    }
}

#[derive(Debug, Clone, Copy)]
enum CaseNumber {
    Reserve,
    Preview,
}
