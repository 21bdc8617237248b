//! End-to-end composition tests

use super::*;
use crate::records::*;
use billing::{NumericInput, RawLineItem};
use chrono::NaiveDate;
use layout_engine::{BlockContent, LayoutTree};
use std::sync::Arc;

fn ctx() -> GenerationContext {
    let at = NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .unwrap();
    GenerationContext::new(at)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn patient() -> Patient {
    Patient {
        id: "P-1001".to_string(),
        name: "Asha Verma".to_string(),
        age: Some(34),
        gender: Some("Female".to_string()),
        contact: Some("98450 12345".to_string()),
    }
}

fn engine() -> DocumentEngine {
    DocumentEngine::new(
        EngineSettings::default(),
        &HospitalBranding::default(),
        Arc::new(AtomicSequence::default()),
    )
}

fn pharmacy_item(description: &str, qty: f64, rate: &str, gst: f64) -> PharmacyItem {
    PharmacyItem {
        description: description.to_string(),
        batch: Some("B2401".to_string()),
        hsn_code: Some("3004".to_string()),
        expiry: Some("12/26".to_string()),
        quantity: NumericInput::from(qty),
        unit_price: NumericInput::from(rate),
        tax_rate: NumericInput::from(gst),
    }
}

fn invoice(number: &str) -> DocumentRequest {
    DocumentRequest::PharmacyInvoice(PharmacyInvoice {
        invoice_number: number.to_string(),
        invoice_date: date(5),
        patient: patient(),
        doctor: Some("Dr. Menon".to_string()),
        payment_mode: Some("Cash".to_string()),
        items: vec![
            pharmacy_item("Paracetamol 650mg", 10.0, "2.10", 12.0),
            pharmacy_item("Pantoprazole 40mg", 15.0, "6.50", 12.0),
        ],
        discount: Some(NumericInput::from("5")),
    })
}

fn prescription_bill() -> DocumentRequest {
    DocumentRequest::PrescriptionBill(PrescriptionBill {
        bill_number: "PB-2024-031".to_string(),
        bill_date: date(5),
        patient: patient(),
        doctor: None,
        items: vec![
            RawLineItem::new("Cetirizine 10mg", 10.0, 1.5, 5.0),
            RawLineItem::new("Cough syrup 100ml", "1", "85", "12"),
        ],
        discount: None,
    })
}

fn consultation_card() -> DocumentRequest {
    DocumentRequest::ConsultationCard(ConsultationCard {
        patient: patient(),
        visit_date: date(5),
        department: Some("General Medicine".to_string()),
        doctor: Some("Dr. Iyer".to_string()),
        token: Some("17".to_string()),
        fee: Some(NumericInput::from(300.0)),
        vitals: Vitals {
            blood_pressure: Some("120/80".to_string()),
            pulse: Some("76".to_string()),
            ..Vitals::default()
        },
    })
}

fn lab_report(results: usize) -> DocumentRequest {
    DocumentRequest::LabReport(LabReport {
        report_number: "LAB-0042".to_string(),
        patient: patient(),
        test_name: "Complete Blood Count".to_string(),
        sample_date: date(4),
        report_date: Some(date(5)),
        referred_by: None,
        results: (0..results)
            .map(|i| LabResult {
                parameter: format!("Parameter {}", i + 1),
                value: "13.2".to_string(),
                unit: Some("g/dL".to_string()),
                reference_range: Some("12.0 - 15.5".to_string()),
            })
            .collect(),
        doctor_notes: None,
    })
}

fn discharge(secondary: Option<&str>) -> DocumentRequest {
    DocumentRequest::DischargeSummary(DischargeSummary {
        patient: patient(),
        admission_date: date(1),
        discharge_date: date(5),
        doctor: Some("Dr. Rao".to_string()),
        primary_diagnosis: "Community acquired pneumonia".to_string(),
        secondary_diagnosis: secondary.map(str::to_string),
        treatment: Some("IV antibiotics for five days, nebulisation and supportive care.".to_string()),
        medications: vec![Medication {
            name: "Amoxicillin-Clavulanate 625mg".to_string(),
            dosage: Some("1 tablet".to_string()),
            frequency: Some("Twice daily after food".to_string()),
            duration: Some("5 days".to_string()),
        }],
        follow_up: Some("Review in OPD after one week".to_string()),
    })
}

fn case_sheet() -> DocumentRequest {
    DocumentRequest::SurgicalCaseSheet(SurgicalCaseSheet {
        patient: SurgicalPatient {
            id: "P-2002".to_string(),
            name: "Ramesh Gupta".to_string(),
            father_name: Some("Suresh Gupta".to_string()),
            religion: None,
            nationality: Some("Indian".to_string()),
            address: Some("14 Lake View Road".to_string()),
            age: Some(61),
            sex: Some("Male".to_string()),
        },
        surgery_date: date(6),
        procedure: Some("Laparoscopic cholecystectomy".to_string()),
        surgeon: Some("Dr. Kapoor".to_string()),
        anaesthesia: Some("General".to_string()),
        ward: None,
        notes: None,
    })
}

fn all_requests() -> Vec<DocumentRequest> {
    vec![
        invoice("INV-0001"),
        prescription_bill(),
        consultation_card(),
        lab_report(5),
        discharge(None),
        case_sheet(),
    ]
}

/// Top of the first text block matching `text`
fn text_y(tree: &LayoutTree, text: &str) -> Option<f32> {
    tree.pages
        .iter()
        .flat_map(|p| &p.blocks)
        .find(|b| b.text() == Some(text))
        .map(|b| b.bounds.y)
}

#[test]
fn test_every_kind_renders_with_default_branding() {
    let engine = engine();
    for request in all_requests() {
        let tree = engine.layout(&request, &ctx()).unwrap();
        let texts = tree.all_texts();
        assert!(texts.contains(&DEFAULT_HOSPITAL_NAME), "{:?}", request.kind());
        assert!(texts.contains(&DEFAULT_ADDRESS));
        assert!(texts.iter().any(|t| t.contains(DEFAULT_PHONE)));
        assert!(texts.contains(&request.kind().title()));
        assert!(texts.contains(&"Generated on: 05-03-2024 10:30 AM"));
    }
}

#[test]
fn test_branding_overrides() {
    let branding = HospitalBranding {
        name: Some("Sunrise Multispeciality".to_string()),
        accreditation: Some("NABH Accredited".to_string()),
        ..HospitalBranding::default()
    };
    let engine = DocumentEngine::new(
        EngineSettings::default(),
        &branding,
        Arc::new(AtomicSequence::default()),
    );
    let tree = engine.layout(&consultation_card(), &ctx()).unwrap();
    assert!(tree.find_text("Sunrise Multispeciality").is_some());
    assert!(tree.find_text("NABH Accredited").is_some());
    assert!(tree.find_text(DEFAULT_HOSPITAL_NAME).is_none());
}

#[test]
fn test_missing_optional_text_prints_na() {
    let tree = engine().layout(&lab_report(2), &ctx()).unwrap();
    // Referred-by and doctor's notes are both absent
    assert!(tree.all_texts().iter().filter(|t| **t == NOT_AVAILABLE).count() >= 2);
}

#[test]
fn test_secondary_diagnosis_leaves_no_gap() {
    let engine = engine();
    let with = engine.layout(&discharge(Some("Type 2 diabetes")), &ctx()).unwrap();
    let without = engine.layout(&discharge(None), &ctx()).unwrap();

    assert!(text_y(&with, "Secondary Diagnosis").is_some());
    assert!(text_y(&without, "Secondary Diagnosis").is_none());

    // Treatment takes the place the secondary diagnosis would have used
    assert_eq!(
        text_y(&without, "Treatment Given"),
        text_y(&with, "Secondary Diagnosis")
    );
}

#[test]
fn test_invoice_barcode_decodes() {
    let tree = engine().layout(&invoice("INV-0001"), &ctx()).unwrap();
    assert_eq!(tree.images.len(), 1);

    let image = &tree.images[0];
    let raster = barcode::Raster {
        width: image.width,
        height: image.height,
        pixels: image.pixels.clone(),
    };
    assert_eq!(barcode::decode_raster(&raster).unwrap(), "INV-0001");

    let placed = tree
        .pages
        .iter()
        .flat_map(|p| &p.blocks)
        .any(|b| matches!(&b.content, BlockContent::Image { resource_id } if *resource_id == image.id));
    assert!(placed);
}

#[test]
fn test_barcode_failure_falls_back_to_text() {
    let tree = engine().layout(&invoice("INV\u{2116}7"), &ctx()).unwrap();
    assert!(tree.images.is_empty());
    assert!(tree.find_text("INV\u{2116}7").is_some());
}

#[test]
fn test_invoice_totals_block() {
    let tree = engine().layout(&invoice("INV-0001"), &ctx()).unwrap();
    let texts = tree.all_texts();
    // 21.00 + 97.50 taxable, 12% GST
    assert!(texts.contains(&"Rs. 118.50"));
    assert!(texts.contains(&"Rs. 7.11"));
    assert!(texts.contains(&"Rs. 132.72"));
    assert!(texts.contains(&"Rs. 5.00"));
    assert!(texts.contains(&"Rs. 127.72"));
}

#[test]
fn test_long_table_paginates_with_continuation() {
    let tree = engine().layout(&lab_report(120), &ctx()).unwrap();
    assert!(tree.page_count() > 2);

    for page in &tree.pages[1..] {
        assert!(page.contains_text(DEFAULT_HOSPITAL_NAME));
        assert!(page.contains_text("LABORATORY REPORT (continued)"));
        assert!(page.contains_text("Parameter"));
    }

    let n = tree.page_count();
    for (i, page) in tree.pages.iter().enumerate() {
        assert!(page.contains_text(&format!("Page {} of {}", i + 1, n)));
    }
}

#[test]
fn test_body_stays_inside_margins() {
    let settings = EngineSettings::default();
    let bottom = settings.page_config().content_bottom();
    let tree = engine().layout(&lab_report(120), &ctx()).unwrap();

    for page in &tree.pages {
        for block in &page.blocks {
            if block.text().map_or(false, |t| t.starts_with("Page ")) {
                continue;
            }
            assert!(block.bounds.bottom() <= bottom + 0.01, "{:?}", block);
        }
    }
}

#[test]
fn test_case_sheet_consent_on_second_page() {
    let tree = engine().layout(&case_sheet(), &ctx()).unwrap();
    assert_eq!(tree.page_count(), 2);
    assert!(tree.pages[1].contains_text("CONSENT FORM"));
    assert!(tree.pages[0].contains_text("SCS-00001"));
    assert_eq!(tree.find_text("Witness"), Some(1));
}

#[test]
fn test_case_numbers_come_from_sequence() {
    let sequence = Arc::new(AtomicSequence::starting_at(40));
    let engine = DocumentEngine::new(
        EngineSettings::default(),
        &HospitalBranding::default(),
        sequence.clone(),
    );

    let first = engine.generate(&case_sheet(), &ctx()).unwrap();
    let second = engine.generate(&case_sheet(), &ctx()).unwrap();
    assert_eq!(first.filename, "SurgicalCaseSheet_SCS-00040_2024-03-05.pdf");
    assert_eq!(second.filename, "SurgicalCaseSheet_SCS-00041_2024-03-05.pdf");
    assert_eq!(sequence.peek(), 42);
}

#[test]
fn test_layout_and_rejected_sheets_keep_case_numbers() {
    let sequence = Arc::new(AtomicSequence::starting_at(7));
    let engine = DocumentEngine::new(
        EngineSettings::default(),
        &HospitalBranding::default(),
        sequence.clone(),
    );

    let tree = engine.layout(&case_sheet(), &ctx()).unwrap();
    assert!(tree.pages[0].contains_text("SCS-00007"));
    assert_eq!(sequence.peek(), 7);

    let mut unnamed = case_sheet();
    if let DocumentRequest::SurgicalCaseSheet(sheet) = &mut unnamed {
        sheet.patient.name = " ".to_string();
    }
    assert!(matches!(
        engine.generate(&unnamed, &ctx()),
        Err(ComposeError::InvalidPlan(_))
    ));
    assert_eq!(sequence.peek(), 7);

    let artifact = engine.generate(&case_sheet(), &ctx()).unwrap();
    assert_eq!(artifact.filename, "SurgicalCaseSheet_SCS-00007_2024-03-05.pdf");
    assert_eq!(sequence.peek(), 8);
}

#[test]
fn test_generate_pdf_artifacts() {
    let engine = engine();
    for request in all_requests() {
        let artifact = engine.generate(&request, &ctx()).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF-"));
        assert!(artifact.page_count >= 1);
        assert!(artifact.filename.starts_with(request.kind().file_prefix()));
        assert!(artifact.filename.ends_with("_2024-03-05.pdf"));
    }
}

#[test]
fn test_generation_is_deterministic() {
    let a = engine().generate(&invoice("INV-0001"), &ctx()).unwrap();
    let b = engine().generate(&invoice("INV-0001"), &ctx()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_save_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = engine().generate(&prescription_bill(), &ctx()).unwrap();
    let path = artifact.save_to(dir.path()).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("PrescriptionBill_PB-2024-031_2024-03-05.pdf")
    );
    assert_eq!(std::fs::read(path).unwrap(), artifact.bytes);
}

#[test]
fn test_invalid_plan_rejected_by_composer() {
    let composer = Composer::new(EngineSettings::default(), &HospitalBranding::default());
    let mut plan = DocumentPlan::new(DocumentKind::LabReport, "LAB-1");
    plan.push(Section::Header).push(Section::Footer);
    assert!(matches!(
        composer.layout(&plan, &ctx()),
        Err(ComposeError::InvalidPlan(_))
    ));
}

#[test]
fn test_request_json_is_tagged() {
    let json = r#"{
        "kind": "prescriptionBill",
        "billNumber": "PB-9",
        "billDate": "2024-03-05",
        "patient": {"id": "P-1", "name": "Asha"},
        "items": [{"description": "ORS", "quantity": 2, "unitPrice": "20"}]
    }"#;
    let request: DocumentRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.kind(), DocumentKind::PrescriptionBill);
    let artifact = engine().generate(&request, &ctx()).unwrap();
    assert_eq!(artifact.filename, "PrescriptionBill_PB-9_2024-03-05.pdf");
}

#[test]
fn test_invalid_line_item_is_reported() {
    let json = r#"{
        "kind": "prescriptionBill",
        "billNumber": "PB-9",
        "billDate": "2024-03-05",
        "patient": {"id": "P-1", "name": "Asha"},
        "items": [{"description": "ORS", "quantity": "two", "unitPrice": "20"}]
    }"#;
    let request: DocumentRequest = serde_json::from_str(json).unwrap();
    assert!(matches!(
        engine().generate(&request, &ctx()),
        Err(ComposeError::Billing(billing::BillingError::InvalidLineItem { index: 0, .. }))
    ));
}
