//! Plan builders, one per document kind
//!
//! Each builder turns an input record into a [`DocumentPlan`]. Numeric fields
//! are validated here; layout happens later in the composer.

use crate::records::*;
use crate::{
    format_case_number, or_na, ComposeError, DocumentKind, DocumentPlan, EngineSettings, Field,
    Formatter, Result, Section, TotalLine,
};
use billing::{parse_discount, validate_items, BillingError, LineItem, Money, Totals};
use layout_engine::{Align, CellOverflow, Column, TableSpec};

/// Columns sized as fractions of the content width
fn columns(content_width: f32, defs: &[(&str, f32, Align)]) -> Vec<Column> {
    defs.iter()
        .map(|(header, fraction, align)| Column::new(*header, content_width * fraction, *align))
        .collect()
}

fn table(settings: &EngineSettings, defs: &[(&str, f32, Align)]) -> TableSpec {
    TableSpec::new(columns(settings.content_width(), defs))
        .with_repeat_header(settings.repeat_table_header)
        .with_overflow(settings.cell_overflow)
}

fn free_text(heading: &str, body: Option<&str>) -> Section {
    Section::FreeText {
        heading: heading.to_string(),
        body: Some(or_na(body)),
        ruled_lines: 0,
    }
}

/// Heading followed by blank lines to write on
fn ruled(heading: &str, lines: usize) -> Section {
    Section::FreeText {
        heading: heading.to_string(),
        body: None,
        ruled_lines: lines,
    }
}

fn signatures(labels: &[&str]) -> Section {
    Section::Signatures {
        labels: labels.iter().map(|l| l.to_string()).collect(),
    }
}

fn quantity(item: &LineItem) -> String {
    item.quantity().normalize().to_string()
}

/// Unit price with at least two places; sub-cent digits are kept
fn rate(item: &LineItem) -> String {
    let mut price = item.unit_price().normalize();
    if price.scale() < 2 {
        price.rescale(2);
    }
    price.to_string()
}

fn percent(item: &LineItem) -> String {
    format!("{}%", item.tax_rate().normalize())
}

fn totals_section(totals: &Totals, fmt: &Formatter, gst: bool) -> Section {
    let mut lines = Vec::new();
    if gst {
        lines.push(TotalLine::new("Taxable Value", fmt.money(totals.taxable)));
        lines.push(TotalLine::new("CGST", fmt.money(totals.cgst)));
        lines.push(TotalLine::new("SGST", fmt.money(totals.sgst)));
    } else {
        lines.push(TotalLine::new("Tax Included", fmt.money(totals.tax())));
    }
    lines.push(TotalLine::new("Subtotal", fmt.money(totals.subtotal)));
    lines.push(TotalLine::new("Discount", fmt.money(totals.discount)));
    lines.push(TotalLine::new("Grand Total", fmt.money(totals.grand_total)).emphasized());
    Section::Totals { lines }
}

pub fn pharmacy_invoice(record: &PharmacyInvoice, settings: &EngineSettings) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let raw: Vec<_> = record.items.iter().map(PharmacyItem::to_raw).collect();
    let items = validate_items(&raw)?;
    let totals = Totals::compute(&items, parse_discount(record.discount.as_ref())?)?;

    let spec = table(
        settings,
        &[
            ("#", 0.05, Align::Center),
            ("Description", 0.27, Align::Left),
            ("Batch", 0.10, Align::Left),
            ("HSN", 0.09, Align::Center),
            ("Expiry", 0.09, Align::Center),
            ("Qty", 0.07, Align::Right),
            ("Rate", 0.11, Align::Right),
            ("GST", 0.08, Align::Right),
            ("Amount", 0.14, Align::Right),
        ],
    );
    let rows = record
        .items
        .iter()
        .zip(&items)
        .enumerate()
        .map(|(i, (source, item))| {
            vec![
                (i + 1).to_string(),
                item.description().to_string(),
                or_na(source.batch.as_deref()),
                or_na(source.hsn_code.as_deref()),
                or_na(source.expiry.as_deref()),
                quantity(item),
                rate(item),
                percent(item),
                item.line_total().to_string(),
            ]
        })
        .collect();

    let patient = &record.patient;
    let mut plan = DocumentPlan::new(DocumentKind::PharmacyInvoice, &record.invoice_number);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Invoice No", &record.invoice_number),
                Field::new("Date", fmt.date(record.invoice_date)),
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
            ],
            right: vec![
                Field::new("Age / Gender", patient.age_gender()),
                Field::new("Contact", or_na(patient.contact.as_deref())),
                Field::new("Doctor", or_na(record.doctor.as_deref())),
                Field::new("Payment", or_na(record.payment_mode.as_deref())),
            ],
        })
        .push(Section::Table {
            heading: Some("Items".to_string()),
            spec,
            rows,
        })
        .push(totals_section(&totals, &fmt, true))
        .push(Section::Barcode {
            value: record.invoice_number.clone(),
        })
        .push(Section::Footer);
    Ok(plan)
}

pub fn prescription_bill(record: &PrescriptionBill, settings: &EngineSettings) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let items = validate_items(&record.items)?;
    let totals = Totals::compute(&items, parse_discount(record.discount.as_ref())?)?;

    let spec = table(
        settings,
        &[
            ("#", 0.06, Align::Center),
            ("Medicine", 0.44, Align::Left),
            ("Qty", 0.10, Align::Right),
            ("Price", 0.14, Align::Right),
            ("Tax", 0.10, Align::Right),
            ("Total", 0.16, Align::Right),
        ],
    );
    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            vec![
                (i + 1).to_string(),
                item.description().to_string(),
                quantity(item),
                rate(item),
                percent(item),
                item.line_total().to_string(),
            ]
        })
        .collect();

    let patient = &record.patient;
    let mut plan = DocumentPlan::new(DocumentKind::PrescriptionBill, &record.bill_number);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Bill No", &record.bill_number),
                Field::new("Date", fmt.date(record.bill_date)),
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
            ],
            right: vec![
                Field::new("Age / Gender", patient.age_gender()),
                Field::new("Contact", or_na(patient.contact.as_deref())),
                Field::new("Doctor", or_na(record.doctor.as_deref())),
            ],
        })
        .push(Section::Table {
            heading: Some("Medicines".to_string()),
            spec,
            rows,
        })
        .push(totals_section(&totals, &fmt, false))
        .push(Section::Barcode {
            value: record.bill_number.clone(),
        })
        .push(Section::Footer);
    Ok(plan)
}

pub fn consultation_card(record: &ConsultationCard, settings: &EngineSettings) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let fee = match &record.fee {
        Some(input) => {
            let amount = input.parse().map_err(|reason| BillingError::InvalidLineItem {
                index: 0,
                field: "fee",
                value: input.as_text(),
                reason,
            })?;
            fmt.money(Money::new(amount))
        }
        None => or_na(None),
    };

    let vitals = &record.vitals;
    let spec = table(
        settings,
        &[
            ("BP", 0.2, Align::Center),
            ("Pulse", 0.2, Align::Center),
            ("Temperature", 0.2, Align::Center),
            ("Weight", 0.2, Align::Center),
            ("SpO2", 0.2, Align::Center),
        ],
    );
    let row = vec![
        or_na(vitals.blood_pressure.as_deref()),
        or_na(vitals.pulse.as_deref()),
        or_na(vitals.temperature.as_deref()),
        or_na(vitals.weight.as_deref()),
        or_na(vitals.spo2.as_deref()),
    ];

    let patient = &record.patient;
    let mut plan = DocumentPlan::new(DocumentKind::ConsultationCard, &patient.id);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
                Field::new("Age / Gender", patient.age_gender()),
                Field::new("Contact", or_na(patient.contact.as_deref())),
            ],
            right: vec![
                Field::new("Visit Date", fmt.date(record.visit_date)),
                Field::new("Department", or_na(record.department.as_deref())),
                Field::new("Doctor", or_na(record.doctor.as_deref())),
                Field::new("Token No", or_na(record.token.as_deref())),
                Field::new("Fee", fee),
            ],
        })
        .push(Section::Table {
            heading: Some("Vitals".to_string()),
            spec,
            rows: vec![row],
        })
        .push(ruled("Chief Complaints", 4))
        .push(ruled("Diagnosis", 3))
        .push(ruled("Advice / Prescription", 6))
        .push(signatures(&["Doctor's Signature"]))
        .push(Section::Footer);
    Ok(plan)
}

pub fn lab_report(record: &LabReport, settings: &EngineSettings) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let spec = table(
        settings,
        &[
            ("Parameter", 0.34, Align::Left),
            ("Result", 0.18, Align::Center),
            ("Unit", 0.16, Align::Center),
            ("Reference Range", 0.32, Align::Left),
        ],
    )
    .with_overflow(CellOverflow::Grow);
    let rows = record
        .results
        .iter()
        .map(|r| {
            vec![
                r.parameter.clone(),
                r.value.clone(),
                or_na(r.unit.as_deref()),
                or_na(r.reference_range.as_deref()),
            ]
        })
        .collect();

    let patient = &record.patient;
    let mut plan = DocumentPlan::new(DocumentKind::LabReport, &record.report_number);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Report No", &record.report_number),
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
                Field::new("Age / Gender", patient.age_gender()),
            ],
            right: vec![
                Field::new("Test", &record.test_name),
                Field::new("Sample Date", fmt.date(record.sample_date)),
                Field::new("Report Date", fmt.optional_date(record.report_date)),
                Field::new("Referred By", or_na(record.referred_by.as_deref())),
            ],
        })
        .push(Section::Table {
            heading: Some("Results".to_string()),
            spec,
            rows,
        })
        .push(free_text("Doctor's Notes", record.doctor_notes.as_deref()))
        .push(signatures(&["Lab Technician", "Pathologist"]))
        .push(Section::Footer);
    Ok(plan)
}

pub fn discharge_summary(record: &DischargeSummary, settings: &EngineSettings) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let patient = &record.patient;

    let mut plan = DocumentPlan::new(DocumentKind::DischargeSummary, &patient.id);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
                Field::new("Age / Gender", patient.age_gender()),
                Field::new("Contact", or_na(patient.contact.as_deref())),
            ],
            right: vec![
                Field::new("Admitted", fmt.date(record.admission_date)),
                Field::new("Discharged", fmt.date(record.discharge_date)),
                Field::new("Doctor", or_na(record.doctor.as_deref())),
            ],
        })
        .push(free_text("Primary Diagnosis", Some(&record.primary_diagnosis)));

    // Omitted entirely rather than printed as N/A
    if let Some(secondary) = record
        .secondary_diagnosis
        .as_deref()
        .filter(|s| !s.trim().is_empty())
    {
        plan.push(free_text("Secondary Diagnosis", Some(secondary)));
    }

    plan.push(free_text("Treatment Given", record.treatment.as_deref()));

    if record.medications.is_empty() {
        plan.push(free_text("Medications", None));
    } else {
        let spec = table(
            settings,
            &[
                ("Medicine", 0.34, Align::Left),
                ("Dosage", 0.22, Align::Left),
                ("Frequency", 0.22, Align::Left),
                ("Duration", 0.22, Align::Left),
            ],
        )
        .with_overflow(CellOverflow::Grow);
        let rows = record
            .medications
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    or_na(m.dosage.as_deref()),
                    or_na(m.frequency.as_deref()),
                    or_na(m.duration.as_deref()),
                ]
            })
            .collect();
        plan.push(Section::Table {
            heading: Some("Medications".to_string()),
            spec,
            rows,
        });
    }

    plan.push(free_text("Follow-up", record.follow_up.as_deref()))
        .push(signatures(&["Treating Doctor", "Patient / Attendant"]))
        .push(Section::Footer);
    Ok(plan)
}

/// Case sheet followed by a consent form on its own page
/// Reject case sheets that cannot be printed, before a case number is spent
pub fn check_surgical_case_sheet(record: &SurgicalCaseSheet) -> Result<()> {
    if record.patient.name.trim().is_empty() {
        return Err(ComposeError::InvalidPlan(
            "surgical case sheet needs a patient name".to_string(),
        ));
    }
    Ok(())
}

pub fn surgical_case_sheet(
    record: &SurgicalCaseSheet,
    case_number: u64,
    settings: &EngineSettings,
) -> Result<DocumentPlan> {
    let fmt = Formatter::from_settings(settings);
    let patient = &record.patient;
    check_surgical_case_sheet(record)?;
    let case_no = format_case_number(case_number);

    let age = patient
        .age
        .map(|a| a.to_string())
        .unwrap_or_else(|| or_na(None));
    let procedure = or_na(record.procedure.as_deref());
    let consent = format!(
        "I, {name}, child of {father}, residing at {address}, hereby give my free and \
         informed consent to undergo {procedure} on {date}. The nature of the procedure, \
         the anaesthesia it requires, its risks and the available alternatives have been \
         explained to me in a language I understand. I authorise the surgeon and the \
         hospital staff to carry out any further procedure found necessary during the \
         operation in my best interest.",
        name = patient.name,
        father = or_na(patient.father_name.as_deref()),
        address = or_na(patient.address.as_deref()),
        procedure = procedure,
        date = fmt.date(record.surgery_date),
    );

    let mut plan = DocumentPlan::new(DocumentKind::SurgicalCaseSheet, &case_no);
    plan.push(Section::Header)
        .push(Section::Identity {
            left: vec![
                Field::new("Case No", &case_no),
                Field::new("Patient", &patient.name),
                Field::new("Patient ID", &patient.id),
                Field::new("Father's Name", or_na(patient.father_name.as_deref())),
                Field::new("Address", or_na(patient.address.as_deref())),
            ],
            right: vec![
                Field::new("Age", age),
                Field::new("Sex", or_na(patient.sex.as_deref())),
                Field::new("Religion", or_na(patient.religion.as_deref())),
                Field::new("Nationality", or_na(patient.nationality.as_deref())),
                Field::new("Surgery Date", fmt.date(record.surgery_date)),
            ],
        })
        .push(free_text("Procedure", record.procedure.as_deref()))
        .push(free_text("Surgeon", record.surgeon.as_deref()))
        .push(free_text("Anaesthesia", record.anaesthesia.as_deref()))
        .push(free_text("Ward", record.ward.as_deref()));

    match record.notes.as_deref() {
        Some(notes) if !notes.trim().is_empty() => plan.push(free_text("Notes", Some(notes))),
        _ => plan.push(ruled("Notes", 4)),
    };

    plan.push(signatures(&["Surgeon", "Anaesthetist"]))
        .push(Section::PageBreak {
            title: Some("CONSENT FORM".to_string()),
        })
        .push(free_text("Consent", Some(&consent)))
        .push(signatures(&["Patient / Guardian", "Witness", "Surgeon"]))
        .push(Section::Footer);
    Ok(plan)
}
