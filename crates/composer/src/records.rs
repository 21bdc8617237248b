//! Input records
//!
//! These are the already-validated records the engine is handed. Optional
//! text prints as `N/A`; numeric money fields accept numbers or strings and
//! are checked when the plan is built.

use billing::{NumericInput, RawLineItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl Patient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            gender: None,
            contact: None,
        }
    }

    /// "34 / Female" style summary
    pub fn age_gender(&self) -> String {
        let age = self
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| crate::NOT_AVAILABLE.to_string());
        format!("{} / {}", age, crate::or_na(self.gender.as_deref()))
    }
}

/// A pharmacy invoice line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyItem {
    pub description: String,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    pub quantity: NumericInput,
    #[serde(alias = "rate")]
    pub unit_price: NumericInput,
    #[serde(default, alias = "gstRate")]
    pub tax_rate: NumericInput,
}

impl PharmacyItem {
    pub fn to_raw(&self) -> RawLineItem {
        RawLineItem {
            description: self.description.clone(),
            quantity: self.quantity.clone(),
            unit_price: self.unit_price.clone(),
            tax_rate: self.tax_rate.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyInvoice {
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub patient: Patient,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub payment_mode: Option<String>,
    pub items: Vec<PharmacyItem>,
    #[serde(default)]
    pub discount: Option<NumericInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionBill {
    pub bill_number: String,
    pub bill_date: NaiveDate,
    pub patient: Patient,
    #[serde(default)]
    pub doctor: Option<String>,
    pub items: Vec<RawLineItem>,
    #[serde(default)]
    pub discount: Option<NumericInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vitals {
    pub blood_pressure: Option<String>,
    pub pulse: Option<String>,
    pub temperature: Option<String>,
    pub weight: Option<String>,
    pub spo2: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationCard {
    pub patient: Patient,
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub fee: Option<NumericInput>,
    #[serde(default)]
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabResult {
    pub parameter: String,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub report_number: String,
    pub patient: Patient,
    pub test_name: String,
    pub sample_date: NaiveDate,
    #[serde(default)]
    pub report_date: Option<NaiveDate>,
    #[serde(default)]
    pub referred_by: Option<String>,
    pub results: Vec<LabResult>,
    #[serde(default)]
    pub doctor_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DischargeSummary {
    pub patient: Patient,
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    #[serde(default)]
    pub doctor: Option<String>,
    pub primary_diagnosis: String,
    #[serde(default)]
    pub secondary_diagnosis: Option<String>,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub follow_up: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalPatient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub religion: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgicalCaseSheet {
    pub patient: SurgicalPatient,
    pub surgery_date: NaiveDate,
    #[serde(default)]
    pub procedure: Option<String>,
    #[serde(default)]
    pub surgeon: Option<String>,
    #[serde(default)]
    pub anaesthesia: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
