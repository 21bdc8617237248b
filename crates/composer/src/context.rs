//! Per-call generation context

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Values that vary between generation calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationContext {
    /// Printed as "Generated on" and used in file names
    pub generated_at: NaiveDateTime,
}

impl GenerationContext {
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self { generated_at }
    }

    /// Context stamped with the local wall clock
    pub fn now() -> Self {
        Self::new(Local::now().naive_local())
    }

    pub fn date(&self) -> NaiveDate {
        self.generated_at.date()
    }

    /// PDF date string, `D:YYYYMMDDHHmmSS`
    pub fn pdf_date(&self) -> String {
        self.generated_at.format("D:%Y%m%d%H%M%S").to_string()
    }
}
