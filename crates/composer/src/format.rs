//! Text formatting for dates, money and missing values

use crate::EngineSettings;
use billing::Money;
use chrono::{NaiveDate, NaiveDateTime};

/// Placeholder for missing optional text
pub const NOT_AVAILABLE: &str = "N/A";

/// The value, or `N/A` when it is absent or blank
pub fn or_na(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats values the way documents print them
#[derive(Debug, Clone)]
pub struct Formatter {
    currency_prefix: String,
    date_format: String,
    timestamp_format: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::from_settings(&EngineSettings::default())
    }
}

impl Formatter {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            currency_prefix: settings.currency_prefix.clone(),
            date_format: settings.date_format.clone(),
            timestamp_format: settings.timestamp_format.clone(),
        }
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    pub fn optional_date(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| self.date(d))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn timestamp(&self, at: NaiveDateTime) -> String {
        at.format(&self.timestamp_format).to_string()
    }

    /// Amount with the currency prefix and two decimals
    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_na() {
        assert_eq!(or_na(Some("Dr. Rao")), "Dr. Rao");
        assert_eq!(or_na(Some("   ")), "N/A");
        assert_eq!(or_na(None), "N/A");
    }

    #[test]
    fn test_default_formats() {
        let fmt = Formatter::default();
        let at = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 7, 0))
            .unwrap();
        assert_eq!(fmt.date(at.date()), "05-03-2024");
        assert_eq!(fmt.timestamp(at), "05-03-2024 02:07 PM");
        assert_eq!(fmt.money(Money::from_cents(4550)), "Rs. 45.50");
        assert_eq!(fmt.optional_date(None), "N/A");
    }
}
