//! Line items
//!
//! [`RawLineItem`] mirrors what callers send; [`LineItem`] is the validated
//! form every calculation works on.

use crate::{BillingError, Money, Result};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric field as received: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Number(0.0)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl NumericInput {
    /// The value as the caller wrote it
    pub fn as_text(&self) -> String {
        match self {
            NumericInput::Number(n) => n.to_string(),
            NumericInput::Text(s) => s.clone(),
        }
    }

    /// Parse into a finite, non-negative decimal no larger than
    /// [`MAX_INPUT`]
    pub fn parse(&self) -> std::result::Result<Decimal, String> {
        let value = match self {
            NumericInput::Number(n) if !n.is_finite() => {
                return Err("is not a finite number".to_string())
            }
            NumericInput::Number(n) => {
                Decimal::from_f64(*n).ok_or_else(|| OUT_OF_RANGE.to_string())?
            }
            NumericInput::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err("is empty".to_string());
                }
                Decimal::from_str(trimmed).map_err(|_| "is not a number".to_string())?
            }
        };
        if value.is_sign_negative() && !value.is_zero() {
            return Err("must not be negative".to_string());
        }
        if value > MAX_INPUT {
            return Err(OUT_OF_RANGE.to_string());
        }
        Ok(value)
    }
}

/// Largest accepted quantity, price, rate or discount
pub const MAX_INPUT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

const OUT_OF_RANGE: &str = "is out of range";

/// A line item as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    pub description: String,
    pub quantity: NumericInput,
    pub unit_price: NumericInput,
    #[serde(default, alias = "taxRatePercent")]
    pub tax_rate: NumericInput,
}

impl RawLineItem {
    pub fn new(
        description: impl Into<String>,
        quantity: impl Into<NumericInput>,
        unit_price: impl Into<NumericInput>,
        tax_rate: impl Into<NumericInput>,
    ) -> Self {
        Self {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            tax_rate: tax_rate.into(),
        }
    }
}

/// A validated line item.
///
/// The unit price is kept exactly as given; the pre-tax value and the line
/// total are computed once, each rounded to cents at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    description: String,
    #[serde(serialize_with = "serialize_decimal")]
    quantity: Decimal,
    #[serde(serialize_with = "serialize_decimal")]
    unit_price: Decimal,
    /// Tax rate in percent
    #[serde(serialize_with = "serialize_decimal")]
    tax_rate: Decimal,
    taxable_value: Money,
    line_total: Money,
}

fn serialize_decimal<S: serde::Serializer>(
    value: &Decimal,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Tax on one line, split equally between central and state GST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GstSplit {
    pub cgst: Money,
    pub sgst: Money,
}

impl LineItem {
    /// Validate a raw item; `index` is its position in the bill
    pub fn from_raw(index: usize, raw: &RawLineItem) -> Result<Self> {
        let invalid = |field: &'static str, input: &NumericInput, reason: String| {
            BillingError::InvalidLineItem {
                index,
                field,
                value: input.as_text(),
                reason,
            }
        };
        let field = |field: &'static str, input: &NumericInput| {
            input.parse().map_err(|reason| invalid(field, input, reason))
        };

        let quantity = field("quantity", &raw.quantity)?;
        let unit_price = field("unitPrice", &raw.unit_price)?;
        let tax_rate = field("taxRate", &raw.tax_rate)?;

        let gross = quantity
            .checked_mul(unit_price)
            .ok_or_else(|| invalid("quantity", &raw.quantity, OUT_OF_RANGE.to_string()))?;
        let total = (tax_rate / Decimal::ONE_HUNDRED)
            .checked_add(Decimal::ONE)
            .and_then(|multiplier| gross.checked_mul(multiplier))
            .ok_or_else(|| invalid("taxRate", &raw.tax_rate, OUT_OF_RANGE.to_string()))?;

        Ok(Self {
            description: raw.description.clone(),
            quantity,
            unit_price,
            tax_rate,
            taxable_value: Money::new(gross),
            line_total: Money::new(total),
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit price as given, not rounded
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Tax rate in percent
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Quantity times unit price, before tax
    pub fn taxable_value(&self) -> Money {
        self.taxable_value
    }

    /// Quantity times unit price with tax, rounded to cents
    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Tax charged on this line
    pub fn tax_amount(&self) -> Money {
        (self.line_total - self.taxable_value).non_negative()
    }

    pub fn gst_split(&self) -> GstSplit {
        let tax = self.tax_amount();
        let cgst = Money::new(tax.amount() / Decimal::TWO);
        GstSplit {
            cgst,
            sgst: tax - cgst,
        }
    }
}

/// Validate every raw item, failing on the first bad field
pub fn validate_items(raw: &[RawLineItem]) -> Result<Vec<LineItem>> {
    let items = raw
        .iter()
        .enumerate()
        .map(|(index, item)| LineItem::from_raw(index, item))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = items.len(), "validated line items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(q: &str, p: &str, r: &str) -> LineItem {
        LineItem::from_raw(0, &RawLineItem::new("Paracetamol 500mg", q, p, r)).unwrap()
    }

    #[test]
    fn test_line_total_with_tax() {
        // 3 x 12.50 = 37.50, +12% = 42.00
        let line = item("3", "12.50", "12");
        assert_eq!(line.taxable_value(), Money::from_cents(3750));
        assert_eq!(line.line_total(), Money::from_cents(4200));
        assert_eq!(line.tax_amount(), Money::from_cents(450));
    }

    #[test]
    fn test_line_total_rounds_half_up() {
        // 1 x 10.05 x 1.05 = 10.5525
        assert_eq!(item("1", "10.05", "5").line_total(), Money::new(d("10.55")));
        // 1 x 0.10 x 1.05 = 0.105
        assert_eq!(item("1", "0.10", "5").line_total(), Money::new(d("0.11")));
    }

    #[test]
    fn test_sub_cent_price_rounds_once() {
        // 100 x 10.005 = 1000.50; rounding the price first would give 1001.00
        let line = item("100", "10.005", "0");
        assert_eq!(line.unit_price(), d("10.005"));
        assert_eq!(line.taxable_value(), Money::from_cents(100050));
        assert_eq!(line.line_total(), Money::from_cents(100050));

        // 30 x 0.3333 x 1.12 = 11.198880
        assert_eq!(item("30", "0.3333", "12").line_total(), Money::from_cents(1120));
    }

    #[test]
    fn test_huge_values_are_rejected() {
        let huge = RawLineItem::new("x", "79228162514264337593543950335", "2", "0");
        assert_eq!(
            LineItem::from_raw(4, &huge),
            Err(BillingError::InvalidLineItem {
                index: 4,
                field: "quantity",
                value: "79228162514264337593543950335".to_string(),
                reason: "is out of range".to_string(),
            })
        );
        assert!(LineItem::from_raw(0, &RawLineItem::new("x", "1", 1e30, "0")).is_err());

        // the largest accepted inputs still multiply without overflow
        let max = MAX_INPUT.to_string();
        let line = LineItem::from_raw(0, &RawLineItem::new("x", max.as_str(), max.as_str(), max.as_str()))
            .unwrap();
        assert!(line.line_total() > line.taxable_value());
    }

    #[test]
    fn test_gst_split_sums_to_tax() {
        // tax 0.45 splits into 0.23 + 0.22
        let line = item("1", "3.75", "12");
        let split = line.gst_split();
        assert_eq!(split.cgst + split.sgst, line.tax_amount());
        assert_eq!(split.cgst, Money::from_cents(23));
    }

    #[test]
    fn test_json_numbers_and_strings() {
        let raw: RawLineItem = serde_json::from_str(
            r#"{"description":"Syrup","quantity":2,"unitPrice":"45.5","taxRatePercent":"5"}"#,
        )
        .unwrap();
        let line = LineItem::from_raw(0, &raw).unwrap();
        assert_eq!(line.quantity(), d("2"));
        assert_eq!(line.unit_price(), d("45.5"));
        assert_eq!(line.tax_rate(), d("5"));
    }

    #[test]
    fn test_missing_tax_rate_defaults_to_zero() {
        let raw: RawLineItem =
            serde_json::from_str(r#"{"description":"Gauze","quantity":1,"unitPrice":20}"#).unwrap();
        let line = LineItem::from_raw(0, &raw).unwrap();
        assert_eq!(line.line_total(), Money::from_cents(2000));
    }

    #[test]
    fn test_invalid_fields_name_the_item() {
        let raw = vec![
            RawLineItem::new("ok", "1", "2", "0"),
            RawLineItem::new("bad", "two", "2", "0"),
        ];
        assert_eq!(
            validate_items(&raw),
            Err(BillingError::InvalidLineItem {
                index: 1,
                field: "quantity",
                value: "two".to_string(),
                reason: "is not a number".to_string(),
            })
        );

        let negative = RawLineItem::new("neg", "1", "-5", "0");
        assert!(matches!(
            LineItem::from_raw(3, &negative),
            Err(BillingError::InvalidLineItem { index: 3, field: "unitPrice", .. })
        ));

        let nan = RawLineItem::new("nan", f64::NAN, 1.0, 0.0);
        assert!(LineItem::from_raw(0, &nan).is_err());

        let blank = RawLineItem::new("blank", "1", "  ", "0");
        assert!(LineItem::from_raw(0, &blank).is_err());
    }
}
