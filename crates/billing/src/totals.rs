//! Bill totals

use crate::{BillingError, LineItem, Money, NumericInput, Result};
use serde::Serialize;

/// Totals derived from a bill's line items and discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of pre-tax line values
    pub taxable: Money,
    pub cgst: Money,
    pub sgst: Money,
    /// Sum of line totals, tax included
    pub subtotal: Money,
    pub discount: Money,
    /// Subtotal less discount, never below zero
    pub grand_total: Money,
}

impl Totals {
    pub fn compute(items: &[LineItem], discount: Money) -> Result<Self> {
        let subtotal = checked_sum(items.iter().map(LineItem::line_total))?;
        let taxable = checked_sum(items.iter().map(LineItem::taxable_value))?;
        let cgst = checked_sum(items.iter().map(|item| item.gst_split().cgst))?;
        let sgst = checked_sum(items.iter().map(|item| item.gst_split().sgst))?;

        let discount = discount.non_negative();
        let grand_total = (subtotal - discount).non_negative();
        if discount > subtotal {
            tracing::debug!(%subtotal, %discount, "discount exceeds subtotal; grand total clamped");
        }

        Ok(Self {
            taxable,
            cgst,
            sgst,
            subtotal,
            discount,
            grand_total,
        })
    }

    /// Total tax charged
    pub fn tax(&self) -> Money {
        self.cgst + self.sgst
    }
}

fn checked_sum(amounts: impl Iterator<Item = Money>) -> Result<Money> {
    amounts.fold(Ok(Money::ZERO), |acc, amount| {
        acc?.checked_add(amount).ok_or(BillingError::TotalOutOfRange)
    })
}

/// Parse a discount; absent discounts are zero
pub fn parse_discount(input: Option<&NumericInput>) -> Result<Money> {
    match input {
        None => Ok(Money::ZERO),
        Some(value) => value
            .parse()
            .map(Money::new)
            .map_err(|reason| BillingError::InvalidDiscount(format!("{:?} {}", value, reason))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{round2, validate_items, RawLineItem};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn items() -> Vec<LineItem> {
        validate_items(&[
            RawLineItem::new("Amoxicillin 500mg", "10", "8.40", "12"),
            RawLineItem::new("Cough syrup", "1", "95", "18"),
            RawLineItem::new("Bandage", "2", "15.25", "0"),
        ])
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let totals = Totals::compute(&items(), Money::from_cents(1000)).unwrap();
        // 94.08 + 112.10 + 30.50
        assert_eq!(totals.subtotal, Money::from_cents(23668));
        assert_eq!(totals.taxable, Money::from_cents(20950));
        assert_eq!(totals.tax(), Money::from_cents(2718));
        assert_eq!(totals.grand_total, Money::from_cents(22668));
    }

    #[test]
    fn test_discount_larger_than_subtotal() {
        let totals = Totals::compute(&items(), Money::from_cents(1_000_000)).unwrap();
        assert_eq!(totals.grand_total, Money::ZERO);
    }

    #[test]
    fn test_empty_bill() {
        let totals = Totals::compute(&[], Money::ZERO).unwrap();
        assert_eq!(totals.subtotal, Money::ZERO);
        assert_eq!(totals.grand_total, Money::ZERO);
    }

    #[test]
    fn test_parse_discount() {
        assert_eq!(parse_discount(None), Ok(Money::ZERO));
        assert_eq!(
            parse_discount(Some(&NumericInput::from("12.5"))),
            Ok(Money::from_cents(1250))
        );
        assert!(matches!(
            parse_discount(Some(&NumericInput::from(-1.0))),
            Err(BillingError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn test_sub_cent_prices_total_exactly() {
        let items = validate_items(&[
            RawLineItem::new("Paracetamol strip", "100", "10.005", "0"),
            RawLineItem::new("Vitamin C", "30", "0.3333", "12"),
        ])
        .unwrap();
        let totals = Totals::compute(&items, Money::ZERO).unwrap();
        // 1000.50 + 11.20
        assert_eq!(totals.subtotal, Money::from_cents(101170));
        // 1000.50 + 10.00 (30 x 0.3333 = 9.999)
        assert_eq!(totals.taxable, Money::from_cents(101050));
    }

    #[test]
    fn test_largest_inputs_do_not_overflow() {
        let max = crate::MAX_INPUT.to_string();
        let raw = vec![RawLineItem::new("x", max.as_str(), max.as_str(), max.as_str()); 20];
        let totals = Totals::compute(&validate_items(&raw).unwrap(), Money::ZERO).unwrap();
        assert!(totals.grand_total > Money::ZERO);
    }

    /// A raw item with a price of up to four decimal places, plus the same
    /// values as decimals for an independent calculation
    fn arb_raw_item() -> impl Strategy<Value = (RawLineItem, Decimal, Decimal, Decimal)> {
        (
            0i64..1000,
            0i64..100_000_000,
            0u32..=4,
            prop::sample::select(vec![0i64, 5, 12, 18, 28]),
        )
            .prop_map(|(q, mantissa, scale, rate)| {
                let quantity = Decimal::new(q, 0);
                let price = Decimal::new(mantissa, scale);
                let rate = Decimal::new(rate, 0);
                let raw = RawLineItem::new(
                    "item",
                    quantity.to_string().as_str(),
                    price.to_string().as_str(),
                    rate.to_string().as_str(),
                );
                (raw, quantity, price, rate)
            })
    }

    proptest! {
        #[test]
        fn prop_line_total_rounds_once(
            lines in prop::collection::vec(arb_raw_item(), 0..30),
        ) {
            let raw: Vec<_> = lines.iter().map(|(r, ..)| r.clone()).collect();
            let items = validate_items(&raw).unwrap();
            for (item, (_, q, p, r)) in items.iter().zip(&lines) {
                let expected = round2(*q * *p * (Decimal::ONE + *r / Decimal::ONE_HUNDRED));
                prop_assert_eq!(item.line_total().amount(), expected);
            }

            let totals = Totals::compute(&items, Money::ZERO).unwrap();
            let expected: Decimal = items.iter().map(|i| i.line_total().amount()).sum();
            prop_assert_eq!(totals.subtotal.amount(), expected);
            prop_assert_eq!(totals.grand_total, totals.subtotal);
        }

        #[test]
        fn prop_grand_total_never_negative(
            lines in prop::collection::vec(arb_raw_item(), 0..10),
            discount in 0i64..100_000_000,
        ) {
            let raw: Vec<_> = lines.into_iter().map(|(r, ..)| r).collect();
            let items = validate_items(&raw).unwrap();
            let totals = Totals::compute(&items, Money::from_cents(discount)).unwrap();
            prop_assert!(!totals.grand_total.amount().is_sign_negative() || totals.grand_total.is_zero());
            if totals.discount >= totals.subtotal {
                prop_assert_eq!(totals.grand_total, Money::ZERO);
            } else {
                prop_assert_eq!(totals.grand_total, totals.subtotal - totals.discount);
            }
        }
    }
}
