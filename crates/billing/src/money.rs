//! Money amounts

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Round to two decimal places, half away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A monetary amount, always held at two decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Round `value` to cents
    pub fn new(value: Decimal) -> Self {
        let mut rounded = round2(value);
        rounded.rescale(2);
        Self(rounded)
    }

    /// Build from a whole number of cents
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `None` when the sum does not fit
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money::new)
    }

    /// Clamp negative amounts to zero
    pub fn non_negative(self) -> Self {
        if self.0.is_sign_negative() {
            Self::ZERO
        } else {
            self
        }
    }

    /// Format with a currency prefix, e.g. `Rs. 125.50`
    pub fn format_with(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(2);
        // -0.00 prints as 0.00
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        write!(f, "{}", value)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::new(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::new(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round2(d("2.345")), d("2.35"));
        assert_eq!(round2(d("2.344")), d("2.34"));
        assert_eq!(round2(d("0.005")), d("0.01"));
        assert_eq!(round2(d("10")), d("10"));
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Money::new(d("12.5")).to_string(), "12.50");
        assert_eq!(Money::new(d("7")).to_string(), "7.00");
        assert_eq!(Money::new(d("0.004")).to_string(), "0.00");
        assert_eq!(Money::from_cents(123456).to_string(), "1234.56");
    }

    #[test]
    fn test_format_with_prefix() {
        assert_eq!(Money::from_cents(12550).format_with("Rs. "), "Rs. 125.50");
    }

    #[test]
    fn test_sum_and_clamp() {
        let total: Money = [Money::from_cents(150), Money::from_cents(250)].iter().sum();
        assert_eq!(total, Money::from_cents(400));
        assert_eq!((Money::from_cents(100) - Money::from_cents(300)).non_negative(), Money::ZERO);
        assert_eq!(
            Money::from_cents(150).checked_add(Money::from_cents(250)),
            Some(Money::from_cents(400))
        );
        assert_eq!(Money(Decimal::MAX).checked_add(Money(Decimal::MAX)), None);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(999)).unwrap();
        assert_eq!(json, "\"9.99\"");
    }
}
