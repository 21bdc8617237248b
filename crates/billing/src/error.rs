//! Billing error types

use thiserror::Error;

/// Billing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("Invalid line item {index}: {field} {value:?} {reason}")]
    InvalidLineItem {
        index: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid discount {0:?}")]
    InvalidDiscount(String),

    #[error("Bill total is out of range")]
    TotalOutOfRange,
}

pub type Result<T> = std::result::Result<T, BillingError>;
