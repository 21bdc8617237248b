//! Billing - Money, line items and totals
//!
//! Amounts are exact decimals rounded to two places, half away from zero.
//! Raw line items arrive from JSON with numbers or numeric strings and are
//! validated into [`LineItem`]s before any arithmetic happens.

mod error;
mod line_item;
mod money;
mod totals;

pub use error::*;
pub use line_item::*;
pub use money::*;
pub use totals::*;
