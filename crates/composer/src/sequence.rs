//! Case-number sequences for surgical case sheets

use crate::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out case numbers. Each call to [`reserve`](Self::reserve) must return
/// a number no other caller receives.
pub trait CaseNumberSequence: Send + Sync {
    fn reserve(&self) -> Result<u64>;

    /// The number the next reservation would return, without taking it
    fn preview(&self) -> Result<u64>;
}

/// In-memory sequence backed by an atomic counter. Clones share the counter.
#[derive(Debug, Clone)]
pub struct AtomicSequence {
    next: Arc<AtomicU64>,
}

impl AtomicSequence {
    /// Sequence whose first reserved number is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// The number the next reservation will return
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for AtomicSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl CaseNumberSequence for AtomicSequence {
    fn reserve(&self) -> Result<u64> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst))
    }

    fn preview(&self) -> Result<u64> {
        Ok(self.peek())
    }
}

impl<T: CaseNumberSequence + ?Sized> CaseNumberSequence for Arc<T> {
    fn reserve(&self) -> Result<u64> {
        (**self).reserve()
    }

    fn preview(&self) -> Result<u64> {
        (**self).preview()
    }
}

/// Printed form of a case number
pub fn format_case_number(number: u64) -> String {
    format!("SCS-{:05}", number)
}
