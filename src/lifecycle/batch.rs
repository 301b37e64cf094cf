//! Best-effort batch operations.
//!
//! Runs an operation over every item, collecting per-item failures into a
//! report instead of stopping at the first one. A panic inside the operation
//! is caught and recorded as a failure for that item only.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Why one item of a batch failed
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFailure<E> {
    Error(E),
    Panicked(String),
}

impl<E: fmt::Display> fmt::Display for ItemFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFailure::Error(err) => write!(f, "{err}"),
            ItemFailure::Panicked(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

/// Outcome of a best-effort batch
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport<T, E> {
    pub succeeded: Vec<T>,
    pub failures: Vec<(T, ItemFailure<E>)>,
}

impl<T, E> BatchReport<T, E> {
    pub fn empty() -> Self {
        Self {
            succeeded: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of items the operation was run on
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<T, E> Default for BatchReport<T, E> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Run `op` on every item exactly once, in iteration order
pub fn run_all<T, E, I, F>(items: I, mut op: F) -> BatchReport<T, E>
where
    T: Copy,
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Result<(), E>,
{
    let mut report = BatchReport::empty();
    for item in items {
        match panic::catch_unwind(AssertUnwindSafe(|| op(item))) {
            Ok(Ok(())) => report.succeeded.push(item),
            Ok(Err(err)) => report.failures.push((item, ItemFailure::Error(err))),
            Err(payload) => report
                .failures
                .push((item, ItemFailure::Panicked(panic_message(payload.as_ref())))),
        }
    }
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
