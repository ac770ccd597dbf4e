//! Result store — the session's ledger of classification outcomes.
//!
//! Newest-first: each successful dispatch prepends its results as one
//! contiguous block, preserving the order within that block. The store only
//! grows; nothing is edited or deleted, and filtered views never mutate it.

use crate::models::{Prediction, ReviewResult};

/// Ordered, prepend-only collection of all results for the session.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Vec<ReviewResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All results, newest block first.
    pub fn all(&self) -> &[ReviewResult] {
        &self.results
    }

    /// Prepend a block of results at the front, preserving its internal
    /// order. Existing entries shift right; no re-sorting by timestamp —
    /// insertion order governs display order.
    pub fn prepend(&mut self, block: Vec<ReviewResult>) {
        self.results.splice(0..0, block);
    }

    /// Results carrying the given prediction, in store order. Read-only.
    pub fn filter_by_prediction(&self, prediction: Prediction) -> Vec<&ReviewResult> {
        self.results
            .iter()
            .filter(|r| r.prediction == prediction)
            .collect()
    }
}
