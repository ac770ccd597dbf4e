//! Batch queue — ordered holding area for candidates pending group submission.
//!
//! Insertion order is significant: display order and submission order must
//! match. The queue itself is a plain owned collection; the retry contract
//! (clear only after a successful dispatch) is enforced by `ReviewSession`,
//! its single owner and writer.

use crate::models::ReviewCandidate;

/// Ordered sequence of candidates awaiting one group submission.
#[derive(Debug, Default)]
pub struct BatchQueue {
    candidates: Vec<ReviewCandidate>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Read-only view in insertion order.
    pub fn candidates(&self) -> &[ReviewCandidate] {
        &self.candidates
    }

    /// Append candidates at the tail, preserving their order.
    ///
    /// Candidates were already validated by an ingestor; no re-check here.
    /// Adding zero items is a tolerated no-op.
    pub fn add(&mut self, candidates: Vec<ReviewCandidate>) {
        self.candidates.extend(candidates);
    }

    /// Remove exactly one entry. Out-of-range indexes are a silent no-op.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.candidates.len() {
            self.candidates.remove(index);
        }
    }

    /// Clone the current contents for submission.
    ///
    /// Submission operates on this snapshot so a dispatch failure leaves the
    /// queue exactly as it was.
    pub fn snapshot(&self) -> Vec<ReviewCandidate> {
        self.candidates.clone()
    }

    /// Empty the queue. Called only after a successful batch dispatch.
    pub fn clear(&mut self) {
        self.candidates.clear();
    }
}
