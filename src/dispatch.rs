//! Classification dispatch — exclusive access to the classifier.
//!
//! **Why this exists**: one classifier call at a time, for the whole session.
//! Concurrent submissions would interleave result-store appends and break
//! the retry contract of the batch queue, so the dispatcher rejects any
//! submission while one is in flight — a hard precondition, not a wait.
//!
//! **Design**:
//! - `acquire()` flips the busy gate or fails with `DispatchError::Busy`
//! - the returned guard releases the gate on drop, on every exit path
//! - no cancellation or timeout: a classifier call that never returns keeps
//!   the gate busy for the rest of the session (deliberate, see DESIGN.md)
//! - results are returned to the caller; the dispatcher never touches the
//!   result store

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::classifier::{Classification, ClassifierClient, ClassifierError};
use crate::models::{ReviewCandidate, ReviewResult};

/// Errors from dispatch operations.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A classification is already in flight. Not a transient failure —
    /// the submission was not accepted and should not be auto-retried.
    #[error("A classification is already in flight")]
    Busy,
    #[error("Classification failed: {0}")]
    ClassificationFailed(#[from] ClassifierError),
}

/// Busy-gated front door to the classifier.
pub struct Dispatcher {
    client: Arc<dyn ClassifierClient>,
    busy: AtomicBool,
}

/// Releases the busy gate when dropped.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ClassifierClient>) -> Self {
        Self {
            client,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a classification is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Flip Idle → Busy, or reject.
    fn acquire(&self) -> Result<BusyGuard<'_>, DispatchError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Submission rejected: dispatcher busy");
            return Err(DispatchError::Busy);
        }
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Classify one candidate.
    ///
    /// Consumes the candidate and returns a freshly-identified result with
    /// the completion time as its timestamp.
    pub async fn submit_single(
        &self,
        candidate: ReviewCandidate,
    ) -> Result<ReviewResult, DispatchError> {
        let _guard = self.acquire()?;

        tracing::debug!(chars = candidate.text.chars().count(), "Dispatching single review");
        let classification = self.client.classify(&candidate.text).await.map_err(|e| {
            tracing::error!(error = %e, "Single classification failed");
            DispatchError::ClassificationFailed(e)
        })?;

        Ok(build_result(candidate, classification, Utc::now()))
    }

    /// Classify a batch of candidates as one call.
    ///
    /// The classifier must answer with one verdict per input, in input
    /// order; any shortfall or surplus fails the whole batch with no partial
    /// results. All results of a batch share one completion timestamp —
    /// ordering within the block carries the sequence.
    pub async fn submit_batch(
        &self,
        candidates: Vec<ReviewCandidate>,
    ) -> Result<Vec<ReviewResult>, DispatchError> {
        let _guard = self.acquire()?;

        tracing::debug!(count = candidates.len(), "Dispatching review batch");
        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let classifications = self.client.classify_batch(&texts).await.map_err(|e| {
            tracing::error!(error = %e, "Batch classification failed");
            DispatchError::ClassificationFailed(e)
        })?;

        if classifications.len() != candidates.len() {
            let mismatch = ClassifierError::BatchMismatch {
                expected: candidates.len(),
                got: classifications.len(),
            };
            tracing::error!(error = %mismatch, "Batch classification failed");
            return Err(DispatchError::ClassificationFailed(mismatch));
        }

        let completed_at = Utc::now();
        Ok(candidates
            .into_iter()
            .zip(classifications)
            .map(|(candidate, classification)| build_result(candidate, classification, completed_at))
            .collect())
    }
}

fn build_result(
    candidate: ReviewCandidate,
    classification: Classification,
    timestamp: DateTime<Utc>,
) -> ReviewResult {
    ReviewResult {
        id: Uuid::new_v4(),
        text: candidate.text,
        prediction: classification.prediction,
        confidence: classification.confidence,
        timestamp,
        explanation: classification.explanation,
    }
}
