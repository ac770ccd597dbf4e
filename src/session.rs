//! Review session — single owner of the queue, the store and the dispatcher.
//!
//! Everything mutable in the core lives here: the batch queue, the result
//! ledger and the busy gate (inside the dispatcher). No component outside
//! the session writes to any of them, which is what makes the retry
//! contract of `submit_batch` airtight — on any dispatch failure the queue
//! is provably untouched, because this is the only place that clears it.

use std::sync::Arc;

use crate::classifier::ClassifierClient;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::export;
use crate::ingest::{self, ValidationError};
use crate::models::{Prediction, ReviewCandidate, ReviewResult};
use crate::queue::BatchQueue;
use crate::stats::{self, SessionStats};
use crate::store::ResultStore;

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// One analysis session: ingestion through export.
///
/// All state is session-scoped and lost when the session is dropped; there
/// is no persistence and no reset short of constructing a new session.
pub struct ReviewSession {
    queue: BatchQueue,
    store: ResultStore,
    dispatcher: Dispatcher,
}

impl ReviewSession {
    pub fn new(client: Arc<dyn ClassifierClient>) -> Self {
        Self {
            queue: BatchQueue::new(),
            store: ResultStore::new(),
            dispatcher: Dispatcher::new(client),
        }
    }

    // ── Single-review path ──────────────────────────────────

    /// Validate and classify one review, recording the result.
    pub async fn analyze(&mut self, raw: &str) -> Result<ReviewResult, SessionError> {
        let candidate = ingest::validate_single(raw)?;
        let result = self.dispatcher.submit_single(candidate).await?;
        tracing::info!(id = %result.id, prediction = %result.prediction, "Review analyzed");
        self.store.prepend(vec![result.clone()]);
        Ok(result)
    }

    // ── Batch path ──────────────────────────────────────────

    /// Ingest pasted multi-line text into the queue. Returns how many
    /// candidates were added.
    pub fn queue_text(&mut self, raw: &str) -> Result<usize, ValidationError> {
        let candidates = ingest::split_reviews(raw)?;
        let added = candidates.len();
        self.queue.add(candidates);
        tracing::info!(added, "Queued reviews from pasted text");
        Ok(added)
    }

    /// Ingest CSV text into the queue. Returns how many candidates were
    /// added.
    pub fn queue_csv(&mut self, raw: &str) -> Result<usize, ValidationError> {
        let candidates = ingest::parse_csv(raw)?;
        let added = candidates.len();
        self.queue.add(candidates);
        tracing::info!(added, "Queued reviews from CSV");
        Ok(added)
    }

    /// Remove one queued candidate; out-of-range indexes are a no-op.
    pub fn remove_queued(&mut self, index: usize) {
        self.queue.remove_at(index);
    }

    /// The queue's current contents, in submission order.
    pub fn queued(&self) -> &[ReviewCandidate] {
        self.queue.candidates()
    }

    /// Submit the whole queue as one batch. Returns how many reviews were
    /// classified.
    ///
    /// On success the results are prepended to the store as one contiguous
    /// block and the queue is cleared. On any failure — busy gate,
    /// classifier error, malformed response — the queue keeps its exact
    /// contents so the caller can edit and retry.
    pub async fn submit_batch(&mut self) -> Result<usize, SessionError> {
        if self.queue.is_empty() {
            return Err(ValidationError::EmptyQueue.into());
        }

        let snapshot = self.queue.snapshot();
        let count = snapshot.len();
        let results = self.dispatcher.submit_batch(snapshot).await?;

        self.store.prepend(results);
        self.queue.clear();
        tracing::info!(count, "Batch analyzed");
        Ok(count)
    }

    // ── Read side ───────────────────────────────────────────

    /// Whether a classification is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.dispatcher.is_busy()
    }

    /// All results, newest block first.
    pub fn results(&self) -> &[ReviewResult] {
        self.store.all()
    }

    /// Results with the given verdict, in store order.
    pub fn filtered(&self, prediction: Prediction) -> Vec<&ReviewResult> {
        self.store.filter_by_prediction(prediction)
    }

    /// Aggregate statistics over the whole store, recomputed per call.
    pub fn stats(&self) -> SessionStats {
        stats::compute_stats(self.store.all())
    }

    /// CSV text of the whole store, newest block first.
    pub fn export_csv(&self) -> String {
        export::to_csv(self.store.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::testing::{verdict, MockClassifier};
    use crate::classifier::ClassifierError;

    fn session_with(mock: MockClassifier) -> ReviewSession {
        ReviewSession::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn analyze_records_one_result_at_the_front() {
        let mut session = session_with(
            MockClassifier::new()
                .push_ok(vec![verdict(Prediction::Real, 0.9)])
                .push_ok(vec![verdict(Prediction::Fake, 0.7)]),
        );

        session.analyze("an earlier review of the product").await.unwrap();
        let latest = session.analyze("a later review of the product").await.unwrap();

        assert_eq!(session.results().len(), 2);
        assert_eq!(session.results()[0].id, latest.id);
        assert_eq!(session.results()[0].text, "a later review of the product");
    }

    #[tokio::test]
    async fn analyze_rejects_invalid_input_without_dispatching() {
        // Empty script: any classifier call would panic the mock.
        let mut session = session_with(MockClassifier::new());

        assert!(matches!(
            session.analyze("short").await,
            Err(SessionError::Validation(ValidationError::TooShort { len: 5 }))
        ));
        assert!(session.results().is_empty());
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn successful_batch_clears_queue_and_prepends_contiguous_block() {
        let mut session = session_with(MockClassifier::new().push_ok(vec![
            verdict(Prediction::Fake, 0.9),
            verdict(Prediction::Real, 0.8),
        ]));

        session
            .queue_text("first review in the queue\nsecond review in the queue")
            .unwrap();
        assert_eq!(session.queued().len(), 2);

        let count = session.submit_batch().await.unwrap();
        assert_eq!(count, 2);
        assert!(session.queued().is_empty());

        let texts: Vec<&str> = session.results().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["first review in the queue", "second review in the queue"]
        );
    }

    #[tokio::test]
    async fn failed_batch_leaves_queue_and_store_untouched() {
        let mut session = session_with(
            MockClassifier::new()
                .push_err(ClassifierError::Http {
                    status: 503,
                    body: "overloaded".into(),
                })
                .push_ok(vec![
                    verdict(Prediction::Real, 0.9),
                    verdict(Prediction::Real, 0.8),
                ]),
        );

        session
            .queue_text("first review in the queue\nsecond review in the queue")
            .unwrap();

        let failed = session.submit_batch().await;
        assert!(matches!(failed, Err(SessionError::Dispatch(_))));
        assert_eq!(session.queued().len(), 2);
        assert_eq!(session.queued()[0].text, "first review in the queue");
        assert!(session.results().is_empty());
        assert!(!session.is_busy());

        // The core retry contract: the same queue submits cleanly afterwards.
        assert_eq!(session.submit_batch().await.unwrap(), 2);
        assert!(session.queued().is_empty());
        assert_eq!(session.results().len(), 2);
    }

    #[tokio::test]
    async fn submitting_an_empty_queue_is_rejected_before_dispatch() {
        let mut session = session_with(MockClassifier::new());

        assert!(matches!(
            session.submit_batch().await,
            Err(SessionError::Validation(ValidationError::EmptyQueue))
        ));
    }

    #[tokio::test]
    async fn queue_ingestion_failure_mutates_nothing() {
        let mut session = session_with(MockClassifier::new());

        assert!(matches!(
            session.queue_text("short\ntiny"),
            Err(ValidationError::NoCandidates)
        ));
        assert!(matches!(
            session.queue_csv("header only"),
            Err(ValidationError::NoCandidates)
        ));
        assert!(session.queued().is_empty());
    }

    #[tokio::test]
    async fn csv_and_text_ingestion_share_one_queue_in_order() {
        let mut session = session_with(MockClassifier::new());

        session.queue_text("a pasted review, long enough").unwrap();
        session
            .queue_csv("review,rating\n\"an uploaded review, quoted\",5")
            .unwrap();

        let texts: Vec<&str> = session.queued().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["a pasted review, long enough", "an uploaded review, quoted"]
        );
        session.remove_queued(0);
        assert_eq!(session.queued()[0].text, "an uploaded review, quoted");
    }

    #[tokio::test]
    async fn stats_filter_and_export_read_the_same_store() {
        let mut session = session_with(MockClassifier::new().push_ok(vec![
            verdict(Prediction::Real, 0.9),
            verdict(Prediction::Fake, 0.7),
        ]));

        session
            .queue_text("a genuinely positive review\na suspiciously glowing review")
            .unwrap();
        session.submit_batch().await.unwrap();

        let stats = session.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.fake_count, 1);
        assert_eq!(stats.real_count, 1);
        assert!((stats.avg_confidence - 0.8).abs() < 1e-9);

        let fakes = session.filtered(Prediction::Fake);
        assert_eq!(fakes.len(), 1);
        assert_eq!(fakes[0].text, "a suspiciously glowing review");

        let csv = session.export_csv();
        assert!(csv.starts_with(export::CSV_HEADER));
        assert_eq!(csv.split('\n').count(), 3);
    }
}
