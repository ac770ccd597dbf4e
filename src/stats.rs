//! Session statistics — pure computation over the result store.
//!
//! Recomputed from scratch on every query; O(n) per call is fine since the
//! store is session-bounded.

use serde::Serialize;

use crate::models::{Prediction, ReviewResult};

/// Aggregate counts and rates for one session's results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub total: usize,
    pub fake_count: usize,
    pub real_count: usize,
    /// Share of fake verdicts as a percentage; 0.0 when there are no results.
    pub fake_pct: f64,
    /// Share of real verdicts as a percentage; 0.0 when there are no results.
    pub real_pct: f64,
    /// Mean confidence across all results; 0.0 when there are no results.
    pub avg_confidence: f64,
}

/// Compute stats over a result snapshot.
///
/// `fake_count + real_count == total` always holds — a prediction is
/// exactly one of the two tags.
pub fn compute_stats(results: &[ReviewResult]) -> SessionStats {
    let total = results.len();
    let fake_count = results
        .iter()
        .filter(|r| r.prediction == Prediction::Fake)
        .count();
    let real_count = results
        .iter()
        .filter(|r| r.prediction == Prediction::Real)
        .count();

    if total == 0 {
        return SessionStats {
            total: 0,
            fake_count: 0,
            real_count: 0,
            fake_pct: 0.0,
            real_pct: 0.0,
            avg_confidence: 0.0,
        };
    }

    let confidence_sum: f64 = results.iter().map(|r| r.confidence).sum();

    SessionStats {
        total,
        fake_count,
        real_count,
        fake_pct: fake_count as f64 / total as f64 * 100.0,
        real_pct: real_count as f64 / total as f64 * 100.0,
        avg_confidence: confidence_sum / total as f64,
    }
}
