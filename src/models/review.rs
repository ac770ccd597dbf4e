use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Classifier verdict for a single review. Exactly two tags — there is no
/// "uncertain" third state; low confidence is expressed through `confidence`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Real,
    Fake,
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Fake => write!(f, "fake"),
        }
    }
}

/// Where a candidate entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// Typed or pasted by hand (single input or multi-line paste).
    Manual,
    /// Extracted from an uploaded CSV.
    Csv,
}

/// A validated review awaiting classification.
///
/// Constructed only by the ingestion functions, which guarantee the text is
/// trimmed and at least `config::MIN_REVIEW_CHARS` characters long. Ephemeral:
/// lives between ingestion and dispatch, consumed on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCandidate {
    pub text: String,
    pub source: CandidateSource,
}

/// One completed classification. Immutable after construction; the result
/// store only ever prepends whole blocks of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResult {
    /// Unique per session.
    pub id: Uuid,
    /// The submitted candidate text, verbatim.
    pub text: String,
    pub prediction: Prediction,
    /// Classifier-reported score in [0.0, 1.0].
    pub confidence: f64,
    /// Completion time of the dispatch that produced this result.
    pub timestamp: DateTime<Utc>,
    /// Optional human-readable reasons, in classifier order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<String>>,
}
