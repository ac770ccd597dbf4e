//! Classifier client — the only external collaborator.
//!
//! The classifier is an opaque asynchronous service consumed purely through
//! its input/output contract: text in, prediction + confidence (+ optional
//! explanation) out. `ClassifierClient` is the capability trait; the
//! production `HttpClassifier` and the test doubles are interchangeable
//! behind it, so nothing in the core depends on how classification actually
//! happens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::models::Prediction;

// ═══════════════════════════════════════════════════════════
// Contract
// ═══════════════════════════════════════════════════════════

/// One classifier verdict, before it becomes a `ReviewResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub prediction: Prediction,
    /// Probability-like score in [0.0, 1.0].
    pub confidence: f64,
    /// Optional ordered human-readable reasons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Vec<String>>,
}

/// Errors from classifier calls.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Cannot reach classifier service at {0}")]
    Connection(String),
    #[error("Classifier request timed out after {0}s")]
    Timeout(u64),
    #[error("HTTP client error: {0}")]
    HttpClient(String),
    #[error("Classifier service error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse classifier response: {0}")]
    ResponseParsing(String),
    #[error("Classifier returned confidence {0}, outside [0, 1]")]
    InvalidConfidence(f64),
    #[error("Classifier returned {got} results for {expected} inputs")]
    BatchMismatch { expected: usize, got: usize },
}

/// Asynchronous text-authenticity classifier.
///
/// Batch calls must return one classification per input, in input order,
/// and fail as a unit — no partial success.
#[async_trait]
pub trait ClassifierClient: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;

    async fn classify_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<Classification>, ClassifierError>;
}

// ═══════════════════════════════════════════════════════════
// HTTP implementation
// ═══════════════════════════════════════════════════════════

/// HTTP client for a remote classifier service.
///
/// POSTs JSON to `<base_url>/classify` and `<base_url>/classify/batch`.
pub struct HttpClassifier {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

/// Request body for `/classify`
#[derive(Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

/// Request body for `/classify/batch`
#[derive(Serialize)]
struct ClassifyBatchRequest<'a> {
    texts: &'a [String],
}

/// Response body from `/classify/batch`
#[derive(Deserialize)]
struct ClassifyBatchResponse {
    results: Vec<Classification>,
}

impl HttpClassifier {
    /// Create a new classifier client.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(&config.base_url, config.timeout_secs)
    }

    fn map_send_error(&self, e: reqwest::Error) -> ClassifierError {
        if e.is_connect() {
            ClassifierError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ClassifierError::Timeout(self.timeout_secs)
        } else {
            ClassifierError::HttpClient(e.to_string())
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ClassifierError>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClassifierError::ResponseParsing(e.to_string()))
    }
}

/// Reject confidences outside the closed unit interval (NaN included).
fn check_confidence(classification: &Classification) -> Result<(), ClassifierError> {
    if !(0.0..=1.0).contains(&classification.confidence) {
        return Err(ClassifierError::InvalidConfidence(classification.confidence));
    }
    Ok(())
}

#[async_trait]
impl ClassifierClient for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let classification: Classification =
            self.post_json("/classify", &ClassifyRequest { text }).await?;
        check_confidence(&classification)?;
        Ok(classification)
    }

    async fn classify_batch(
        &self,
        texts: &[String],
    ) -> Result<Vec<Classification>, ClassifierError> {
        let parsed: ClassifyBatchResponse = self
            .post_json("/classify/batch", &ClassifyBatchRequest { texts })
            .await?;
        for classification in &parsed.results {
            check_confidence(classification)?;
        }
        Ok(parsed.results)
    }
}

// ═══════════════════════════════════════════════════════════
// Test double
// ═══════════════════════════════════════════════════════════
