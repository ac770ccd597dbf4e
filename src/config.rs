/// Application-level constants
pub const APP_NAME: &str = "Veritas";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Minimum trimmed review length accepted by every ingestion path.
pub const MIN_REVIEW_CHARS: usize = 10;

/// Maximum review length accepted on the single-review path
/// (the input surface caps typing at the same limit).
pub const MAX_REVIEW_CHARS: usize = 2000;

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,veritas=debug"
}

/// Where and how to reach the classifier service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL of the classifier HTTP service, trailing slash tolerated.
    pub base_url: String,
    /// Request timeout in seconds (transport-level, not a dispatch timeout).
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ClassifierConfig {
    /// Build from environment, falling back to defaults.
    ///
    /// - `VERITAS_CLASSIFIER_URL` — service base URL
    /// - `VERITAS_CLASSIFIER_TIMEOUT_SECS` — request timeout (unparseable
    ///   values fall back to the default rather than erroring)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url =
            std::env::var("VERITAS_CLASSIFIER_URL").unwrap_or(defaults.base_url);
        let timeout_secs = std::env::var("VERITAS_CLASSIFIER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_secs);
        Self {
            base_url,
            timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_bounds_are_sane() {
        assert!(MIN_REVIEW_CHARS < MAX_REVIEW_CHARS);
        assert_eq!(MIN_REVIEW_CHARS, 10);
        assert_eq!(MAX_REVIEW_CHARS, 2000);
    }

    #[test]
    fn default_config_points_at_localhost() {
        let config = ClassifierConfig::default();
        assert!(config.base_url.starts_with("http://localhost"));
        assert!(config.timeout_secs > 0);
    }

    #[test]
    fn app_name_is_veritas() {
        assert_eq!(APP_NAME, "Veritas");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
