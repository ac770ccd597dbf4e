//! Veritas — session-scoped core of an AI-powered fake review detector.
//!
//! The pipeline: ingestion validates free-text reviews (single input,
//! pasted multi-line text, or CSV) into candidates; the batch queue holds
//! them for one group submission; the dispatcher sends them to the
//! classifier service under a mutual-exclusion gate; the result store keeps
//! every outcome newest-first; stats and CSV export read the store on
//! demand. `session::ReviewSession` wires it all together and is the only
//! writer of any of it.

pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod ingest;
pub mod models;
pub mod queue;
pub mod session;
pub mod stats;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an embedding application.
///
/// Honors `RUST_LOG` when set, otherwise falls back to
/// `config::default_log_filter()`. Call at most once per process.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Veritas core v{}", config::APP_VERSION);
}
