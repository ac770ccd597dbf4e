//! CSV export — serialize results to downloadable text.
//!
//! Produces the text only; delivering it as a file is the caller's concern.

use chrono::{NaiveDate, SecondsFormat};

use crate::models::ReviewResult;

/// Fixed header row of every export.
pub const CSV_HEADER: &str = "Timestamp,Prediction,Confidence,Review Text";

/// Serialize results to CSV, one row per result in the order given
/// (newest-first when handed the store's own view).
///
/// - Timestamp: RFC 3339 UTC with milliseconds — fixed-width and sortable
/// - Prediction: the tag verbatim (`real` / `fake`)
/// - Confidence: percentage with one decimal digit and a trailing `%`
/// - Review text: every literal `"` doubled, whole field quoted
///
/// Rows are joined by `\n` with no trailing newline.
pub fn to_csv(results: &[ReviewResult]) -> String {
    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(CSV_HEADER.to_string());

    for result in results {
        rows.push(format!(
            "{},{},{:.1}%,\"{}\"",
            result.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            result.prediction,
            result.confidence * 100.0,
            result.text.replace('"', "\"\""),
        ));
    }

    rows.join("\n")
}

/// Conventional download name: `review-analysis-<ISO date>.csv`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("review-analysis-{}.csv", date.format("%Y-%m-%d"))
}
