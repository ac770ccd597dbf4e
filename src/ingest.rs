//! Review ingestion — raw text in, validated candidates out.
//!
//! Three entry points share one validation rule (trimmed length ≥
//! `MIN_REVIEW_CHARS`): `validate_single` for the one-review path,
//! `split_reviews` for pasted multi-line text, and `parse_csv` for tabular
//! uploads. All are pure — no queue or store state is touched, so a failed
//! ingestion leaves nothing to roll back.

use crate::config::{MAX_REVIEW_CHARS, MIN_REVIEW_CHARS};
use crate::models::{CandidateSource, ReviewCandidate};

/// Errors from ingestion and queue-submission validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("No valid review candidates found (minimum {min} characters each)", min = MIN_REVIEW_CHARS)]
    NoCandidates,
    #[error("Review text is empty")]
    Empty,
    #[error("Review too short: {len} characters (minimum {min})", min = MIN_REVIEW_CHARS)]
    TooShort { len: usize },
    #[error("Review too long: {len} characters (maximum {max})", max = MAX_REVIEW_CHARS)]
    TooLong { len: usize },
    #[error("The batch queue is empty")]
    EmptyQueue,
}

/// Validate one review for the single-analysis path.
///
/// Rejects blank input, input under `MIN_REVIEW_CHARS`, and input over
/// `MAX_REVIEW_CHARS`. The returned candidate carries the trimmed text.
pub fn validate_single(raw: &str) -> Result<ReviewCandidate, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    let len = text.chars().count();
    if len < MIN_REVIEW_CHARS {
        return Err(ValidationError::TooShort { len });
    }
    if len > MAX_REVIEW_CHARS {
        return Err(ValidationError::TooLong { len });
    }
    Ok(ReviewCandidate {
        text: text.to_string(),
        source: CandidateSource::Manual,
    })
}

/// Split pasted multi-line text into candidates, one review per line.
///
/// Lines are trimmed; blank lines and lines under `MIN_REVIEW_CHARS` are
/// dropped. Order is preserved. An empty outcome is `NoCandidates`.
pub fn split_reviews(raw: &str) -> Result<Vec<ReviewCandidate>, ValidationError> {
    let candidates: Vec<ReviewCandidate> = raw
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().count() >= MIN_REVIEW_CHARS)
        .map(|line| ReviewCandidate {
            text: line.to_string(),
            source: CandidateSource::Manual,
        })
        .collect();

    if candidates.is_empty() {
        return Err(ValidationError::NoCandidates);
    }
    Ok(candidates)
}

/// Extract candidates from CSV text.
///
/// The first line is always discarded as a header, even when the file has
/// none — an empty or single-line input therefore yields `NoCandidates`.
/// Per data line: the interior of the first double-quoted substring wins;
/// otherwise the text before the first comma. No RFC-4180 escape handling.
pub fn parse_csv(raw: &str) -> Result<Vec<ReviewCandidate>, ValidationError> {
    let candidates: Vec<ReviewCandidate> = raw
        .lines()
        .skip(1)
        .filter_map(csv_field)
        .map(|text| ReviewCandidate {
            text,
            source: CandidateSource::Csv,
        })
        .collect();

    if candidates.is_empty() {
        return Err(ValidationError::NoCandidates);
    }
    Ok(candidates)
}

/// The review field of one CSV data line, if it passes validation.
fn csv_field(line: &str) -> Option<String> {
    let field = match quoted_interior(line) {
        Some(interior) => interior,
        None => line.split(',').next().unwrap_or(""),
    };
    let field = field.trim();
    (field.chars().count() >= MIN_REVIEW_CHARS).then(|| field.to_string())
}

/// Interior of the first complete double-quoted substring, if any.
fn quoted_interior(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let rest = &line[start + 1..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── validate_single ─────────────────────────────────────

    #[test]
    fn single_accepts_trimmed_text() {
        let candidate = validate_single("  Great product, works well  ").unwrap();
        assert_eq!(candidate.text, "Great product, works well");
        assert_eq!(candidate.source, CandidateSource::Manual);
    }

    #[test]
    fn single_rejects_blank() {
        assert!(matches!(validate_single("   \n "), Err(ValidationError::Empty)));
    }

    #[test]
    fn single_rejects_nine_chars() {
        assert!(matches!(
            validate_single("nine char"),
            Err(ValidationError::TooShort { len: 9 })
        ));
    }

    #[test]
    fn single_accepts_exactly_ten_chars() {
        assert!(validate_single("ten chars!").is_ok());
    }

    #[test]
    fn single_rejects_over_maximum() {
        let raw = "x".repeat(MAX_REVIEW_CHARS + 1);
        assert!(matches!(
            validate_single(&raw),
            Err(ValidationError::TooLong { len }) if len == MAX_REVIEW_CHARS + 1
        ));
    }

    // ── split_reviews ───────────────────────────────────────

    #[test]
    fn split_keeps_only_long_enough_lines_in_order() {
        let raw = "Great product, works well\nok";
        let candidates = split_reviews(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Great product, works well");
    }

    #[test]
    fn split_preserves_input_order() {
        let raw = "first review long enough\n\nsecond review long enough\nshort\nthird review long enough";
        let texts: Vec<String> = split_reviews(raw)
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(
            texts,
            vec![
                "first review long enough",
                "second review long enough",
                "third review long enough"
            ]
        );
    }

    #[test]
    fn split_trims_carriage_returns() {
        let candidates = split_reviews("windows line endings here\r\nother valid review line\r\n").unwrap();
        assert_eq!(candidates[0].text, "windows line endings here");
        assert_eq!(candidates[1].text, "other valid review line");
    }

    #[test]
    fn split_with_no_valid_lines_is_no_candidates() {
        assert!(matches!(
            split_reviews("short\n\ntiny"),
            Err(ValidationError::NoCandidates)
        ));
    }

    // ── parse_csv ───────────────────────────────────────────

    #[test]
    fn csv_discards_first_line_even_without_header() {
        // The first line is a real review, but it is still treated as a header.
        let raw = "this is a real review, not a header\nthis one survives parsing,5";
        let candidates = parse_csv(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "this one survives parsing");
        assert_eq!(candidates[0].source, CandidateSource::Csv);
    }

    #[test]
    fn csv_prefers_quoted_substring_over_pre_comma_text() {
        let raw = "header\n\"Excellent service overall\",5\nbad,3";
        let candidates = parse_csv(raw).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Excellent service overall");
    }

    #[test]
    fn csv_falls_back_to_text_before_first_comma() {
        let raw = "review,rating\nThe delivery was quick and painless,4";
        let candidates = parse_csv(raw).unwrap();
        assert_eq!(candidates[0].text, "The delivery was quick and painless");
    }

    #[test]
    fn csv_empty_input_is_no_candidates() {
        assert!(matches!(parse_csv(""), Err(ValidationError::NoCandidates)));
        assert!(matches!(
            parse_csv("just a header line"),
            Err(ValidationError::NoCandidates)
        ));
    }

    #[test]
    fn csv_unterminated_quote_falls_back_to_comma_split() {
        let raw = "header\n\"no closing quote but quite long,3";
        let candidates = parse_csv(raw).unwrap();
        assert_eq!(candidates[0].text, "\"no closing quote but quite long");
    }
}
