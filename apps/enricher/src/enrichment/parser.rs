//! Marker-based extraction of structured fields from raw model text.
//!
//! All three routines share one contract: scan for literal marker tokens and
//! take the text between a field's marker and the next marker (or end of
//! text), trimmed of surrounding whitespace. Behavior on marker-less text is
//! governed by `ParsePolicy`, chosen once in configuration and applied
//! uniformly — the policies are never mixed per-routine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const TITLE_MARKER: &str = "TITLE:";
const DESCRIPTION_MARKER: &str = "DESCRIPTION:";
const SUMMARY_MARKER: &str = "SUMMARY:";
const RATING_MARKER: &str = "RATING:";
const REVIEW_MARKER: &str = "REVIEW:";

/// Titles must fit the 255-char storage column.
pub const MAX_TITLE_CHARS: usize = 255;
/// Summaries must fit the 500-char storage column.
pub const MAX_SUMMARY_CHARS: usize = 500;

/// Rating used when the rating segment fails numeric conversion.
/// Applies under both policies.
pub const DEFAULT_RATING: f64 = 4.0;

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// How the parser treats model output that lacks the expected markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Fall back to positional splitting (blank line / first line); never fails.
    #[default]
    Lenient,
    /// Fail the listing with `ParseError`.
    Strict,
}

/// Raised when generated text lacks the expected markers (strict policy only).
#[derive(Debug, Error)]
#[error("generated text is missing expected marker(s): {expected}")]
pub struct ParseError {
    pub expected: &'static str,
}

/// Rewritten title and description for one listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub description: String,
}

/// Short marketing summary of the generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSummary {
    pub summary: String,
}

/// Synthetic guest review. `rating` is always within `[1.0, 5.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedReview {
    pub rating: f64,
    pub review: String,
}

/// Extracts the title (between `TITLE:` and `DESCRIPTION:`, truncated to 255
/// chars) and the description (after `DESCRIPTION:`).
pub fn parse_title_and_description(
    raw: &str,
    policy: ParsePolicy,
) -> Result<GeneratedContent, ParseError> {
    if let Some((_, rest)) = raw.split_once(TITLE_MARKER) {
        if let Some((title, description)) = rest.split_once(DESCRIPTION_MARKER) {
            return Ok(GeneratedContent {
                title: truncate_chars(title.trim(), MAX_TITLE_CHARS),
                description: description.trim().to_string(),
            });
        }
    }

    match policy {
        ParsePolicy::Lenient => Ok(content_fallback(raw)),
        ParsePolicy::Strict => Err(ParseError {
            expected: "TITLE:/DESCRIPTION:",
        }),
    }
}

/// Blank-line split: the first paragraph is the title, the remainder the
/// description; the whole text serves as description when no blank line exists.
fn content_fallback(raw: &str) -> GeneratedContent {
    match raw.split_once("\n\n") {
        Some((first, remainder)) => GeneratedContent {
            title: truncate_chars(first.trim(), MAX_TITLE_CHARS),
            description: remainder.trim().to_string(),
        },
        None => GeneratedContent {
            title: truncate_chars(raw.trim(), MAX_TITLE_CHARS),
            description: raw.trim().to_string(),
        },
    }
}

/// Extracts the summary after `SUMMARY:`, truncated to 500 chars.
/// The truncation also applies to the lenient fallback text.
pub fn parse_summary(raw: &str, policy: ParsePolicy) -> Result<GeneratedSummary, ParseError> {
    if let Some((_, rest)) = raw.split_once(SUMMARY_MARKER) {
        return Ok(GeneratedSummary {
            summary: truncate_chars(rest.trim(), MAX_SUMMARY_CHARS),
        });
    }

    match policy {
        ParsePolicy::Lenient => Ok(GeneratedSummary {
            summary: truncate_chars(raw.trim(), MAX_SUMMARY_CHARS),
        }),
        ParsePolicy::Strict => Err(ParseError {
            expected: "SUMMARY:",
        }),
    }
}

/// Extracts the rating (between `RATING:` and `REVIEW:`, clamped to
/// `[1.0, 5.0]`) and the review text (after `REVIEW:`).
pub fn parse_rating_and_review(
    raw: &str,
    policy: ParsePolicy,
) -> Result<GeneratedReview, ParseError> {
    if let Some((_, rest)) = raw.split_once(RATING_MARKER) {
        if let Some((rating_text, review)) = rest.split_once(REVIEW_MARKER) {
            return Ok(GeneratedReview {
                rating: clamp_rating(parse_rating(rating_text)),
                review: review.trim().to_string(),
            });
        }
    }

    match policy {
        ParsePolicy::Lenient => Ok(review_fallback(raw)),
        ParsePolicy::Strict => Err(ParseError {
            expected: "RATING:/REVIEW:",
        }),
    }
}

/// First line is the rating, the remainder the review text.
fn review_fallback(raw: &str) -> GeneratedReview {
    match raw.split_once('\n') {
        Some((first, remainder)) => GeneratedReview {
            rating: clamp_rating(parse_rating(first)),
            review: remainder.trim().to_string(),
        },
        None => GeneratedReview {
            rating: clamp_rating(parse_rating(raw)),
            review: raw.trim().to_string(),
        },
    }
}

// Non-numeric rating text is recovered with the default, never surfaced.
fn parse_rating(text: &str) -> f64 {
    text.trim().parse().unwrap_or(DEFAULT_RATING)
}

fn clamp_rating(rating: f64) -> f64 {
    rating.clamp(MIN_RATING, MAX_RATING)
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
