//! College records, recommendation results, and sentinel messages.
//!
//! A [`CollegeRecord`] is an ordered mapping of named attributes to
//! values -- the shape of one row of the canonical table and of one
//! entry in the model's recommendation output. Column order is
//! significant for display, so the underlying map preserves insertion
//! order.

use serde_json::Value;

/// One row of the canonical table (or one recommended college).
///
/// `serde_json::Map` is used with the `preserve_order` feature so the
/// attribute order from the source data (or the model output) survives
/// serialization and table rendering.
pub type CollegeRecord = serde_json::Map<String, Value>;

/// Sentinel result when the user answered nothing at all.
pub const NO_INPUT_MESSAGE: &str = "No input provided";

/// Sentinel result when the model produced no usable recommendations.
pub const NO_MATCHES_MESSAGE: &str = "No recommendations were found based on your inputs.";

/// Retry message returned when moderation flags an answer.
pub const FLAGGED_MESSAGE: &str =
    "Your answer was flagged by content moderation. Please revise it.";

/// Retry message returned when the user submitted neither an answer nor
/// a skip.
pub const EMPTY_ANSWER_MESSAGE: &str = "Please provide input.";

/// The outcome of a completed questionnaire.
///
/// Created fresh per request and never mutated; owned by the caller
/// after return.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    /// Every recorded response was blank; no model call was made.
    NoInput,

    /// The pipeline ran but produced no decodable recommendations.
    NoMatches,

    /// A list of recommended colleges suitable for tabular rendering.
    Colleges(Vec<CollegeRecord>),
}

impl Recommendation {
    /// The list of recommended colleges, if any were produced.
    pub fn colleges(&self) -> Option<&[CollegeRecord]> {
        match self {
            Recommendation::Colleges(records) => Some(records),
            _ => None,
        }
    }

    /// The sentinel message for degenerate outcomes, if this is one.
    pub fn sentinel_message(&self) -> Option<&'static str> {
        match self {
            Recommendation::NoInput => Some(NO_INPUT_MESSAGE),
            Recommendation::NoMatches => Some(NO_MATCHES_MESSAGE),
            Recommendation::Colleges(_) => None,
        }
    }
}
