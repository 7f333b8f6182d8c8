//! # campusmatch-types
//!
//! Core type definitions for the campusmatch college recommender.
//!
//! This crate is the foundation of the dependency graph -- all other
//! campusmatch crates depend on it. It contains:
//!
//! - **[`error`]** -- [`MatchError`], the top-level error type
//! - **[`session`]** -- Questionnaire session state
//! - **[`question`]** -- The fixed, ordered question set
//! - **[`record`]** -- College records, recommendation results, and
//!   the sentinel messages shared by both interaction modes

pub mod error;
pub mod question;
pub mod record;
pub mod session;

pub use error::{MatchError, Result};
pub use question::{Question, QuestionSet};
pub use record::{
    CollegeRecord, Recommendation, EMPTY_ANSWER_MESSAGE, FLAGGED_MESSAGE, NO_INPUT_MESSAGE,
    NO_MATCHES_MESSAGE,
};
pub use session::Session;
