//! Error types for the campusmatch core.
//!
//! Provides [`MatchError`] as the top-level error type. The enum is
//! non-exhaustive to allow future extension without breaking downstream.

use thiserror::Error;

/// Top-level error type for the campusmatch core.
///
/// `DataFormat` is fatal at startup: the process must not serve requests
/// with an unnormalized table. The remaining variants are recoverable and
/// are converted to user-facing messages by the conversation layer --
/// no variant ever silently discards a recorded answer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MatchError {
    /// The raw dataset is malformed or missing required columns.
    #[error("invalid data format: {reason}")]
    DataFormat {
        /// What is wrong with the source data.
        reason: String,
    },

    /// The external moderation service could not be reached.
    ///
    /// Never treated as "clean" -- the caller decides whether to block
    /// or degrade.
    #[error("moderation unavailable: {reason}")]
    ModerationUnavailable {
        /// The underlying transport or service failure.
        reason: String,
    },

    /// The step machine was asked to advance a session that is already
    /// complete, or a session was missing when one was expected.
    #[error("invalid session state: {reason}")]
    InvalidSessionState {
        /// What the session looked like when the operation was rejected.
        reason: String,
    },

    /// The LLM provider returned an error.
    #[error("provider error: {message}")]
    Provider {
        /// Provider-supplied error message.
        message: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, MatchError>;
