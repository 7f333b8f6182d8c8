//! Error types for provider calls.
//!
//! One taxonomy covers both endpoints the client talks to, chat
//! completions and moderations. Transport and HTTP-status failures map
//! onto the same variants regardless of which endpoint produced them;
//! endpoint-specific malformations (a completion body that does not
//! decode, a moderation response with an empty `results` array) are
//! [`ProviderError::InvalidResponse`].

use thiserror::Error;

/// Errors that can occur when interacting with the chat-completion or
/// moderation endpoints.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request failed with a non-retryable status. Also covers 429
    /// responses that report exhausted quota or credits rather than a
    /// transient rate limit.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Authentication with the provider was rejected (HTTP 401/403).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The provider returned a transient rate-limit response (HTTP 429).
    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited {
        /// Suggested wait time before retrying, in milliseconds.
        retry_after_ms: u64,
    },

    /// The requested chat or moderation model does not exist on the
    /// provider.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The provider has not been configured (e.g. missing API key).
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// The provider answered, but the body is unusable: undecodable
    /// JSON, or a moderation response carrying no results to read a
    /// verdict from.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request exceeded the configured timeout. Retryable: a
    /// stalled external call stalls only the request that made it.
    #[error("timeout")]
    Timeout,

    /// An HTTP-level error from reqwest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let cases: Vec<(ProviderError, &str)> = vec![
            (
                ProviderError::RequestFailed("credits exhausted or spending limit reached".into()),
                "request failed: credits exhausted or spending limit reached",
            ),
            (
                ProviderError::AuthFailed("invalid key".into()),
                "authentication failed: invalid key",
            ),
            (
                ProviderError::RateLimited { retry_after_ms: 250 },
                "rate limited: retry after 250ms",
            ),
            (
                ProviderError::ModelNotFound("model 'omni-moderation-latest': gone".into()),
                "model not found: model 'omni-moderation-latest': gone",
            ),
            (
                ProviderError::NotConfigured("set OPENAI_API_KEY env var".into()),
                "provider not configured: set OPENAI_API_KEY env var",
            ),
            (
                ProviderError::InvalidResponse("moderation response had no results".into()),
                "invalid response: moderation response had no results",
            ),
            (ProviderError::Timeout, "timeout"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn json_decode_failure_converts() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ProviderError = cause.into();
        assert!(matches!(err, ProviderError::Json(_)));
        assert!(err.to_string().starts_with("json error:"));
    }
}
