//! The [`ChatProvider`] and [`Moderator`] capability traits.
//!
//! The conversation core makes exactly two kinds of external calls:
//! chat completion and content moderation. Each is an injected
//! capability with a single method, so the core can be driven entirely
//! by test doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatRequest, ChatResponse, ModerationVerdict};

/// A provider that can execute chat completion requests.
///
/// The main implementation is [`OpenAiClient`](crate::openai::OpenAiClient),
/// which works with any OpenAI-compatible endpoint.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider name (e.g. "openai").
    fn name(&self) -> &str;

    /// Execute a chat completion request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`](crate::error::ProviderError) if the
    /// request fails due to network issues, authentication problems,
    /// rate limiting, or invalid responses.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// A provider that can classify text as flagged or clean.
///
/// A transport or service failure propagates as an error -- it is never
/// silently treated as "clean". Callers decide whether to block or
/// degrade.
#[async_trait]
pub trait Moderator: Send + Sync {
    /// Check a piece of user text against the content policy.
    async fn moderate(&self, text: &str) -> Result<ModerationVerdict>;
}
