//! OpenAI-compatible client implementation.
//!
//! [`OpenAiClient`] works with any API that follows the OpenAI chat
//! completion and moderation formats. Point `base_url` at a different
//! endpoint to talk to a compatible provider.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{ProviderError, Result};
use crate::provider::{ChatProvider, Moderator};
use crate::types::{ChatRequest, ChatResponse, ModerationResponse, ModerationVerdict};

/// A client for OpenAI-compatible chat completion and moderation APIs.
///
/// # Construction
///
/// ```rust,ignore
/// use campusmatch_llm::{LlmConfig, OpenAiClient};
///
/// let client = OpenAiClient::new(LlmConfig::default());
/// ```
pub struct OpenAiClient {
    config: LlmConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Create a new client from configuration.
    ///
    /// The API key will be resolved from the environment variable
    /// specified in `config.api_key_env` at request time.
    pub fn new(config: LlmConfig) -> Self {
        let http = match reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs()))
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                // The fallback client has no request timeout.
                warn!(error = %e, "http client build failed, falling back to default client");
                reqwest::Client::default()
            }
        };
        Self {
            config,
            http,
            api_key: None,
        }
    }

    /// Create a new client with an explicit API key, bypassing the
    /// environment variable lookup.
    pub fn with_api_key(config: LlmConfig, api_key: String) -> Self {
        let mut client = Self::new(config);
        client.api_key = Some(api_key);
        client
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Returns the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/chat/completions")
    }

    /// Returns the moderations endpoint URL.
    fn moderations_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/moderations")
    }

    /// Resolve the API key: explicit key > environment variable.
    fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.config.api_key_env).map_err(|_| {
            ProviderError::NotConfigured(format!("set {} env var", self.config.api_key_env))
        })
    }

    /// POST a JSON body with auth and configured headers; map non-success
    /// statuses to the appropriate [`ProviderError`].
    async fn post_json<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
        model: &str,
    ) -> Result<reqwest::Response> {
        let api_key = self.resolve_api_key()?;

        let mut req = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json");

        for (k, v) in &self.config.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        let response = req.json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Http(e)
            }
        })?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status.as_u16() == 429 {
            let header_ms = parse_retry_after_header(&response);
            let body = response.text().await.unwrap_or_default();

            // Some providers use 429 for exhausted credits/quota, which
            // is not a transient rate limit and should not be retried.
            if is_quota_exhausted(&body) {
                let msg = extract_error_message(&body)
                    .unwrap_or_else(|| "credits exhausted or spending limit reached".into());
                warn!(provider = %self.config.name, "quota exhausted (not retryable)");
                return Err(ProviderError::RequestFailed(msg));
            }

            let retry_ms = header_ms
                .or_else(|| parse_retry_after_ms(&body))
                .unwrap_or(1000);
            warn!(
                provider = %self.config.name,
                retry_after_ms = retry_ms,
                "rate limited"
            );
            return Err(ProviderError::RateLimited {
                retry_after_ms: retry_ms,
            });
        }

        let body = response.text().await.unwrap_or_default();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ProviderError::AuthFailed(body));
        }

        if status.as_u16() == 404 {
            return Err(ProviderError::ModelNotFound(format!(
                "model '{model}': {body}"
            )));
        }

        Err(ProviderError::RequestFailed(format!("HTTP {status}: {body}")))
    }
}

#[async_trait]
impl ChatProvider for OpenAiClient {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.completions_url();

        debug!(
            provider = %self.config.name,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let response = self.post_json(&url, request, &request.model).await?;

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse response: {e}"))
        })?;

        debug!(
            provider = %self.config.name,
            model = %chat_response.model,
            choices = chat_response.choices.len(),
            "chat completion response received"
        );

        Ok(chat_response)
    }
}

#[async_trait]
impl Moderator for OpenAiClient {
    async fn moderate(&self, text: &str) -> Result<ModerationVerdict> {
        let url = self.moderations_url();
        let model = &self.config.moderation_model;

        debug!(
            provider = %self.config.name,
            model = %model,
            chars = text.len(),
            "sending moderation request"
        );

        let body = serde_json::json!({
            "model": model,
            "input": text,
        });

        let response = self.post_json(&url, &body, model).await?;

        let moderation: ModerationResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse moderation response: {e}"))
        })?;

        let flagged = moderation
            .results
            .first()
            .map(|r| r.flagged)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("moderation response had no results".into())
            })?;

        debug!(provider = %self.config.name, flagged, "moderation verdict received");

        Ok(ModerationVerdict {
            flagged,
            text: text.to_string(),
        })
    }
}

/// Check if a 429 response body indicates a permanent quota/credit
/// exhaustion rather than a transient rate limit.
fn is_quota_exhausted(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("exhausted")
        || lower.contains("spending limit")
        || lower.contains("credits")
        || lower.contains("billing")
        || lower.contains("quota exceeded")
        || lower.contains("insufficient_quota")
}

/// Extract a human-readable error message from a JSON error response body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error").and_then(|v| {
        v.get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .or_else(|| v.as_str().map(String::from))
    })
}

/// Try to extract a retry-after value from the HTTP `Retry-After` header.
///
/// The header value can be either seconds (integer or float) or an
/// HTTP-date. Only the numeric form is handled here; HTTP-date is rare
/// for API providers.
fn parse_retry_after_header(response: &reqwest::Response) -> Option<u64> {
    let header_val = response
        .headers()
        .get("retry-after")
        .or_else(|| response.headers().get("x-ratelimit-reset-after"))
        .and_then(|v| v.to_str().ok())?;

    if let Ok(secs) = header_val.parse::<f64>() {
        return Some((secs * 1000.0).max(0.0) as u64);
    }

    None
}

/// Try to extract a retry-after value from a JSON error response body.
fn parse_retry_after_ms(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("retry_after_ms")
        .and_then(|v| v.as_u64())
        .or_else(|| {
            value
                .get("retry_after")
                .and_then(|v| v.as_f64())
                .map(|secs| (secs * 1000.0) as u64)
        })
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("name", &self.config.name)
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> LlmConfig {
        LlmConfig {
            name: "test-provider".into(),
            base_url: "https://api.example.com/v1".into(),
            api_key_env: "TEST_PROVIDER_API_KEY".into(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn new_client() {
        let client = OpenAiClient::new(test_config());
        assert_eq!(client.name(), "test-provider");
        assert!(client.api_key.is_none());
    }

    #[test]
    fn completions_url_construction() {
        let client = OpenAiClient::new(test_config());
        assert_eq!(
            client.completions_url(),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn moderations_url_strips_trailing_slash() {
        let mut config = test_config();
        config.base_url = "https://api.example.com/v1/".into();
        let client = OpenAiClient::new(config);
        assert_eq!(
            client.moderations_url(),
            "https://api.example.com/v1/moderations"
        );
    }

    #[test]
    fn resolve_api_key_explicit() {
        let client = OpenAiClient::with_api_key(test_config(), "sk-explicit".into());
        assert_eq!(client.resolve_api_key().unwrap(), "sk-explicit");
    }

    #[test]
    fn resolve_api_key_missing() {
        let mut config = test_config();
        config.api_key_env = "CAMPUSMATCH_NONEXISTENT_KEY_98765".into();
        let client = OpenAiClient::new(config);
        let err = client.resolve_api_key().unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("CAMPUSMATCH_NONEXISTENT_KEY_98765"));
    }

    #[test]
    fn debug_hides_api_key() {
        let client = OpenAiClient::with_api_key(test_config(), "sk-secret-key".into());
        let debug_str = format!("{client:?}");
        assert!(!debug_str.contains("sk-secret-key"));
        assert!(debug_str.contains("***"));
    }

    #[test]
    fn parse_retry_after_ms_from_ms_field() {
        assert_eq!(parse_retry_after_ms(r#"{"retry_after_ms": 2500}"#), Some(2500));
    }

    #[test]
    fn parse_retry_after_ms_from_seconds_field() {
        assert_eq!(parse_retry_after_ms(r#"{"retry_after": 3.5}"#), Some(3500));
    }

    #[test]
    fn parse_retry_after_ms_missing() {
        assert_eq!(parse_retry_after_ms(r#"{"error": "rate limited"}"#), None);
        assert_eq!(parse_retry_after_ms("not json"), None);
    }

    #[test]
    fn quota_exhaustion_detection() {
        assert!(is_quota_exhausted(r#"{"error":{"message":"insufficient_quota"}}"#));
        assert!(is_quota_exhausted("You have reached your spending limit"));
        assert!(!is_quota_exhausted(r#"{"error":{"message":"too many requests"}}"#));
    }

    #[test]
    fn extract_error_message_openai_format() {
        let body = r#"{"error": {"message": "Rate limited"}}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("Rate limited"));
    }

    #[test]
    fn extract_error_message_string_format() {
        let body = r#"{"error": "plain message"}"#;
        assert_eq!(extract_error_message(body).as_deref(), Some("plain message"));
    }
}
