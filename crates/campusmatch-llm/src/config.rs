//! Provider configuration.
//!
//! [`LlmConfig`] describes how to connect to an OpenAI-compatible
//! provider: the base URL, API key environment variable, the model used
//! for chat completions, the model used for moderation, sampling knobs,
//! and any extra headers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for the LLM + moderation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Human-readable provider name (e.g. "openai").
    pub name: String,

    /// Base URL for the OpenAI-compatible API
    /// (e.g. "https://api.openai.com/v1").
    pub base_url: String,

    /// Environment variable that holds the API key.
    pub api_key_env: String,

    /// Model used for chat completion requests.
    pub chat_model: String,

    /// Model used for moderation requests.
    pub moderation_model: String,

    /// Sampling temperature for completions.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Maximum number of tokens to generate.
    #[serde(default)]
    pub max_tokens: Option<i32>,

    /// Request timeout in seconds. Defaults to 120.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extra HTTP headers to include in every request.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for LlmConfig {
    /// The OpenAI configuration the recommender runs with out of the
    /// box: gpt-4o-mini at temperature 0.2 with a 5000-token budget.
    fn default() -> Self {
        Self {
            name: "openai".into(),
            base_url: "https://api.openai.com/v1".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            chat_model: "gpt-4o-mini".into(),
            moderation_model: "omni-moderation-latest".into(),
            temperature: Some(0.2),
            max_tokens: Some(5000),
            timeout_secs: None,
            headers: HashMap::new(),
        }
    }
}

impl LlmConfig {
    /// Effective request timeout.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(120)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tokens, Some(5000));
        assert_eq!(config.timeout_secs(), 120);
    }

    #[test]
    fn serde_roundtrip() {
        let mut config = LlmConfig::default();
        config.headers.insert("x-custom".into(), "value".into());
        config.timeout_secs = Some(30);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: LlmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.base_url, config.base_url);
        assert_eq!(parsed.headers, config.headers);
        assert_eq!(parsed.timeout_secs(), 30);
    }

    #[test]
    fn deserialize_minimal() {
        let json = r#"{
            "name": "local",
            "base_url": "http://localhost:8080/v1",
            "api_key_env": "LOCAL_KEY",
            "chat_model": "test-model",
            "moderation_model": "test-moderation"
        }"#;
        let config: LlmConfig = serde_json::from_str(json).unwrap();
        assert!(config.temperature.is_none());
        assert!(config.max_tokens.is_none());
        assert!(config.headers.is_empty());
        assert_eq!(config.timeout_secs(), 120);
    }
}
