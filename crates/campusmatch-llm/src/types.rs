//! Request and response types for chat completion and moderation calls.
//!
//! These types mirror the OpenAI API format, which has become the de
//! facto standard across providers. They are standalone and have no
//! dependency on other campusmatch crates.

use serde::{Deserialize, Serialize};

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The role of the message author ("system", "user", "assistant").
    pub role: String,

    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Create a message with role and content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The model identifier (e.g. "gpt-4o-mini").
    pub model: String,

    /// The conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,

    /// Sampling temperature (0.0 = deterministic).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl ChatRequest {
    /// Create a minimal chat request with a model and messages.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }
}

/// A chat completion response (OpenAI format).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    pub id: String,

    /// The list of completion choices.
    pub choices: Vec<Choice>,

    /// Token usage statistics, if available.
    pub usage: Option<Usage>,

    /// The model that generated the response.
    pub model: String,
}

impl ChatResponse {
    /// The text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single completion choice within a response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Choice {
    /// The index of this choice in the list.
    pub index: i32,

    /// The assistant's response message.
    pub message: ChatMessage,

    /// Why generation stopped (e.g. "stop", "length").
    pub finish_reason: Option<String>,
}

/// Token usage statistics for a completion request.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Usage {
    /// Number of tokens in the prompt.
    pub prompt_tokens: i32,

    /// Number of tokens in the generated completion.
    pub completion_tokens: i32,

    /// Total tokens used (prompt + completion).
    pub total_tokens: i32,
}

/// A moderation decision for a single piece of user text.
///
/// Ephemeral: produced and consumed within one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModerationVerdict {
    /// True when the content should not be processed further.
    pub flagged: bool,

    /// The text that was checked.
    pub text: String,
}

/// Wire format of a moderation response (OpenAI `/moderations`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModerationResponse {
    /// Per-input moderation outcomes; one entry per input string.
    pub results: Vec<ModerationOutcome>,
}

/// A single moderation outcome within a response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModerationOutcome {
    /// Whether the input violates the provider's content policy.
    pub flagged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_helpers() {
        let sys = ChatMessage::system("You are helpful.");
        assert_eq!(sys.role, "system");
        assert_eq!(sys.content, "You are helpful.");

        assert_eq!(ChatMessage::user("Hi").role, "user");
        assert_eq!(ChatMessage::assistant("Hello").role, "assistant");
    }

    #[test]
    fn chat_request_skips_none_fields() {
        let req = ChatRequest::new("gpt-4o-mini", vec![ChatMessage::user("Hi")]);
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""model":"gpt-4o-mini""#));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn chat_request_with_all_fields() {
        let req = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("test")],
            max_tokens: Some(5000),
            temperature: Some(0.2),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains(r#""max_tokens":5000"#));
        assert!(json.contains(r#""temperature":0.2"#));
    }

    #[test]
    fn chat_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-abc123",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15},
            "model": "gpt-4o-mini"
        }"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.id, "chatcmpl-abc123");
        assert_eq!(resp.first_content(), Some("Hello!"));
        assert_eq!(resp.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn first_content_empty_choices() {
        let json = r#"{"id": "x", "choices": [], "usage": null, "model": "m"}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn moderation_response_deserialization() {
        let json = r#"{
            "id": "modr-1",
            "model": "omni-moderation-latest",
            "results": [{"flagged": true, "categories": {"harassment": true}}]
        }"#;
        let resp: ModerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert!(resp.results[0].flagged);
    }
}
