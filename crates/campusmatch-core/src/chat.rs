//! The freeform chat orchestrator.
//!
//! [`ChatBot`] handles single-turn messages: moderate the input, build
//! a system prompt carrying the full dataset, call the model, and
//! render the output for display. Unlike the questionnaire pipeline,
//! undecodable model output is passed through verbatim so a
//! conversational answer survives.

use std::sync::Arc;

use tracing::{debug, warn};

use campusmatch_llm::{ChatMessage, ChatProvider, ChatRequest, LlmConfig, Moderator};
use campusmatch_types::{MatchError, Result, FLAGGED_MESSAGE};

use crate::dataset::CanonicalTable;
use crate::parser;
use crate::prompt;

/// Single-turn chat over the full dataset.
pub struct ChatBot {
    provider: Arc<dyn ChatProvider>,
    moderator: Arc<dyn Moderator>,
    table: Arc<CanonicalTable>,
    config: LlmConfig,
}

impl ChatBot {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        moderator: Arc<dyn Moderator>,
        table: Arc<CanonicalTable>,
        config: LlmConfig,
    ) -> Self {
        Self {
            provider,
            moderator,
            table,
            config,
        }
    }

    /// Respond to one user message with display-ready text.
    ///
    /// A flagged message short-circuits to the moderation warning; the
    /// model is never consulted. Moderation transport failure is an
    /// error, not a clean verdict.
    pub async fn respond(&self, message: &str) -> Result<String> {
        let verdict = self.moderator.moderate(message).await.map_err(|e| {
            MatchError::ModerationUnavailable {
                reason: e.to_string(),
            }
        })?;
        if verdict.flagged {
            warn!("chat message flagged by moderation");
            return Ok(FLAGGED_MESSAGE.to_string());
        }

        let dataset = self.table.full_json()?;
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage::system(prompt::chat_system_prompt(&dataset)),
                ChatMessage::user(message),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .provider
            .complete(&request)
            .await
            .map_err(|e| MatchError::Provider {
                message: e.to_string(),
            })?;

        let raw = response.first_content().unwrap_or_default();
        debug!(chars = raw.len(), "chat response received");
        Ok(parser::render_display(raw))
    }
}

impl std::fmt::Debug for ChatBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatBot")
            .field("provider", &self.provider.name())
            .field("rows", &self.table.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use campusmatch_llm::{ChatResponse, ModerationVerdict, ProviderError};
    use campusmatch_types::NO_MATCHES_MESSAGE;

    struct FakeModerator {
        flagged: bool,
    }

    #[async_trait]
    impl Moderator for FakeModerator {
        async fn moderate(
            &self,
            text: &str,
        ) -> std::result::Result<ModerationVerdict, ProviderError> {
            Ok(ModerationVerdict {
                flagged: self.flagged,
                text: text.to_string(),
            })
        }
    }

    struct DownModerator;

    #[async_trait]
    impl Moderator for DownModerator {
        async fn moderate(
            &self,
            _text: &str,
        ) -> std::result::Result<ModerationVerdict, ProviderError> {
            Err(ProviderError::Timeout)
        }
    }

    struct CountingProvider {
        reply: String,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ChatProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        async fn complete(
            &self,
            request: &ChatRequest,
        ) -> std::result::Result<ChatResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(serde_json::json!({
                "id": "test",
                "model": request.model,
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": self.reply},
                    "finish_reason": "stop"
                }],
                "usage": null
            }))
            .unwrap())
        }
    }

    fn table() -> Arc<CanonicalTable> {
        let csv = "College,Type,Location,Rank,Branches,Highest Package (INR),Average Package (INR),Annual Tuition Fees (INR),Annual Hostel Fees (INR),Student Satisfaction (/10),Hostel,Facilities,Placements,Scholarships,Exams,Cutoff,12th Marks Required (%)\n\
                   MIT Pune,Private,Pune,34,CSE,1800000,6.2,650000,120000,8.2,Available,Labs,Strong,Merit,JEE,88,75\n";
        Arc::new(CanonicalTable::from_reader(csv.as_bytes()).unwrap())
    }

    fn bot(provider: Arc<CountingProvider>, moderator: Arc<dyn Moderator>) -> ChatBot {
        ChatBot::new(provider, moderator, table(), LlmConfig::default())
    }

    #[tokio::test]
    async fn renders_records_as_table() {
        let provider = CountingProvider::new(
            "```json\n[{\"College\": \"MIT Pune\", \"Location\": \"Pune\"}]\n```",
        );
        let b = bot(provider, Arc::new(FakeModerator { flagged: false }));

        let reply = b.respond("colleges in Pune for CSE").await.unwrap();
        assert!(reply.contains("MIT Pune"));
        assert!(reply.contains("College"));
    }

    #[tokio::test]
    async fn flagged_message_never_reaches_model() {
        let provider = CountingProvider::new("[]");
        let b = bot(provider.clone(), Arc::new(FakeModerator { flagged: true }));

        let reply = b.respond("something awful").await.unwrap();
        assert_eq!(reply, FLAGGED_MESSAGE);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn moderation_failure_is_an_error() {
        let provider = CountingProvider::new("[]");
        let b = ChatBot::new(
            provider.clone(),
            Arc::new(DownModerator),
            table(),
            LlmConfig::default(),
        );

        let err = b.respond("colleges in Pune").await.unwrap_err();
        assert!(matches!(err, MatchError::ModerationUnavailable { .. }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn prose_reply_passes_through() {
        let provider = CountingProvider::new("Pune has several good options for CSE.");
        let b = bot(provider, Arc::new(FakeModerator { flagged: false }));

        let reply = b.respond("tell me about Pune").await.unwrap();
        assert_eq!(reply, "Pune has several good options for CSE.");
    }

    #[tokio::test]
    async fn empty_reply_is_no_matches() {
        let provider = CountingProvider::new("");
        let b = bot(provider, Arc::new(FakeModerator { flagged: false }));

        let reply = b.respond("colleges on the moon").await.unwrap();
        assert_eq!(reply, NO_MATCHES_MESSAGE);
    }

    #[tokio::test]
    async fn system_prompt_carries_full_dataset() {
        let provider = CountingProvider::new("[]");
        let b = bot(provider.clone(), Arc::new(FakeModerator { flagged: false }));

        b.respond("anything").await.unwrap();
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
