//! The recommendation pipeline: prompt, model call, parse.
//!
//! [`RecommendationEngine`] turns a completed questionnaire into a
//! [`Recommendation`]. It short-circuits when every answer is blank
//! (no model call is made), and degrades undecodable model output to
//! [`Recommendation::NoMatches`] rather than erroring.

use std::sync::Arc;

use tracing::{debug, warn};

use campusmatch_llm::{ChatMessage, ChatProvider, ChatRequest, LlmConfig};
use campusmatch_types::{MatchError, Recommendation, Result, Session};

use crate::dataset::CanonicalTable;
use crate::parser;
use crate::prompt;

/// Rows of the dataset included in the wizard system prompt.
const DEFAULT_SAMPLE_ROWS: usize = 10;

/// Produces recommendations from collected questionnaire answers.
pub struct RecommendationEngine {
    provider: Arc<dyn ChatProvider>,
    table: Arc<CanonicalTable>,
    config: LlmConfig,
    sample_rows: usize,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn ChatProvider>, table: Arc<CanonicalTable>, config: LlmConfig) -> Self {
        Self {
            provider,
            table,
            config,
            sample_rows: DEFAULT_SAMPLE_ROWS,
        }
    }

    /// Override the number of dataset rows sampled into the prompt.
    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }

    /// Run the pipeline over a completed session.
    ///
    /// An all-blank session yields [`Recommendation::NoInput`] without
    /// touching the model. Provider failures surface as
    /// [`MatchError::Provider`].
    pub async fn recommend(&self, session: &Session) -> Result<Recommendation> {
        if session.all_blank() {
            debug!("all answers blank, skipping model call");
            return Ok(Recommendation::NoInput);
        }

        let sample = self.table.sample_json(self.sample_rows)?;
        let request = ChatRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage::system(prompt::wizard_system_prompt(&sample)),
                ChatMessage::user(prompt::preference_prompt(session)),
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
        let records = parser::parse_records(raw);

        if records.is_empty() {
            warn!(chars = raw.len(), "no decodable recommendations in model output");
            return Ok(Recommendation::NoMatches);
        }

        debug!(count = records.len(), "recommendations parsed");
        Ok(Recommendation::Colleges(records))
    }
}

impl std::fmt::Debug for RecommendationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine")
            .field("provider", &self.provider.name())
            .field("rows", &self.table.len())
            .field("sample_rows", &self.sample_rows)
            .finish()
    }
}
