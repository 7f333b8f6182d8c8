//! The questionnaire state machine.
//!
//! [`Wizard`] is the pure transition function over a [`Session`]: given
//! the current step and a submission, it either retries the current
//! question (empty or flagged input), advances to the next one, or
//! finishes and runs the recommendation pipeline.
//!
//! Transition rules:
//!
//! - A skip always bypasses moderation and records the submitted text
//!   verbatim (empty when none was given).
//! - A non-skip answer must be non-empty and pass moderation before it
//!   is recorded; a retry outcome never mutates the session.
//! - A moderation transport failure is an error, never a clean verdict.
//! - Submitting past the final step is an invalid-state error.

use std::sync::Arc;

use tracing::{debug, warn};

use campusmatch_llm::Moderator;
use campusmatch_types::{
    MatchError, QuestionSet, Recommendation, Result, Session, EMPTY_ANSWER_MESSAGE,
    FLAGGED_MESSAGE,
};

use crate::engine::RecommendationEngine;

/// A question presented to the user, with its position in the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardStep {
    /// Stable answer key for this question.
    pub key: String,

    /// User-facing prompt text.
    pub prompt: String,

    /// 0-based index of this question.
    pub step: usize,

    /// Total number of questions.
    pub total: usize,
}

/// The result of one submission.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The input was rejected; ask the same question again with this
    /// message. The session was not mutated.
    Retry { message: &'static str },

    /// The answer was recorded; present the next question.
    NextQuestion(WizardStep),

    /// The final answer was recorded and the pipeline ran.
    Finished(Recommendation),
}

/// The questionnaire state machine.
pub struct Wizard {
    questions: QuestionSet,
    moderator: Arc<dyn Moderator>,
    engine: RecommendationEngine,
}

impl Wizard {
    pub fn new(questions: QuestionSet, moderator: Arc<dyn Moderator>, engine: RecommendationEngine) -> Self {
        Self {
            questions,
            moderator,
            engine,
        }
    }

    /// Total number of questions.
    pub fn total_steps(&self) -> usize {
        self.questions.len()
    }

    /// The question the session is currently waiting on, or `None` when
    /// every question has been answered.
    pub fn current_question(&self, session: &Session) -> Option<WizardStep> {
        self.questions.get(session.step).map(|q| WizardStep {
            key: q.key.clone(),
            prompt: q.prompt.clone(),
            step: session.step,
            total: self.questions.len(),
        })
    }

    /// Apply one submission to the session.
    ///
    /// On `Err`, the session is guaranteed unmutated, so callers can
    /// retry the same step after a transient failure.
    pub async fn submit(
        &self,
        session: &mut Session,
        answer: Option<&str>,
        skip: bool,
    ) -> Result<SubmitOutcome> {
        let question = self.questions.get(session.step).ok_or_else(|| {
            MatchError::InvalidSessionState {
                reason: format!(
                    "step {} out of range for {} questions",
                    session.step,
                    self.questions.len()
                ),
            }
        })?;
        let key = question.key.clone();

        let recorded: String = if skip {
            // Skips bypass moderation entirely; any accompanying text is
            // recorded verbatim.
            answer.unwrap_or_default().to_string()
        } else {
            let text = answer.unwrap_or_default();
            if text.trim().is_empty() {
                debug!(step = session.step, "empty submission, retrying");
                return Ok(SubmitOutcome::Retry {
                    message: EMPTY_ANSWER_MESSAGE,
                });
            }

            let verdict = self.moderator.moderate(text).await.map_err(|e| {
                MatchError::ModerationUnavailable {
                    reason: e.to_string(),
                }
            })?;
            if verdict.flagged {
                warn!(step = session.step, "submission flagged by moderation");
                return Ok(SubmitOutcome::Retry {
                    message: FLAGGED_MESSAGE,
                });
            }
            text.to_string()
        };

        session.record_answer(key, recorded);

        if session.step < self.questions.len() {
            // current_question is Some while steps remain
            return match self.current_question(session) {
                Some(step) => Ok(SubmitOutcome::NextQuestion(step)),
                None => Err(MatchError::InvalidSessionState {
                    reason: "question set changed mid-session".into(),
                }),
            };
        }

        debug!(answers = session.responses.len(), "questionnaire complete");
        let recommendation = self.engine.recommend(session).await?;
        Ok(SubmitOutcome::Finished(recommendation))
    }
}

impl std::fmt::Debug for Wizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wizard")
            .field("questions", &self.questions.len())
            .finish()
    }
}
