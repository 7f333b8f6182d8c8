//! Session-store-keyed wizard front.
//!
//! [`WizardFlow`] wraps the pure [`Wizard`] state machine with keyed
//! persistence: it lazily creates sessions, persists only successful
//! transitions, clears completed sessions so the next submission starts
//! fresh, and recovers from corrupted session state by restarting.

use std::sync::Arc;

use tracing::{debug, warn};

use campusmatch_types::{MatchError, Recommendation, Result, Session};

use crate::store::SessionStore;
use crate::wizard::{SubmitOutcome, Wizard, WizardStep};

/// What the caller should present after a flow operation.
#[derive(Debug, Clone)]
pub enum FlowResponse {
    /// Ask (or re-ask) this question, optionally with a notice about
    /// why the previous submission was not accepted.
    Question {
        step: WizardStep,
        message: Option<String>,
    },

    /// The questionnaire finished. The session has been cleared.
    Finished {
        recommendation: Recommendation,
        responses: Vec<(String, String)>,
    },
}

/// Keyed, persistent questionnaire flow.
pub struct WizardFlow {
    store: Arc<dyn SessionStore>,
    wizard: Wizard,
}

impl WizardFlow {
    pub fn new(store: Arc<dyn SessionStore>, wizard: Wizard) -> Self {
        Self { store, wizard }
    }

    /// The question currently waiting for this session id, creating the
    /// session if none exists.
    pub fn current(&self, id: &str) -> Result<FlowResponse> {
        let session = match self.store.get(id) {
            Some(s) => s,
            None => {
                let fresh = Session::new();
                self.store.put(id, fresh.clone());
                fresh
            }
        };

        match self.wizard.current_question(&session) {
            Some(step) => Ok(FlowResponse::Question {
                step,
                message: None,
            }),
            // A stored session pointing past the end should have been
            // cleared at completion; restart it.
            None => {
                warn!(id, "stored session past final step, restarting");
                self.restart(id)
            }
        }
    }

    /// Apply one submission for this session id.
    ///
    /// Only successful transitions are persisted. A moderation outage
    /// re-asks the current question with an explanatory notice instead
    /// of failing the whole flow; corrupted session state restarts the
    /// questionnaire.
    pub async fn submit(&self, id: &str, answer: Option<&str>, skip: bool) -> Result<FlowResponse> {
        let mut session = self.store.get(id).unwrap_or_default();

        match self.wizard.submit(&mut session, answer, skip).await {
            Ok(SubmitOutcome::Retry { message }) => {
                let step = self.require_step(&session)?;
                Ok(FlowResponse::Question {
                    step,
                    message: Some(message.to_string()),
                })
            }
            Ok(SubmitOutcome::NextQuestion(step)) => {
                self.store.put(id, session);
                Ok(FlowResponse::Question {
                    step,
                    message: None,
                })
            }
            Ok(SubmitOutcome::Finished(recommendation)) => {
                debug!(
                    id,
                    started_at = %session.created_at,
                    "questionnaire finished, clearing session"
                );
                self.store.clear(id);
                Ok(FlowResponse::Finished {
                    recommendation,
                    responses: session.responses,
                })
            }
            Err(MatchError::ModerationUnavailable { reason }) => {
                warn!(id, %reason, "moderation unavailable, re-asking");
                let step = self.require_step(&session)?;
                Ok(FlowResponse::Question {
                    step,
                    message: Some(format!("Moderation check failed: {reason}")),
                })
            }
            Err(MatchError::InvalidSessionState { reason }) => {
                warn!(
                    id,
                    %reason,
                    last_activity = %session.updated_at,
                    "invalid session state, restarting"
                );
                self.restart(id)
            }
            Err(e) => Err(e),
        }
    }

    /// Discard any stored session and start over. Idempotent.
    pub fn restart(&self, id: &str) -> Result<FlowResponse> {
        self.store.clear(id);
        let fresh = Session::new();
        let step = self.require_step(&fresh)?;
        self.store.put(id, fresh);
        Ok(FlowResponse::Question {
            step,
            message: None,
        })
    }

    fn require_step(&self, session: &Session) -> Result<WizardStep> {
        self.wizard
            .current_question(session)
            .ok_or_else(|| MatchError::InvalidSessionState {
                reason: "no current question for session".into(),
            })
    }
}

impl std::fmt::Debug for WizardFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardFlow")
            .field("wizard", &self.wizard)
            .finish()
    }
}
