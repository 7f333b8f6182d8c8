//! Questionnaire session state.
//!
//! [`Session`] tracks a single user's progress through the step-wizard:
//! the current step index and the answers recorded so far, in question
//! order. Answers are append-only; a flagged or empty submission never
//! mutates the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user questionnaire state.
///
/// Invariants maintained by the state machine:
///
/// - `step` never exceeds the number of defined questions.
/// - `responses.len() == step` after every transition -- a key is only
///   recorded for a question that has actually been reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Index of the next question to ask (0-based).
    #[serde(default)]
    pub step: usize,

    /// Recorded `(question key, answer)` pairs, in question order.
    /// Skipped questions are recorded as an empty string.
    #[serde(default)]
    pub responses: Vec<(String, String)>,

    /// When the session was first created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the session was last mutated.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at step 0 with no recorded answers.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            step: 0,
            responses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record an answer for the current question and advance one step.
    ///
    /// Skips are recorded as an empty string so the response list stays
    /// aligned with the question order.
    pub fn record_answer(&mut self, key: impl Into<String>, answer: impl Into<String>) {
        self.responses.push((key.into(), answer.into()));
        self.step += 1;
        self.updated_at = Utc::now();
    }

    /// Look up the recorded answer for a question key, if reached.
    pub fn answer_for(&self, key: &str) -> Option<&str> {
        self.responses
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when every recorded answer is blank (or nothing was recorded).
    pub fn all_blank(&self) -> bool {
        self.responses.iter().all(|(_, v)| v.trim().is_empty())
    }

    /// Reset the session back to its initial state.
    pub fn clear(&mut self) {
        self.step = 0;
        self.responses.clear();
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let s = Session::new();
        assert_eq!(s.step, 0);
        assert!(s.responses.is_empty());
        assert!(s.all_blank());
    }

    #[test]
    fn record_answer_advances_step() {
        let mut s = Session::new();
        s.record_answer("location", "Pune");
        s.record_answer("branch", "");
        assert_eq!(s.step, 2);
        assert_eq!(s.responses.len(), s.step);
        assert_eq!(s.answer_for("location"), Some("Pune"));
        assert_eq!(s.answer_for("branch"), Some(""));
    }

    #[test]
    fn answer_for_unreached_key_is_none() {
        let mut s = Session::new();
        s.record_answer("location", "Delhi");
        assert_eq!(s.answer_for("branch"), None);
    }

    #[test]
    fn all_blank_with_whitespace_answers() {
        let mut s = Session::new();
        s.record_answer("location", "");
        s.record_answer("branch", "   ");
        assert!(s.all_blank());
        s.record_answer("12th Marks Required (%)", "85");
        assert!(!s.all_blank());
    }

    #[test]
    fn clear_resets_state() {
        let mut s = Session::new();
        s.record_answer("location", "Pune");
        s.clear();
        assert_eq!(s.step, 0);
        assert!(s.responses.is_empty());
    }

    #[test]
    fn timestamps_track_mutations() {
        let mut s = Session::new();
        assert_eq!(s.created_at, s.updated_at);

        let created = s.created_at;
        s.record_answer("location", "Pune");
        assert_eq!(s.created_at, created);
        assert!(s.updated_at >= created);

        let before_clear = s.updated_at;
        s.clear();
        assert_eq!(s.created_at, created);
        assert!(s.updated_at >= before_clear);
    }

    #[test]
    fn serde_roundtrip() {
        let mut s = Session::new();
        s.record_answer("location", "Jaipur");
        let json = serde_json::to_string(&s).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.step, 1);
        assert_eq!(restored.answer_for("location"), Some("Jaipur"));
    }
}
