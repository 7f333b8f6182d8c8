//! The questionnaire definition.
//!
//! [`QuestionSet`] is an ordered, immutable sequence of `(key, prompt)`
//! pairs fixed at process start. It defines both the iteration order of
//! the step-wizard and the total step count used by the session state
//! machine.

use serde::{Deserialize, Serialize};

/// A single questionnaire entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key under which the answer is recorded (e.g. "location").
    pub key: String,

    /// User-facing prompt text.
    pub prompt: String,
}

impl Question {
    /// Create a question from a key and prompt.
    pub fn new(key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prompt: prompt.into(),
        }
    }
}

/// An ordered, immutable set of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Build a question set from an explicit list.
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in preference questionnaire: preferred location,
    /// preferred branch, and 12th-board marks.
    pub fn standard() -> Self {
        Self::new(vec![
            Question::new("location", "Preferred Location (e.g., Delhi, Pune, Bangalore): "),
            Question::new("branch", "Preferred Branch (e.g., CSE, Mechanical): "),
            Question::new("12th Marks Required (%)", "Your 12th board marks (%): "),
        ])
    }

    /// Number of questions (== the wizard's total step count).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the set contains no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at the given step, if any.
    pub fn get(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    /// Iterate over the questions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::standard()
    }
}
