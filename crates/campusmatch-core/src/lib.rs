//! Conversation core for the campusmatch college recommender.
//!
//! This crate orchestrates the two interaction modes over a shared,
//! normalized dataset:
//!
//! - **[`wizard`]** / **[`flow`]** -- the step-indexed questionnaire
//!   state machine and its session-store-keyed front
//! - **[`chat`]** -- the single-turn freeform chat orchestrator
//! - **[`dataset`]** -- CSV ingestion and normalization into the
//!   canonical table shared (read-only) by both modes
//! - **[`prompt`]** -- prompt construction from collected preferences
//!   and dataset samples
//! - **[`parser`]** -- extraction of structured recommendations from
//!   loosely-formatted model output
//! - **[`engine`]** -- the recommendation pipeline (prompt -> LLM ->
//!   parse)
//! - **[`store`]** -- the injectable session store contract
//!
//! All matching intelligence is delegated to the external model; this
//! layer manages conversational state, sanitizes inputs and outputs,
//! and keeps the dataset representation consistent.

pub mod chat;
pub mod dataset;
pub mod engine;
pub mod flow;
pub mod parser;
pub mod prompt;
pub mod store;
pub mod wizard;

pub use chat::ChatBot;
pub use dataset::CanonicalTable;
pub use engine::RecommendationEngine;
pub use flow::{FlowResponse, WizardFlow};
pub use store::{MemorySessionStore, SessionStore};
pub use wizard::{SubmitOutcome, Wizard, WizardStep};
