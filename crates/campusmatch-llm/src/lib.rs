//! LLM provider abstraction for campusmatch.
//!
//! This crate provides a unified interface for the two external calls
//! the conversation core makes: chat completion and content moderation.
//! Both are exposed as single-method capability traits so the core can
//! be tested without any live network dependency.
//!
//! # Architecture
//!
//! - [`ChatProvider`] trait defines the chat completion interface
//! - [`Moderator`] trait defines the moderation interface
//! - [`OpenAiClient`] implements both for any OpenAI-compatible API
//! - [`LlmConfig`] describes how to connect to a provider
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use campusmatch_llm::{ChatMessage, ChatRequest, ChatProvider, LlmConfig, OpenAiClient};
//!
//! let client = OpenAiClient::new(LlmConfig::default());
//! let request = ChatRequest::new("gpt-4o-mini", vec![
//!     ChatMessage::system("You are a helpful college recommendation assistant."),
//!     ChatMessage::user("Colleges in Pune for CSE?"),
//! ]);
//! let response = client.complete(&request).await?;
//! println!("{}", response.choices[0].message.content);
//! ```

pub mod config;
pub mod error;
pub mod openai;
pub mod provider;
pub mod types;

pub use config::LlmConfig;
pub use error::{ProviderError, Result};
pub use openai::OpenAiClient;
pub use provider::{ChatProvider, Moderator};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, ModerationVerdict, Usage};
