//! Subcommand implementations.

pub mod chat;
pub mod data;
pub mod wizard;

use std::sync::Arc;

use campusmatch_core::CanonicalTable;
use campusmatch_llm::{LlmConfig, OpenAiClient};

/// Load and normalize the dataset CSV, surfacing a friendly error.
pub fn load_table(path: &str) -> anyhow::Result<Arc<CanonicalTable>> {
    let table = CanonicalTable::load_csv(path)
        .map_err(|e| anyhow::anyhow!("failed to load dataset '{path}': {e}"))?;
    if table.is_empty() {
        anyhow::bail!("dataset '{path}' has no rows");
    }
    Ok(Arc::new(table))
}

/// Build the provider client from CLI overrides on top of the default
/// OpenAI configuration.
pub fn build_client(model: Option<&str>, base_url: Option<&str>) -> Arc<OpenAiClient> {
    let mut config = LlmConfig::default();
    if let Some(model) = model {
        config.chat_model = model.to_string();
    }
    if let Some(base_url) = base_url {
        config.base_url = base_url.to_string();
    }
    Arc::new(OpenAiClient::new(config))
}
