//! [`Provider`] for OpenAI-compatible chat endpoints (ChatGPT, Grok, Perplexity): wraps openai-client.

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use super::Provider;

/// One OpenAI-compatible endpoint + model, with an optional system prompt.
#[derive(Clone)]
pub struct OpenAiCompatProvider {
    client: openai_client::OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAiCompatProvider {
    pub fn new(client: openai_client::OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.client
            .complete_prompt(&self.model, self.system_prompt.as_deref(), prompt)
            .await
    }
}
