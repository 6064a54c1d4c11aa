//! # OpenAI-compatible chat client
//!
//! Thin wrapper around [async-openai] for single-shot chat completion against any OpenAI-compatible
//! endpoint (OpenAI itself, xAI's Grok, Perplexity). Provides token masking for safe logging.

use async_openai::{types::CreateChatCompletionRequestArgs, Client};
use backoff::ExponentialBackoff;
use std::sync::Arc;
use std::time::Duration;

pub use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Backoff that never schedules a retry: a 429 or 5xx reply fails the request on the first attempt.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoff {
        max_elapsed_time: Some(Duration::ZERO),
        ..Default::default()
    }
}

/// Chat client for one OpenAI-compatible endpoint. Cheap to clone; the inner client is shared.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    /// Already masked; never holds the raw key.
    masked_key: String,
    base_url: Option<String>,
}

impl OpenAIClient {
    /// Builds a client with a custom base URL (xAI, Perplexity, proxies, test servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::build(api_key, Some(base_url), None)
    }

    /// Builds a client with an optional base URL on top of a preconfigured reqwest client (timeouts, proxies).
    pub fn with_http_client(
        api_key: String,
        base_url: Option<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self::build(api_key, base_url, Some(http_client))
    }

    fn build(
        api_key: String,
        base_url: Option<String>,
        http_client: Option<reqwest::Client>,
    ) -> Self {
        let masked_key = mask_token(&api_key);
        let mut config = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(ref url) = base_url {
            config = config.with_api_base(url.trim_end_matches('/'));
        }
        let mut client = Client::with_config(config).with_backoff(single_attempt());
        if let Some(http) = http_client {
            client = client.with_http_client(http);
        }
        Self {
            client: Arc::new(client),
            masked_key,
            base_url,
        }
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs masked API key, message count and token usage. Errors when the response has no choices.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key,
            base_url = %self.base_url.as_deref().unwrap_or("default"),
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => anyhow::bail!("No choices in chat completion response"),
        }
    }

    /// Sends a single user prompt (optionally preceded by a system prompt) and returns the reply text.
    pub async fn complete_prompt(
        &self,
        model: &str,
        system_prompt: Option<&str>,
        prompt: &str,
    ) -> anyhow::Result<String> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.to_string())
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()?
                .into(),
        );
        self.chat_completion(model, messages).await
    }
}
