//! # LLM providers
//!
//! Defines the [`Provider`] trait (text prompt in, text out) and its backends: OpenAI-compatible
//! chat endpoints (ChatGPT, Grok, Perplexity), the Gemini REST API and constant-reply simulated
//! providers. [`ProviderRegistry`] owns one backend per configured provider and is the error
//! boundary: every failure leaves it as a [`ProviderError`].

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod error;
mod gemini;
mod openai_compat;
mod registry;
mod simulated;

pub use config::{ProviderSettings, ProvidersConfig};
pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use registry::{ProviderInfo, ProviderRegistry, ProviderRegistryBuilder};
pub use simulated::SimulatedProvider;

pub use aibot_core::{ProviderCategory, ProviderId};

/// A text-generation backend. Model, endpoint and credentials are backend configuration.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Sends one prompt and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
