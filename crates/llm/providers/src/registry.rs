//! Provider registry: one optional backend per [`ProviderId`], availability, and the invocation error boundary.

use aibot_core::{ProviderCategory, ProviderId};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

use super::config::ProvidersConfig;
use super::gemini::GeminiProvider;
use super::openai_compat::OpenAiCompatProvider;
use super::simulated::SimulatedProvider;
use super::{Provider, ProviderError};

/// Catalog entry exposed to menus and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub id: ProviderId,
    pub display_name: &'static str,
    pub category: ProviderCategory,
    pub available: bool,
}

/// Immutable after construction. Providers without a backend are unavailable.
pub struct ProviderRegistry {
    backends: HashMap<ProviderId, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Registry with no backends: every provider unavailable.
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Builds one client per configured provider. Missing credentials are logged and leave the provider unavailable.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let mut builder = Self::builder();
        for id in ProviderId::ALL {
            match id {
                ProviderId::ChatGpt | ProviderId::Grok | ProviderId::Perplexity => {
                    let Some(settings) = config.settings(id) else {
                        continue;
                    };
                    let Some(ref api_key) = settings.api_key else {
                        warn!(provider = id.as_str(), "credential missing, provider unavailable");
                        continue;
                    };
                    let client = openai_client::OpenAIClient::with_http_client(
                        api_key.clone(),
                        Some(settings.base_url.clone()),
                        http.clone(),
                    );
                    let provider = OpenAiCompatProvider::new(client, settings.model.clone())
                        .with_system_prompt_opt(config.system_prompt.clone());
                    info!(provider = id.as_str(), model = %settings.model, base_url = %settings.base_url, "provider configured");
                    builder = builder.register(id, Arc::new(provider));
                }
                ProviderId::Gemini => {
                    let settings = &config.gemini;
                    let Some(ref api_key) = settings.api_key else {
                        warn!(provider = id.as_str(), "credential missing, provider unavailable");
                        continue;
                    };
                    let provider = GeminiProvider::new(
                        http.clone(),
                        api_key.clone(),
                        settings.base_url.clone(),
                        settings.model.clone(),
                    )
                    .with_system_instruction_opt(config.system_prompt.clone());
                    info!(provider = id.as_str(), model = %settings.model, "provider configured");
                    builder = builder.register(id, Arc::new(provider));
                }
                ProviderId::Mistral | ProviderId::DeepSeek => {
                    if config.enable_simulated {
                        info!(provider = id.as_str(), "simulated provider enabled");
                        builder = builder.register(id, Arc::new(SimulatedProvider::for_provider(id)));
                    }
                }
            }
        }

        let registry = builder.build();
        info!(
            available = registry.available_count(),
            total = ProviderId::ALL.len(),
            "provider registry ready"
        );
        Ok(registry)
    }

    /// True iff a backend was registered for `id` at startup.
    pub fn is_available(&self, id: ProviderId) -> bool {
        self.backends.contains_key(&id)
    }

    pub fn available_count(&self) -> usize {
        self.backends.len()
    }

    /// All known providers in menu order, with availability.
    pub fn catalog(&self) -> Vec<ProviderInfo> {
        ProviderId::ALL
            .into_iter()
            .map(|id| ProviderInfo {
                id,
                display_name: id.display_name(),
                category: id.category(),
                available: self.is_available(id),
            })
            .collect()
    }

    /// Sends `prompt` to `id`. Never panics or leaks a foreign error type: everything becomes a [`ProviderError`].
    #[instrument(skip(self, prompt), fields(provider = id.as_str(), prompt_len = prompt.len()))]
    pub async fn invoke(&self, id: ProviderId, prompt: &str) -> Result<String, ProviderError> {
        let Some(backend) = self.backends.get(&id) else {
            warn!("invoke on unavailable provider");
            return Err(ProviderError::ConfigurationMissing { provider: id });
        };

        let started = Instant::now();
        let result = backend.complete(prompt).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(text) if text.trim().is_empty() => {
                warn!(elapsed_ms, "provider returned empty response");
                Err(ProviderError::InvocationFailure {
                    provider: id,
                    cause: "empty response".to_string(),
                })
            }
            Ok(text) => {
                info!(elapsed_ms, response_len = text.len(), "provider responded");
                Ok(text)
            }
            Err(e) => {
                for (i, cause) in e.chain().enumerate() {
                    if i == 0 {
                        error!(cause = %cause, elapsed_ms, "provider invocation failed");
                    } else {
                        error!(cause = %cause, "Caused by");
                    }
                }
                Err(ProviderError::InvocationFailure {
                    provider: id,
                    cause: format!("{:#}", e),
                })
            }
        }
    }
}

/// Assembles a registry from explicit backends (tests, custom wiring).
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    backends: HashMap<ProviderId, Arc<dyn Provider>>,
}

impl ProviderRegistryBuilder {
    /// Registers (or replaces) the backend for `id`.
    pub fn register(mut self, id: ProviderId, provider: Arc<dyn Provider>) -> Self {
        self.backends.insert(id, provider);
        self
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            backends: self.backends,
        }
    }
}
