//! Provider configuration loaded from environment variables.
//!
//! A provider whose credential variable is missing or blank stays unavailable; that is never an error.

use aibot_core::ProviderId;
use anyhow::Result;
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_XAI_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_XAI_MODEL: &str = "grok-beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Credential, endpoint and model of one networked provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// None when the credential variable is unset or blank.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl ProviderSettings {
    fn new(base_url: &str, model: &str) -> Self {
        Self {
            api_key: None,
            base_url: base_url.to_string(),
            model: model.to_string(),
        }
    }

    /// Reads `<key_var>`, `<prefix>_BASE_URL` and `<prefix>_MODEL`, falling back to the given defaults.
    fn from_env(key_var: &str, prefix: &str, base_url: &str, model: &str) -> Self {
        Self {
            api_key: env_non_empty(key_var),
            base_url: env_non_empty(&format!("{}_BASE_URL", prefix))
                .unwrap_or_else(|| base_url.to_string()),
            model: env_non_empty(&format!("{}_MODEL", prefix)).unwrap_or_else(|| model.to_string()),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Configuration of every provider, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    pub openai: ProviderSettings,
    pub xai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub perplexity: ProviderSettings,
    /// ENABLE_SIMULATED_PROVIDERS; makes the constant-reply providers available.
    pub enable_simulated: bool,
    /// LLM_SYSTEM_PROMPT or SYSTEM_PROMPT; sent ahead of every prompt when set.
    pub system_prompt: Option<String>,
    /// PROVIDER_TIMEOUT_SECS; transport timeout of the shared HTTP client.
    pub timeout_secs: u64,
}

impl Default for ProvidersConfig {
    /// No credentials, default endpoints and models.
    fn default() -> Self {
        Self {
            openai: ProviderSettings::new(DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL),
            xai: ProviderSettings::new(DEFAULT_XAI_BASE_URL, DEFAULT_XAI_MODEL),
            gemini: ProviderSettings::new(DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL),
            perplexity: ProviderSettings::new(DEFAULT_PERPLEXITY_BASE_URL, DEFAULT_PERPLEXITY_MODEL),
            enable_simulated: false,
            system_prompt: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProvidersConfig {
    /// Load from environment variables. Never fails on missing credentials.
    pub fn from_env() -> Self {
        Self {
            openai: ProviderSettings::from_env(
                "OPENAI_API_KEY",
                "OPENAI",
                DEFAULT_OPENAI_BASE_URL,
                DEFAULT_OPENAI_MODEL,
            ),
            xai: ProviderSettings::from_env("XAI_API_KEY", "XAI", DEFAULT_XAI_BASE_URL, DEFAULT_XAI_MODEL),
            gemini: ProviderSettings::from_env(
                "GEMINI_API_KEY",
                "GEMINI",
                DEFAULT_GEMINI_BASE_URL,
                DEFAULT_GEMINI_MODEL,
            ),
            perplexity: ProviderSettings::from_env(
                "PERPLEXITY_API_KEY",
                "PERPLEXITY",
                DEFAULT_PERPLEXITY_BASE_URL,
                DEFAULT_PERPLEXITY_MODEL,
            ),
            enable_simulated: env_non_empty("ENABLE_SIMULATED_PROVIDERS")
                .map(|s| parse_bool(&s))
                .unwrap_or(false),
            system_prompt: env_non_empty("LLM_SYSTEM_PROMPT").or_else(|| env_non_empty("SYSTEM_PROMPT")),
            timeout_secs: env_non_empty("PROVIDER_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Settings of a networked provider; None for simulated ones.
    pub fn settings(&self, id: ProviderId) -> Option<&ProviderSettings> {
        match id {
            ProviderId::ChatGpt => Some(&self.openai),
            ProviderId::Grok => Some(&self.xai),
            ProviderId::Gemini => Some(&self.gemini),
            ProviderId::Perplexity => Some(&self.perplexity),
            ProviderId::Mistral | ProviderId::DeepSeek => None,
        }
    }

    /// Rejects base URLs that do not parse.
    pub fn validate(&self) -> Result<()> {
        for id in ProviderId::ALL {
            if let Some(settings) = self.settings(id) {
                if reqwest::Url::parse(&settings.base_url).is_err() {
                    anyhow::bail!(
                        "{} base URL is not a valid URL: {}",
                        id.display_name(),
                        settings.base_url
                    );
                }
            }
        }
        Ok(())
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
