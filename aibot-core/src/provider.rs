//! Provider identity shared by the session store, the menu builder and the provider registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of providers the bot knows about. The tag (`as_str`) is stable and used in callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    ChatGpt,
    Grok,
    Gemini,
    Perplexity,
    Mistral,
    DeepSeek,
}

impl ProviderId {
    /// All providers in menu order.
    pub const ALL: [ProviderId; 6] = [
        ProviderId::ChatGpt,
        ProviderId::Grok,
        ProviderId::Gemini,
        ProviderId::Perplexity,
        ProviderId::Mistral,
        ProviderId::DeepSeek,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "chatgpt",
            ProviderId::Grok => "grok",
            ProviderId::Gemini => "gemini",
            ProviderId::Perplexity => "perplexity",
            ProviderId::Mistral => "mistral",
            ProviderId::DeepSeek => "deepseek",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::ChatGpt => "ChatGPT",
            ProviderId::Grok => "Grok",
            ProviderId::Gemini => "Gemini",
            ProviderId::Perplexity => "Perplexity",
            ProviderId::Mistral => "Mistral",
            ProviderId::DeepSeek => "DeepSeek",
        }
    }

    pub fn category(&self) -> ProviderCategory {
        match self {
            ProviderId::ChatGpt | ProviderId::Grok | ProviderId::Gemini => {
                ProviderCategory::Assistant
            }
            ProviderId::Perplexity => ProviderCategory::Search,
            ProviderId::Mistral | ProviderId::DeepSeek => ProviderCategory::Simulated,
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProviderId {
    type Err = String;

    /// Parses the lowercase tag; case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ProviderId::ALL
            .into_iter()
            .find(|id| id.as_str() == tag)
            .ok_or_else(|| format!("unknown provider: {}", s))
    }
}

/// Grouping used by the category menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderCategory {
    Assistant,
    Search,
    Simulated,
}

impl ProviderCategory {
    pub const ALL: [ProviderCategory; 3] = [
        ProviderCategory::Assistant,
        ProviderCategory::Search,
        ProviderCategory::Simulated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderCategory::Assistant => "assistant",
            ProviderCategory::Search => "search",
            ProviderCategory::Simulated => "simulated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProviderCategory::Assistant => "Assistants",
            ProviderCategory::Search => "Web search",
            ProviderCategory::Simulated => "Simulated",
        }
    }
}

impl FromStr for ProviderCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ProviderCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_round_trips_through_tag() {
        for id in ProviderId::ALL {
            assert_eq!(id.as_str().parse::<ProviderId>().unwrap(), id);
        }
    }

    #[test]
    fn test_provider_id_parse_is_case_insensitive() {
        assert_eq!("ChatGPT".parse::<ProviderId>().unwrap(), ProviderId::ChatGpt);
        assert_eq!(" grok ".parse::<ProviderId>().unwrap(), ProviderId::Grok);
        assert!("claude-9".parse::<ProviderId>().is_err());
        assert!("".parse::<ProviderId>().is_err());
    }

    #[test]
    fn test_every_category_has_a_provider() {
        for category in ProviderCategory::ALL {
            assert!(ProviderId::ALL.iter().any(|id| id.category() == category));
        }
    }
}
