//! Minimal transport config: token, API URL, log path.
//! Loaded from BOT_TOKEN (or TELEGRAM_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL) and LOG_FILE.

use anyhow::Result;
use std::env;
use tracing::error;

/// Telegram connectivity and logging config.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TelegramConfig {
    /// Loads from environment: a bot token is required, the rest is optional.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`TelegramConfig::from_env`], with `token` (when non-blank) taking precedence over BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .or_else(|| env_non_empty("BOT_TOKEN"))
            .or_else(|| env_non_empty("TELEGRAM_TOKEN"))
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN (or TELEGRAM_TOKEN) not set"))?;
        Ok(Self {
            bot_token,
            telegram_api_url: env_non_empty("TELEGRAM_API_URL")
                .or_else(|| env_non_empty("TELOXIDE_API_URL")),
            log_file: env_non_empty("LOG_FILE"),
        })
    }

    /// Builds with the given token; everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Rejects an API URL that does not parse.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.telegram_api_url {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("TELEGRAM_API_URL is not a valid URL: {}", url);
            }
        }
        Ok(())
    }

    /// teloxide Bot for this token, pointed at the custom API URL when one is set.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}
