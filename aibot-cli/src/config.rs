//! Bot configuration: BaseConfig (Telegram, log, relay texts, allowlist) + ProvidersConfig (LLM backends).

use aibot_telegram::TelegramConfig;
use anyhow::{Context, Result};
use llm_providers::ProvidersConfig;
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/aibot.log";

/// Base config: Telegram connection, logging, relay placeholder and user allowlist.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    pub telegram: TelegramConfig,
    /// LOG_FILE
    pub log_file: String,
    /// THINKING_MESSAGE; placeholder shown while a provider works
    pub thinking_message: String,
    /// ALLOWED_USERS, comma-separated user ids; empty admits everyone
    pub allowed_users: Vec<i64>,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::load(token)?;
        let log_file = telegram
            .log_file
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let thinking_message = env::var("THINKING_MESSAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| relay::messages::DEFAULT_THINKING_MESSAGE.to_string());
        let allowed_users = parse_allowed_users(&env::var("ALLOWED_USERS").unwrap_or_default())?;

        Ok(Self {
            telegram,
            log_file,
            thinking_message,
            allowed_users,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()
    }
}

/// Parses `"1, 2,3"`; blank input means no restriction.
pub fn parse_allowed_users(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ALLOWED_USERS entry is not a user id: {}", s))
        })
        .collect()
}

/// Full configuration of the `run` command.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub providers: ProvidersConfig,
}

impl BotConfig {
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            providers: ProvidersConfig::from_env(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.providers.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "BOT_TOKEN",
        "TELEGRAM_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "THINKING_MESSAGE",
        "ALLOWED_USERS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "123:abc");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.base.telegram.bot_token, "123:abc");
        assert_eq!(config.base.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.base.thinking_message, "Thinking...");
        assert!(config.base.allowed_users.is_empty());
        assert!(config.validate().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_reads_overrides() {
        clear_env();
        env::set_var("TELEGRAM_TOKEN", "456:def");
        env::set_var("LOG_FILE", "/tmp/aibot-test.log");
        env::set_var("THINKING_MESSAGE", "One moment...");
        env::set_var("ALLOWED_USERS", "10, 20");

        let config = BaseConfig::load(None).unwrap();

        assert_eq!(config.telegram.bot_token, "456:def");
        assert_eq!(config.log_file, "/tmp/aibot-test.log");
        assert_eq!(config.thinking_message, "One moment...");
        assert_eq!(config.allowed_users, vec![10, 20]);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_token_is_an_error() {
        clear_env();
        assert!(BaseConfig::load(None).is_err());
        assert!(BaseConfig::load(Some("789:ghi".to_string())).is_ok());
    }

    #[test]
    #[serial]
    fn test_invalid_api_url_fails_validation() {
        clear_env();
        env::set_var("BOT_TOKEN", "123:abc");
        env::set_var("TELEGRAM_API_URL", "::nope::");

        let config = BotConfig::load(None).unwrap();

        assert!(config.validate().is_err());
        clear_env();
    }

    #[test]
    fn test_parse_allowed_users() {
        assert_eq!(parse_allowed_users("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_allowed_users(" 1,,-2 ").unwrap(), vec![1, -2]);
        assert!(parse_allowed_users("1,alice").is_err());
    }
}
