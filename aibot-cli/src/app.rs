//! Wiring: config → providers, sessions, handler chain → Telegram dispatcher.

use aibot_core::{init_tracing, Bot};
use aibot_telegram::{run_dispatcher, TelegramBotAdapter};
use anyhow::Result;
use handler_chain::HandlerChain;
use handlers::{AuthHandler, LoggingHandler};
use llm_providers::ProviderRegistry;
use relay::Relay;
use session_store::SessionStore;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;

/// Logging → allowlist → relay.
pub fn build_handler_chain(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    registry: Arc<ProviderRegistry>,
    sessions: SessionStore,
) -> HandlerChain {
    let relay = Relay::new(bot, registry, sessions)
        .with_thinking_message(config.base.thinking_message.clone());

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AuthHandler::new(config.base.allowed_users.clone())))
        .add_handler(Arc::new(relay))
}

/// Main entry of `aibot run`: validate config, init logging, build the registry and chain, then run the dispatcher.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(Some(config.base.log_file.as_str()))?;

    let registry = Arc::new(ProviderRegistry::from_config(&config.providers)?);
    info!(
        available = registry.available_count(),
        allowlist = config.base.allowed_users.len(),
        simulated = config.providers.enable_simulated,
        "Initializing bot"
    );

    let teloxide_bot = config.base.telegram.build_bot();
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let handler_chain = build_handler_chain(&config, bot, registry, SessionStore::new());

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, handler_chain).await
}
