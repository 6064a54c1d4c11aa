//! # aibot-telegram
//!
//! Telegram transport layer: adapters, [`aibot_core::Bot`] implementation with inline keyboards,
//! minimal config, dispatcher runner. Handles only Telegram connectivity and handler-chain execution.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_inline_keyboard, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
