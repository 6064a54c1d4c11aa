//! # Relay
//!
//! The bot's conversation logic: decodes inbound events and button actions, keeps the per-chat
//! provider selection in the [`session_store::SessionStore`], relays prompts through the
//! [`llm_providers::ProviderRegistry`] and renders inline menus.

mod action;
mod menu;
pub mod messages;
mod relay;

pub use action::Action;
pub use menu::{build_menu, MenuName};
pub use relay::Relay;
