//! # aibot-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], inbound [`Update`]s, [`Menu`] layouts,
//! provider identity and tracing initialization. Transport-agnostic; used by aibot-telegram, handler-chain and relay.

pub mod bot;
pub mod error;
pub mod logger;
pub mod menu;
pub mod provider;
pub mod types;

pub use bot::{parse_message_id, Bot};
pub use error::{AibotError, HandlerError, Result};
pub use logger::init_tracing;
pub use menu::{Menu, MenuButton};
pub use provider::{ProviderCategory, ProviderId};
pub use types::{Chat, Handler, HandlerResponse, InboundEvent, ToCoreUpdate, ToCoreUser, Update, User};
