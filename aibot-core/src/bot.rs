//! Bot abstraction for the outbound surface: send, edit, copy block, callback acknowledgement.
//!
//! [`Bot`] is transport-agnostic; aibot-telegram implements it via teloxide, tests substitute a recording mock.

use crate::error::{AibotError, Result};
use crate::menu::Menu;
use crate::types::Chat;
use async_trait::async_trait;

/// Outbound operations the relay needs. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the chat, optionally with an inline menu.
    async fn send_message(&self, chat: &Chat, text: &str, menu: Option<&Menu>) -> Result<()>;
    /// Sends a message and returns its id (for a later `edit_message`). May return empty string if not supported.
    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<String>;
    /// Replaces text (and menu) of an already-sent message. `message_id` is transport-specific (Telegram numeric string).
    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<()>;
    /// Sends `text` as a preformatted code block so it can be copied verbatim.
    async fn send_code_block(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Acknowledges a button press; `notice` is shown as a short toast.
    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> Result<()>;
}

/// Parses a message id string into an i32. Used by edit implementations.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| AibotError::Bot(format!("Invalid message_id for edit: {}", s)))
}
