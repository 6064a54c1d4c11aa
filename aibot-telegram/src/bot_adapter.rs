//! Wraps teloxide::Bot and implements [`aibot_core::Bot`]. Production code sends messages via Telegram; tests can substitute another Bot impl.

use aibot_core::{parse_message_id, AibotError, Bot as CoreBot, Chat, Menu, Result};
use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId, ParseMode},
    utils::markdown,
    ApiError, RequestError,
};
use tracing::debug;

/// Telegram's message length limit, in characters.
const MAX_MESSAGE_CHARS: usize = 4096;
/// Room left for the code fence and escapes around copied text.
const CODE_BLOCK_OVERHEAD: usize = 64;

/// Renders a core [`Menu`] as an inline keyboard, one keyboard row per menu row.
pub fn to_inline_keyboard(menu: &Menu) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(menu.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.clone()))
            .collect::<Vec<_>>()
    }))
}

fn cap_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn bot_error(e: RequestError) -> AibotError {
    AibotError::Bot(e.to_string())
}

/// Thin wrapper around teloxide::Bot that implements aibot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str, menu: Option<&Menu>) -> Result<()> {
        self.send_message_and_return_id(chat, text, menu).await?;
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<String> {
        let mut request = self
            .bot
            .send_message(ChatId(chat.id), cap_chars(text, MAX_MESSAGE_CHARS));
        if let Some(menu) = menu {
            request = request.reply_markup(to_inline_keyboard(menu));
        }
        let sent = request.await.map_err(bot_error)?;
        Ok(sent.id.0.to_string())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<()> {
        let id = parse_message_id(message_id)?;
        let mut request = self.bot.edit_message_text(
            ChatId(chat.id),
            MessageId(id),
            cap_chars(text, MAX_MESSAGE_CHARS),
        );
        if let Some(menu) = menu {
            request = request.reply_markup(to_inline_keyboard(menu));
        }
        match request.await {
            Ok(_) => Ok(()),
            // Same text and keyboard as before; nothing to change.
            Err(RequestError::Api(ApiError::MessageNotModified)) => {
                debug!(message_id = id, "edit skipped, message not modified");
                Ok(())
            }
            Err(e) => Err(bot_error(e)),
        }
    }

    async fn send_code_block(&self, chat: &Chat, text: &str) -> Result<()> {
        let body = cap_chars(text, MAX_MESSAGE_CHARS - CODE_BLOCK_OVERHEAD);
        self.bot
            .send_message(ChatId(chat.id), markdown::code_block(&body))
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> Result<()> {
        let mut request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        if let Some(notice) = notice {
            request = request.text(notice.to_string());
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }
}
