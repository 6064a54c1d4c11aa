//! Adapters from Telegram (teloxide) types to aibot_core types.
//! Depends only on teloxide and aibot_core type definitions.

use aibot_core::{Chat, InboundEvent, ToCoreUpdate, ToCoreUser, Update, User};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: if chat.is_private() {
            "private".to_string()
        } else if chat.is_channel() {
            "channel".to_string()
        } else {
            "group".to_string()
        },
    }
}

fn unknown_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
    }
}

/// Wraps a teloxide text Message: `/start` and `/help` become commands, other text a [`InboundEvent::TextMessage`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreUpdate for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Update {
        Update {
            id: self.0.id.0.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(unknown_user),
            chat: core_chat(&self.0.chat),
            event: InboundEvent::from_text(self.0.text().unwrap_or("")),
            created_at: self.0.date,
        }
    }
}

/// Wraps a teloxide CallbackQuery (inline button press) as [`InboundEvent::ButtonPressed`].
///
/// The chat is the one holding the pressed message; when that message is gone, the presser's private chat.
pub struct TelegramCallbackWrapper<'a>(pub &'a teloxide::types::CallbackQuery);

impl<'a> ToCoreUpdate for TelegramCallbackWrapper<'a> {
    fn to_core(&self) -> Update {
        let query = self.0;
        let user = TelegramUserWrapper(&query.from).to_core();
        let chat = query
            .message
            .as_ref()
            .map(|m| core_chat(m.chat()))
            .unwrap_or_else(|| Chat {
                id: user.id,
                chat_type: "private".to_string(),
            });

        Update {
            id: query.id.0.clone(),
            user,
            chat,
            event: InboundEvent::ButtonPressed {
                callback_id: query.id.0.clone(),
                action: query.data.clone().unwrap_or_default(),
                message_id: query.message.as_ref().map(|m| m.id().0.to_string()),
                message_text: query
                    .regular_message()
                    .and_then(|m| m.text())
                    .map(|s| s.to_string()),
            },
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: TelegramUserWrapper converts teloxide User to core User with correct id, username, first_name, last_name.**
    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let wrapper = TelegramUserWrapper(&user);
        let core_user = wrapper.to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }
}
