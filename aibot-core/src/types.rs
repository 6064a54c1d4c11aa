//! Core types: user, chat, inbound update, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Chat (channel or private) identity. `id` is the conversation id used by the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

/// Closed set of inbound events the relay understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// `/start`: conversation begins or explicit reset.
    ConversationStarted,
    /// `/help`.
    Help,
    /// Plain text to relay to the selected provider.
    TextMessage { text: String },
    /// Inline button pressed. `message_id`/`message_text` describe the message carrying the button, when accessible.
    ButtonPressed {
        callback_id: String,
        action: String,
        message_id: Option<String>,
        message_text: Option<String>,
    },
}

impl InboundEvent {
    /// Maps incoming text to an event: `/start` and `/help` (optionally `@botname`-suffixed) are commands, anything else is a text message.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        let command = trimmed
            .split_whitespace()
            .next()
            .and_then(|first| first.strip_prefix('/'))
            .map(|cmd| cmd.split('@').next().unwrap_or(cmd).to_ascii_lowercase());

        match command.as_deref() {
            Some("start") => InboundEvent::ConversationStarted,
            Some("help") => InboundEvent::Help,
            _ => InboundEvent::TextMessage {
                text: text.to_string(),
            },
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::ConversationStarted => "conversation_started",
            InboundEvent::Help => "help",
            InboundEvent::TextMessage { .. } => "text_message",
            InboundEvent::ButtonPressed { .. } => "button_pressed",
        }
    }
}

/// A single inbound update: who, where, what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub event: InboundEvent,
    pub created_at: DateTime<Utc>,
}

/// Handler result for the chain. `Reply(text)` carries the last outbound text so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific update (message, callback query) to core [`Update`].
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Update;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _update: &Update) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the update. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _update: &Update) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _update: &Update,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_commands() {
        assert_eq!(InboundEvent::from_text("/start"), InboundEvent::ConversationStarted);
        assert_eq!(InboundEvent::from_text("  /START  "), InboundEvent::ConversationStarted);
        assert_eq!(InboundEvent::from_text("/start@relay_bot"), InboundEvent::ConversationStarted);
        assert_eq!(InboundEvent::from_text("/help"), InboundEvent::Help);
    }

    #[test]
    fn test_from_text_plain_and_unknown_commands_are_text() {
        assert_eq!(
            InboundEvent::from_text("hello /start"),
            InboundEvent::TextMessage {
                text: "hello /start".to_string()
            }
        );
        assert_eq!(
            InboundEvent::from_text("/settings"),
            InboundEvent::TextMessage {
                text: "/settings".to_string()
            }
        );
        assert_eq!(
            InboundEvent::from_text("/starting"),
            InboundEvent::TextMessage {
                text: "/starting".to_string()
            }
        );
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(InboundEvent::Help.kind(), "help");
        assert_eq!(
            InboundEvent::TextMessage { text: "x".into() }.kind(),
            "text_message"
        );
    }
}
