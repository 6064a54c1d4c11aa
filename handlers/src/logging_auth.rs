//! Handlers for logging and optional auth (allowlist).

use aibot_core::{HandlerResponse, Handler, InboundEvent, Result, Update};
use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

/// Logs each update in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let username = update.user.username.as_deref().unwrap_or("unknown");
        match &update.event {
            InboundEvent::TextMessage { text } => info!(
                user_id = update.user.id,
                chat_id = update.chat.id,
                username = %username,
                message_content = %text,
                "Received message"
            ),
            InboundEvent::ButtonPressed { action, .. } => info!(
                user_id = update.user.id,
                chat_id = update.chat.id,
                username = %username,
                action = %action,
                "Received button press"
            ),
            InboundEvent::ConversationStarted | InboundEvent::Help => info!(
                user_id = update.user.id,
                chat_id = update.chat.id,
                username = %username,
                command = update.event.kind(),
                "Received command"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            update_id = %update.id,
            event = update.event.kind(),
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}

/// Stops the chain with Unauthorized if the user is not in the allowlist. An empty allowlist admits everyone.
pub struct AuthHandler {
    allowed_users: Vec<i64>,
}

impl AuthHandler {
    /// Creates a handler that allows only the given user ids (all users when empty).
    pub fn new(allowed_users: Vec<i64>) -> Self {
        Self { allowed_users }
    }

    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.allowed_users.is_empty() || self.allowed_users.contains(&user_id)
    }
}

#[async_trait]
impl Handler for AuthHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user_id = update.user.id;
        if self.is_allowed(user_id) {
            debug!(user_id = user_id, "User authorized");
            Ok(true)
        } else {
            error!(user_id = user_id, "Unauthorized access attempt");
            Err(aibot_core::HandlerError::Unauthorized.into())
        }
    }
}
