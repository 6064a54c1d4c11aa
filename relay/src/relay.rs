//! Relay handler: drives the per-conversation select → prompt → process loop and talks to the user through [`Bot`].

use aibot_core::{Bot, Chat, Handler, HandlerResponse, InboundEvent, Menu, ProviderId, Result, Update};
use async_trait::async_trait;
use llm_providers::ProviderRegistry;
use session_store::{RelayState, SessionStore};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::action::Action;
use crate::menu::{build_menu, MenuName};
use crate::messages;

/// Result of a button press: text shown in the chat and the optional toast for the callback answer.
struct ButtonOutcome {
    text: String,
    notice: Option<String>,
}

impl ButtonOutcome {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notice: None,
        }
    }

    fn with_notice(text: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notice: Some(notice.into()),
        }
    }
}

/// Last handler in the chain. Returns `HandlerResponse::Reply(text)` with the last text it showed.
///
/// **External interactions:** Bot trait (send/edit/copy/answer), ProviderRegistry (invoke), SessionStore.
#[derive(Clone)]
pub struct Relay {
    pub(crate) bot: Arc<dyn Bot>,
    pub(crate) registry: Arc<ProviderRegistry>,
    pub(crate) sessions: SessionStore,
    /// Placeholder shown while the provider works (config THINKING_MESSAGE).
    pub(crate) thinking_message: String,
}

impl Relay {
    pub fn new(bot: Arc<dyn Bot>, registry: Arc<ProviderRegistry>, sessions: SessionStore) -> Self {
        Self {
            bot,
            registry,
            sessions,
            thinking_message: messages::DEFAULT_THINKING_MESSAGE.to_string(),
        }
    }

    pub fn with_thinking_message(mut self, message: impl Into<String>) -> Self {
        self.thinking_message = message.into();
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one inbound event to completion and returns the last text shown to the user.
    #[instrument(skip(self, update), fields(user_id = update.user.id, chat_id = update.chat.id, event = update.event.kind()))]
    pub async fn dispatch(&self, update: &Update) -> Result<String> {
        let chat = &update.chat;
        match &update.event {
            InboundEvent::ConversationStarted => self.start(chat).await,
            InboundEvent::Help => self.help(chat).await,
            InboundEvent::TextMessage { text } => self.prompt_received(chat, text).await,
            InboundEvent::ButtonPressed {
                callback_id,
                action,
                message_id,
                message_text,
            } => {
                self.button_pressed(
                    chat,
                    callback_id,
                    action,
                    message_id.as_deref(),
                    message_text.as_deref(),
                )
                .await
            }
        }
    }

    // ---------- Commands ----------

    async fn start(&self, chat: &Chat) -> Result<String> {
        self.sessions.clear(chat.id).await;
        info!("step: conversation started, session cleared");
        self.bot
            .send_message(chat, messages::CHOOSE_AI, Some(&self.menu(&MenuName::Main)))
            .await?;
        Ok(messages::CHOOSE_AI.to_string())
    }

    async fn help(&self, chat: &Chat) -> Result<String> {
        self.bot.send_message(chat, messages::HELP, None).await?;
        Ok(messages::HELP.to_string())
    }

    // ---------- Prompt relay ----------

    async fn prompt_received(&self, chat: &Chat, text: &str) -> Result<String> {
        if text.trim().is_empty() {
            self.bot.send_message(chat, messages::EMPTY_PROMPT, None).await?;
            return Ok(messages::EMPTY_PROMPT.to_string());
        }

        let session = self.sessions.get(chat.id).await;
        let Some(provider) = session
            .selected_provider
            .filter(|id| self.registry.is_available(*id))
        else {
            info!("step: prompt without selected provider");
            self.bot
                .send_message(chat, messages::CHOOSE_AI_FIRST, Some(&self.menu(&MenuName::Main)))
                .await?;
            return Ok(messages::CHOOSE_AI_FIRST.to_string());
        };

        // Only reachable when one chat's updates are handled concurrently.
        if session.state == RelayState::Processing {
            self.bot.send_message(chat, messages::STILL_WORKING, None).await?;
            return Ok(messages::STILL_WORKING.to_string());
        }

        let placeholder = match self
            .bot
            .send_message_and_return_id(chat, &self.thinking_message, None)
            .await
        {
            Ok(id) if !id.is_empty() => Some(id),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "step: placeholder send failed, reply will be a new message");
                None
            }
        };

        let processing = self.sessions.begin_processing(chat.id).await;
        info!(provider = provider.as_str(), prompt_len = text.len(), "step: invoking provider");
        let result = self.registry.invoke(provider, text).await;
        drop(processing);

        let reply = match result {
            Ok(response) => {
                info!(provider = provider.as_str(), response_len = response.len(), "step: provider replied");
                messages::response(provider, &response)
            }
            Err(e) => {
                warn!(provider = provider.as_str(), error = %e, "step: provider failed");
                messages::provider_failed(&e)
            }
        };

        self.present(
            chat,
            placeholder.as_deref(),
            &reply,
            Some(&self.menu(&MenuName::PostResponse)),
        )
        .await?;
        Ok(reply)
    }

    // ---------- Buttons ----------

    /// Runs the action, then acknowledges the callback exactly once, whatever the outcome.
    async fn button_pressed(
        &self,
        chat: &Chat,
        callback_id: &str,
        data: &str,
        message_id: Option<&str>,
        message_text: Option<&str>,
    ) -> Result<String> {
        let action = Action::decode(data);
        info!(action = ?action, "step: button pressed");

        let outcome = self.run_action(chat, action, message_id, message_text).await;

        let notice = match &outcome {
            Ok(o) => o.notice.clone(),
            Err(_) => None,
        };
        if let Err(e) = self.bot.answer_callback(callback_id, notice.as_deref()).await {
            warn!(error = %e, "answer_callback failed");
        }
        outcome.map(|o| o.text)
    }

    async fn run_action(
        &self,
        chat: &Chat,
        action: Action,
        message_id: Option<&str>,
        message_text: Option<&str>,
    ) -> Result<ButtonOutcome> {
        match action {
            Action::SelectProvider(id) => self.provider_selected(chat, id, message_id).await,
            Action::UnknownProvider(tag) => {
                warn!(tag = %tag, "step: selection of unknown provider");
                let text = format!("{}\n{}", messages::UNKNOWN_PROVIDER, messages::CHOOSE_AI);
                self.present(chat, message_id, &text, Some(&self.menu(&MenuName::Main)))
                    .await?;
                Ok(ButtonOutcome::with_notice(text, messages::UNKNOWN_PROVIDER))
            }
            Action::ShowCategory(category) => {
                let text = messages::category_title(category.label());
                self.present(
                    chat,
                    message_id,
                    &text,
                    Some(&self.menu(&MenuName::Category(category))),
                )
                .await?;
                Ok(ButtonOutcome::text(text))
            }
            Action::Redirect => {
                self.sessions.reset(chat.id).await;
                info!("step: redirect, selection cleared");
                self.present(
                    chat,
                    message_id,
                    messages::CHOOSE_ANOTHER_AI,
                    Some(&self.menu(&MenuName::Main)),
                )
                .await?;
                Ok(ButtonOutcome::text(messages::CHOOSE_ANOTHER_AI))
            }
            Action::Copy => self.copy(chat, message_text).await,
            Action::BackToMain => {
                self.present(chat, message_id, messages::CHOOSE_AI, Some(&self.menu(&MenuName::Main)))
                    .await?;
                Ok(ButtonOutcome::text(messages::CHOOSE_AI))
            }
            Action::Unknown(data) => {
                warn!(data = %data, "step: unknown button action");
                self.bot
                    .send_message(chat, messages::CHOOSE_AI, Some(&self.menu(&MenuName::Main)))
                    .await?;
                Ok(ButtonOutcome::text(messages::CHOOSE_AI))
            }
        }
    }

    async fn provider_selected(
        &self,
        chat: &Chat,
        id: ProviderId,
        message_id: Option<&str>,
    ) -> Result<ButtonOutcome> {
        let session = self.sessions.get(chat.id).await;
        if session.state == RelayState::Processing {
            self.bot.send_message(chat, messages::STILL_WORKING, None).await?;
            return Ok(ButtonOutcome::with_notice(
                messages::STILL_WORKING,
                messages::STILL_WORKING,
            ));
        }

        if !self.registry.is_available(id) {
            warn!(provider = id.as_str(), "step: selection rejected, provider unavailable");
            let notice = messages::provider_unavailable(id);
            let text = format!("{}\n{}", notice, messages::CHOOSE_AI);
            self.present(chat, message_id, &text, Some(&self.menu(&MenuName::Main)))
                .await?;
            return Ok(ButtonOutcome::with_notice(text, notice));
        }

        self.sessions.set_provider(chat.id, id).await;
        info!(provider = id.as_str(), "step: provider selected");
        let text = messages::provider_selected(id);
        self.present(chat, message_id, &text, None).await?;
        Ok(ButtonOutcome::text(text))
    }

    async fn copy(&self, chat: &Chat, message_text: Option<&str>) -> Result<ButtonOutcome> {
        match message_text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => {
                self.bot.send_code_block(chat, text).await?;
                info!(len = text.len(), "step: response copied");
                Ok(ButtonOutcome::with_notice(text, messages::COPIED))
            }
            None => Ok(ButtonOutcome::with_notice(
                messages::NOTHING_TO_COPY,
                messages::NOTHING_TO_COPY,
            )),
        }
    }

    // ---------- Output ----------

    /// Edits the message carrying the buttons when there is one, else (or if the edit fails) sends a new message.
    async fn present(
        &self,
        chat: &Chat,
        message_id: Option<&str>,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<()> {
        if let Some(id) = message_id.filter(|id| !id.is_empty()) {
            match self.bot.edit_message(chat, id, text, menu).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!(error = %e, message_id = id, "edit_message failed, sending new message"),
            }
        }
        self.bot.send_message(chat, text, menu).await
    }

    fn menu(&self, name: &MenuName) -> Menu {
        build_menu(name, &self.registry.catalog())
    }
}

#[async_trait]
impl Handler for Relay {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let text = self.dispatch(update).await?;
        Ok(HandlerResponse::Reply(text))
    }
}
