//! Shared fixtures for relay tests: recording [`MockBot`], stub provider, update builders.

#![allow(dead_code)]

use aibot_core::{AibotError, Bot, Chat, InboundEvent, Menu, Result, Update, User};
use async_trait::async_trait;
use chrono::Utc;
use llm_providers::Provider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const CHAT_ID: i64 = 4242;
pub const PLACEHOLDER_ID: &str = "1";

/// One recorded outbound call. Menus are reduced to their action ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        text: String,
        actions: Option<Vec<String>>,
    },
    SendReturningId {
        chat_id: i64,
        text: String,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
        actions: Option<Vec<String>>,
    },
    CodeBlock {
        chat_id: i64,
        text: String,
    },
    AnswerCallback {
        callback_id: String,
        notice: Option<String>,
    },
}

impl BotCall {
    /// Text shown in the chat by this call, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            BotCall::Send { text, .. }
            | BotCall::SendReturningId { text, .. }
            | BotCall::Edit { text, .. }
            | BotCall::CodeBlock { text, .. } => Some(text),
            BotCall::AnswerCallback { .. } => None,
        }
    }

    pub fn actions(&self) -> Option<&[String]> {
        match self {
            BotCall::Send { actions, .. } | BotCall::Edit { actions, .. } => actions.as_deref(),
            _ => None,
        }
    }
}

fn actions_of(menu: Option<&Menu>) -> Option<Vec<String>> {
    menu.map(|m| m.actions().into_iter().map(String::from).collect())
}

/// Mock Bot that records every call on an unbounded channel; the test holds the receiver.
pub struct MockBot {
    tx: mpsc::UnboundedSender<BotCall>,
    fail_edits: bool,
}

impl MockBot {
    pub fn with_receiver() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                fail_edits: false,
            }),
            rx,
        )
    }

    /// Like [`MockBot::with_receiver`] but every `edit_message` fails (after being recorded).
    pub fn with_failing_edits() -> (Arc<Self>, mpsc::UnboundedReceiver<BotCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                fail_edits: true,
            }),
            rx,
        )
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str, menu: Option<&Menu>) -> Result<()> {
        let _ = self.tx.send(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
            actions: actions_of(menu),
        });
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        chat: &Chat,
        text: &str,
        _menu: Option<&Menu>,
    ) -> Result<String> {
        let _ = self.tx.send(BotCall::SendReturningId {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(PLACEHOLDER_ID.to_string())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<()> {
        let _ = self.tx.send(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
            actions: actions_of(menu),
        });
        if self.fail_edits {
            return Err(AibotError::Bot("message to edit not found".to_string()));
        }
        Ok(())
    }

    async fn send_code_block(&self, chat: &Chat, text: &str) -> Result<()> {
        let _ = self.tx.send(BotCall::CodeBlock {
            chat_id: chat.id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, notice: Option<&str>) -> Result<()> {
        let _ = self.tx.send(BotCall::AnswerCallback {
            callback_id: callback_id.to_string(),
            notice: notice.map(String::from),
        });
        Ok(())
    }
}

/// All calls recorded so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<BotCall>) -> Vec<BotCall> {
    let mut calls = Vec::new();
    while let Ok(call) = rx.try_recv() {
        calls.push(call);
    }
    calls
}

/// Provider returning a fixed reply (or error) and counting calls.
pub struct StubProvider {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn ok(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(cause: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(cause.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(cause) => Err(anyhow::anyhow!("{}", cause)),
        }
    }
}

/// Provider whose call never completes.
pub struct HangingProvider;

#[async_trait]
impl Provider for HangingProvider {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        std::future::pending().await
    }
}

pub fn update(event: InboundEvent) -> Update {
    Update {
        id: "1".to_string(),
        user: User {
            id: 100,
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: "private".to_string(),
        },
        event,
        created_at: Utc::now(),
    }
}

pub fn text(text: &str) -> Update {
    update(InboundEvent::TextMessage {
        text: text.to_string(),
    })
}

/// Button press on the menu message `55` with no readable text.
pub fn button(action: &str) -> Update {
    button_on(action, Some("55"), None)
}

pub fn button_on(action: &str, message_id: Option<&str>, message_text: Option<&str>) -> Update {
    update(InboundEvent::ButtonPressed {
        callback_id: format!("cb-{}", action),
        action: action.to_string(),
        message_id: message_id.map(String::from),
        message_text: message_text.map(String::from),
    })
}
