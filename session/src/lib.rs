//! # Session store
//!
//! Volatile per-conversation state for the relay: which provider the conversation selected and
//! where it is in the select → prompt → process loop. Keyed by Telegram chat id; lost on restart.

use aibot_core::ProviderId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Where a conversation is in the relay loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayState {
    #[default]
    AwaitingProviderSelection,
    AwaitingPrompt,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub selected_provider: Option<ProviderId>,
    pub state: RelayState,
}

/// Chat id that never names a real conversation.
const INVALID_CONVERSATION_ID: i64 = 0;

/// Shared, cloneable handle to the session map.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session, created empty on first access.
    pub async fn get(&self, conversation_id: i64) -> Session {
        if conversation_id == INVALID_CONVERSATION_ID {
            debug!("session read for invalid conversation id");
            return Session::default();
        }
        if let Some(session) = self.sessions.read().await.get(&conversation_id) {
            return *session;
        }
        *self
            .sessions
            .write()
            .await
            .entry(conversation_id)
            .or_default()
    }

    /// Stores the selection and moves to [`RelayState::AwaitingPrompt`].
    pub async fn set_provider(&self, conversation_id: i64, provider: ProviderId) {
        self.update(conversation_id, |s| {
            s.selected_provider = Some(provider);
            s.state = RelayState::AwaitingPrompt;
        })
        .await;
    }

    pub async fn set_state(&self, conversation_id: i64, state: RelayState) {
        self.update(conversation_id, |s| s.state = state).await;
    }

    /// Moves to [`RelayState::Processing`] until the returned guard is dropped.
    pub async fn begin_processing(&self, conversation_id: i64) -> ProcessingGuard {
        self.set_state(conversation_id, RelayState::Processing).await;
        ProcessingGuard {
            store: self.clone(),
            conversation_id,
        }
    }

    /// Selection absent, state [`RelayState::AwaitingProviderSelection`].
    pub async fn reset(&self, conversation_id: i64) {
        self.update(conversation_id, |s| *s = Session::default()).await;
    }

    /// Drops the entry entirely.
    pub async fn clear(&self, conversation_id: i64) {
        if conversation_id == INVALID_CONVERSATION_ID {
            debug!("session clear for invalid conversation id ignored");
            return;
        }
        self.sessions.write().await.remove(&conversation_id);
    }

    /// Applies `f` to the session under the write lock and returns the result.
    pub async fn update<F>(&self, conversation_id: i64, f: F) -> Session
    where
        F: FnOnce(&mut Session),
    {
        if conversation_id == INVALID_CONVERSATION_ID {
            debug!("session write for invalid conversation id ignored");
            return Session::default();
        }
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(conversation_id).or_default();
        f(session);
        debug!(
            conversation_id,
            selected_provider = ?session.selected_provider,
            state = ?session.state,
            "session updated"
        );
        *session
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Returns the conversation to [`RelayState::AwaitingPrompt`] on drop, also when the
/// owning future is cancelled mid-invocation. A state changed meanwhile (reset, clear) is kept.
pub struct ProcessingGuard {
    store: SessionStore,
    conversation_id: i64,
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        if self.conversation_id == INVALID_CONVERSATION_ID {
            return;
        }
        match self.store.sessions.try_write() {
            Ok(mut sessions) => {
                if let Some(session) = sessions.get_mut(&self.conversation_id) {
                    if session.state == RelayState::Processing {
                        session.state = RelayState::AwaitingPrompt;
                        debug!(conversation_id = self.conversation_id, "processing finished");
                    }
                }
            }
            Err(_) => warn!(
                conversation_id = self.conversation_id,
                "session lock busy, processing state not restored"
            ),
        }
    }
}
