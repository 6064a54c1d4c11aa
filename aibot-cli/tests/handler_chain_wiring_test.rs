//! Drives the production handler chain (logging → allowlist → relay) with a recording bot and simulated providers.

use aibot_cli::{build_handler_chain, BaseConfig, BotConfig};
use aibot_core::{
    AibotError, Bot, Chat, HandlerError, HandlerResponse, InboundEvent, Menu, ProviderId, Result,
    Update, User,
};
use aibot_telegram::TelegramConfig;
use async_trait::async_trait;
use chrono::Utc;
use llm_providers::{ProviderRegistry, ProvidersConfig};
use session_store::SessionStore;
use std::sync::{Arc, Mutex};

/// Records the text of every send/edit.
#[derive(Default)]
struct RecordingBot {
    texts: Mutex<Vec<String>>,
}

impl RecordingBot {
    fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    fn push(&self, text: &str) {
        self.texts.lock().unwrap().push(text.to_string());
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str, _menu: Option<&Menu>) -> Result<()> {
        self.push(text);
        Ok(())
    }

    async fn send_message_and_return_id(
        &self,
        _chat: &Chat,
        text: &str,
        _menu: Option<&Menu>,
    ) -> Result<String> {
        self.push(text);
        Ok("7".to_string())
    }

    async fn edit_message(
        &self,
        _chat: &Chat,
        _message_id: &str,
        text: &str,
        _menu: Option<&Menu>,
    ) -> Result<()> {
        self.push(text);
        Ok(())
    }

    async fn send_code_block(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.push(text);
        Ok(())
    }

    async fn answer_callback(&self, _callback_id: &str, _notice: Option<&str>) -> Result<()> {
        Ok(())
    }
}

fn config(allowed_users: Vec<i64>) -> BotConfig {
    BotConfig {
        base: BaseConfig {
            telegram: TelegramConfig::with_token("123:abc".to_string()),
            log_file: "logs/aibot-test.log".to_string(),
            thinking_message: "Working...".to_string(),
            allowed_users,
        },
        providers: ProvidersConfig {
            enable_simulated: true,
            ..ProvidersConfig::default()
        },
    }
}

fn update(user_id: i64, event: InboundEvent) -> Update {
    Update {
        id: "u1".to_string(),
        user: User {
            id: user_id,
            username: None,
            first_name: Some("Sam".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 555,
            chat_type: "private".to_string(),
        },
        event,
        created_at: Utc::now(),
    }
}

fn press(user_id: i64, action: &str) -> Update {
    update(
        user_id,
        InboundEvent::ButtonPressed {
            callback_id: "cb".to_string(),
            action: action.to_string(),
            message_id: Some("3".to_string()),
            message_text: None,
        },
    )
}

/// **Test: /start, selection and a prompt flow through the full chain to a simulated reply.**
#[tokio::test]
async fn full_chain_relays_to_simulated_provider() {
    let config = config(vec![]);
    let bot = Arc::new(RecordingBot::default());
    let registry = Arc::new(ProviderRegistry::from_config(&config.providers).unwrap());
    let sessions = SessionStore::new();
    let chain = build_handler_chain(&config, bot.clone(), registry, sessions.clone());

    chain
        .handle(&update(1, InboundEvent::ConversationStarted))
        .await
        .unwrap();
    chain.handle(&press(1, "ai_mistral")).await.unwrap();
    let response = chain
        .handle(&update(
            1,
            InboundEvent::TextMessage {
                text: "bonjour".to_string(),
            },
        ))
        .await
        .unwrap();

    match response {
        HandlerResponse::Reply(text) => {
            assert!(text.starts_with("MISTRAL\n\n[simulated Mistral]"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    let texts = bot.texts();
    assert!(texts.contains(&"Working...".to_string()));
    assert_eq!(
        sessions.get(555).await.selected_provider,
        Some(ProviderId::Mistral)
    );
}

/// **Test: A user outside the allowlist is stopped before the relay runs.**
#[tokio::test]
async fn allowlist_blocks_unknown_user() {
    let config = config(vec![1]);
    let bot = Arc::new(RecordingBot::default());
    let registry = Arc::new(ProviderRegistry::from_config(&config.providers).unwrap());
    let chain = build_handler_chain(&config, bot.clone(), registry, SessionStore::new());

    let err = chain
        .handle(&update(2, InboundEvent::ConversationStarted))
        .await
        .unwrap_err();

    assert!(matches!(err, AibotError::Handler(HandlerError::Unauthorized)));
    assert!(bot.texts().is_empty());
}

/// **Test: Without credentials the networked providers are refused at selection time.**
#[tokio::test]
async fn unconfigured_provider_is_refused() {
    let config = config(vec![]);
    let bot = Arc::new(RecordingBot::default());
    let registry = Arc::new(ProviderRegistry::from_config(&config.providers).unwrap());
    let sessions = SessionStore::new();
    let chain = build_handler_chain(&config, bot.clone(), registry, sessions.clone());

    chain.handle(&press(1, "ai_chatgpt")).await.unwrap();

    assert!(bot.texts()[0].starts_with("ChatGPT is unavailable."));
    assert!(sessions.get(555).await.selected_provider.is_none());
}
