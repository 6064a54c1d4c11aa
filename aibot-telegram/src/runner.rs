//! Dispatcher runner: converts teloxide messages and callback queries to core updates and hands them to the HandlerChain.
//!
//! teloxide's Dispatcher distributes updates by chat id, so one chat's updates are handled in order while chats run concurrently.

use aibot_core::{AibotError, HandlerError, ToCoreUpdate, Update as CoreUpdate};
use anyhow::Result;
use handler_chain::HandlerChain;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    prelude::*,
    types::{CallbackQuery, Message},
};
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Runs the long-polling dispatcher until Ctrl-C.
#[instrument(skip(bot, handler_chain))]
pub async fn run_dispatcher(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Bot identity confirmed"
        ),
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }

    let handler = dptree::entry()
        .branch(teloxide::types::Update::filter_message().endpoint(on_message))
        .branch(teloxide::types::Update::filter_callback_query().endpoint(on_callback_query));

    info!(handlers = handler_chain.len(), "Starting dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update kind");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    if msg.text().is_none() {
        debug!(chat_id = msg.chat.id.0, "Received non-text message, ignored");
        return Ok(());
    }
    let update = TelegramMessageWrapper(&msg).to_core();
    run_chain(&chain, &update).await;
    Ok(())
}

async fn on_callback_query(
    bot: teloxide::Bot,
    query: CallbackQuery,
    chain: HandlerChain,
) -> ResponseResult<()> {
    let update = TelegramCallbackWrapper(&query).to_core();
    if let Err(AibotError::Handler(HandlerError::Unauthorized)) = run_chain(&chain, &update).await {
        // The relay never saw the press, so acknowledge it here.
        if let Err(e) = bot.answer_callback_query(query.id.clone()).text("Unauthorized").await {
            warn!(error = %e, "answer_callback_query failed");
        }
    }
    Ok(())
}

/// Runs the chain for one update; failures are logged and returned, never propagated to the dispatcher.
async fn run_chain(chain: &HandlerChain, update: &CoreUpdate) -> std::result::Result<(), AibotError> {
    info!(
        user_id = update.user.id,
        chat_id = update.chat.id,
        update_id = %update.id,
        event = update.event.kind(),
        "step: processing update (handler chain started)"
    );
    match chain.handle(update).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, user_id = update.user.id, chat_id = update.chat.id, "Handler chain failed");
            Err(e)
        }
    }
}
