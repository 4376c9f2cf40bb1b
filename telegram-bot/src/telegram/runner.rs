//! REPL runner: converts teloxide messages to core::Message and hands them to the per-chat dispatcher.

use anyhow::Result;
use kiwai_core::ToCoreMessage;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::dispatcher::ChatDispatcher;

/// Starts the long-polling REPL. Text messages are enqueued on their chat's queue and the REPL
/// returns immediately; everything else is dropped.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Arc<ChatDispatcher>) -> Result<()> {
    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Connected to Telegram");
        }
    }

    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            if msg.text().is_none() {
                debug!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    "Received non-text message, ignoring"
                );
                return respond(());
            }

            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                "step: message received, enqueueing"
            );
            dispatcher.dispatch(core_msg);

            respond(())
        }
    })
    .await;

    Ok(())
}
