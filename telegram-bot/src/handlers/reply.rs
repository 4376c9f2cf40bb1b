//! Sends `HandlerResponse::Reply` texts back to the chat.

use async_trait::async_trait;
use kiwai_core::{split_reply, Bot, Handler, HandlerResponse, Message, Result, MAX_REPLY_UNITS};
use std::sync::Arc;
use tracing::{error, instrument};

/// Sends the final reply in after(), split into Telegram-sized pieces. Send failures are logged,
/// never returned, so one unreachable chat cannot fail its worker.
pub struct ReplyHandler {
    bot: Arc<dyn Bot>,
}

impl ReplyHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for ReplyHandler {
    #[instrument(skip(self, message, response), fields(chat_id = message.chat.id))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let Some(text) = response.reply_text() else {
            return Ok(());
        };

        for part in split_reply(text, MAX_REPLY_UNITS) {
            if let Err(e) = self.bot.reply_to(message, &part).await {
                error!(chat_id = message.chat.id, error = %e, "Failed to send reply");
                break;
            }
        }
        Ok(())
    }
}
