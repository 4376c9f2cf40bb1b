//! Logs each message on the way in and the outcome on the way out.

use async_trait::async_trait;
use kiwai_core::{Handler, HandlerResponse, Message, Result};
use tracing::{debug, info, instrument};

/// Logs each message in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        match response.reply_text() {
            Some(text) => info!(
                chat_id = message.chat.id,
                reply_len = text.len(),
                "Processed message"
            ),
            None => debug!(
                message_id = ?message.id,
                response = ?response,
                "Processed message without reply"
            ),
        }
        Ok(())
    }
}
