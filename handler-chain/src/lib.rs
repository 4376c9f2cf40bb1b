//! # Handler chain
//!
//! Runs a sequence of handlers for each message. Each handler has optional before/handle/after:
//! all before run in order (any false stops the chain); then handle runs until Stop or Reply; then
//! all after run in reverse with the final response. If a handle call fails, after still runs
//! (with `Stop`) before the error is returned, so reply and cleanup handlers stay symmetric.

use kiwai_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse. Returns the final response.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            if !h.before(message).await? {
                info!(chat_id = message.chat.id, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        let mut handle_error = None;

        for h in &self.handlers {
            let name = std::any::type_name_of_val(h.as_ref());
            let response = match h.handle(message).await {
                Ok(r) => r,
                Err(e) => {
                    error!(chat_id = message.chat.id, handler = %name, error = %e, "step: handler handle failed");
                    final_response = HandlerResponse::Stop;
                    handle_error = Some(e);
                    break;
                }
            };
            debug!(handler = %name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        chat_id = message.chat.id,
                        handler = %name,
                        reply_len = ?response.reply_text().map(str::len),
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        info!(
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain finished"
        );

        match handle_error {
            Some(e) => Err(e),
            None => Ok(final_response),
        }
    }
}

// Tests live in tests/handler_chain_test.rs
