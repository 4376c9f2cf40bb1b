//! Error types for the bot core.
//!
//! [`KiwaiError`] is the top-level error; [`HandlerError`] covers handler-level conditions.

use thiserror::Error;

/// Top-level error (bot transport, handler).
#[derive(Error, Debug)]
pub enum KiwaiError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Errors produced while routing a single message.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, KiwaiError>;
