//! # kiwai-core
//!
//! Core types and traits shared by every KiwAI crate: [`Bot`], [`Handler`], the transport-agnostic
//! [`Message`] model, errors, and tracing initialization. Used by handler-chain and telegram-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{split_reply, utf16_len, Bot, MAX_REPLY_UNITS};
pub use error::{HandlerError, KiwaiError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
