//! Outbound reply channel.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in telegram-bot.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Telegram rejects text messages longer than this many UTF-16 code units.
pub const MAX_REPLY_UNITS: usize = 4096;

/// Abstraction for sending replies. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}

/// Length as Telegram counts it.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Splits `text` into pieces of at most `max_units` UTF-16 code units, preferring line breaks.
///
/// A single line longer than `max_units` is hard-split on char boundaries.
pub fn split_reply(text: &str, max_units: usize) -> Vec<String> {
    if utf16_len(text) <= max_units {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = utf16_len(line);
        if current_len + line_len > max_units && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len > max_units {
            for c in line.chars() {
                if current_len + c.len_utf16() > max_units && !current.is_empty() {
                    parts.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += c.len_utf16();
            }
            parts.push(std::mem::take(&mut current));
            current_len = 0;
            continue;
        }
        current.push_str(line);
        current_len += line_len;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
