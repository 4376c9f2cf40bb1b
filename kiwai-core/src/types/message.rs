//! Inbound message type for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// A single inbound text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds an incoming text message for the given chat. The sender is the chat itself
    /// (private chats share the id), which is what the CLI, tests, and replays need.
    pub fn incoming_text(chat_id: i64, content: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", chat_id, Utc::now().timestamp_micros()),
            user: User {
                id: chat_id,
                username: None,
                first_name: None,
                last_name: None,
            },
            chat: Chat {
                id: chat_id,
                chat_type: "private".to_string(),
            },
            content: content.into(),
            message_type: "text".to_string(),
            created_at: Utc::now(),
        }
    }
}
