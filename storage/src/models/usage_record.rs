//! Global usage record: the whole contents of the usage file.
//!
//! Serialized shape:
//! `{ "total_messages", "total_tokens", "users": { "<chat id>": UserUsage }, "last_reset" }`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserUsage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    #[serde(default)]
    pub total_messages: u64,
    #[serde(default)]
    pub total_tokens: u64,
    /// Keyed by the chat id rendered as a decimal string.
    #[serde(default)]
    pub users: BTreeMap<String, UserUsage>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub last_reset: DateTime<Utc>,
}

impl UsageRecord {
    /// Zeroed record with `last_reset = now`.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            total_messages: 0,
            total_tokens: 0,
            users: BTreeMap::new(),
            last_reset: now,
        }
    }

    /// Counts one message of `tokens` for `chat_id`, creating the chat's entry at `now` if absent.
    pub fn record(&mut self, chat_id: i64, tokens: u64, now: DateTime<Utc>) {
        self.total_messages = self.total_messages.saturating_add(1);
        self.total_tokens = self.total_tokens.saturating_add(tokens);

        let user = self
            .users
            .entry(chat_id.to_string())
            .or_insert_with(|| UserUsage::new(now));
        user.messages = user.messages.saturating_add(1);
        user.tokens = user.tokens.saturating_add(tokens);
    }

    pub fn user(&self, chat_id: i64) -> Option<&UserUsage> {
        self.users.get(&chat_id.to_string())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
