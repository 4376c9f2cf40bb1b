//! # Core Types
//!
//! ## Exchange
//!
//! One user-input / model-output pair. Immutable once appended to a history.
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `user` | `String` | Text that was sent to the completion backend |
//! | `ai` | `String` | Raw backend answer, before output-language normalization |
//!
//! ## ChatSession
//!
//! Snapshot of one chat's conversational state.
//!
//! | Field | Type | Description |
//! |-------|------|-------------|
//! | `history` | `BoundedHistory` | Recent exchanges, oldest first |
//! | `context` | `Option<String>` | Persona string; `None` when unset |
//! | `generation` | `u64` | Bumped on every reset of this chat |

use serde::{Deserialize, Serialize};

use crate::history::BoundedHistory;

/// One user/AI exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub ai: String,
}

impl Exchange {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
        }
    }
}

/// Conversational state of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub history: BoundedHistory,
    pub context: Option<String>,
    pub generation: u64,
}

impl ChatSession {
    /// Empty session: no history, no context.
    pub fn new(capacity: usize) -> Self {
        Self {
            history: BoundedHistory::new(capacity),
            context: None,
            generation: 0,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(crate::history::DEFAULT_HISTORY_CAPACITY)
    }
}
