//! # Conversation Store
//!
//! Keyed-by-chat map of [`ChatSession`]s backed by a [`DashMap`], so mutation of one chat's
//! session is atomic with respect to other operations on the same chat while different chats
//! proceed independently. No shard guard is ever held across an `.await`: every method is
//! synchronous and returns owned snapshots.
//!
//! ## Lifecycle
//!
//! - Sessions are created lazily by [`ConversationStore::get`], [`ConversationStore::set_context`]
//!   and [`ConversationStore::append_exchange`].
//! - [`ConversationStore::reset`] replaces a session with an empty one and bumps its generation.
//! - [`ConversationStore::commit_exchange`] appends only if the generation still matches, so an
//!   answer computed before a reset never leaks into the fresh conversation.

use dashmap::DashMap;
use tracing::debug;

use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::types::{ChatSession, Exchange};

/// Concurrency-safe store of per-chat conversation state.
#[derive(Debug)]
pub struct ConversationStore {
    sessions: DashMap<i64, ChatSession>,
    capacity: usize,
}

impl ConversationStore {
    /// Creates a store whose sessions remember [`DEFAULT_HISTORY_CAPACITY`] exchanges.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Creates a store whose sessions remember at most `capacity` exchanges (minimum one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// History capacity applied to every session.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a snapshot of the chat's session, creating an empty one if absent.
    pub fn get(&self, chat_id: i64) -> ChatSession {
        self.sessions
            .entry(chat_id)
            .or_insert_with(|| ChatSession::new(self.capacity))
            .value()
            .clone()
    }

    /// True if the chat has a session (it has been accessed since start or last reset).
    pub fn contains(&self, chat_id: i64) -> bool {
        self.sessions.contains_key(&chat_id)
    }

    /// Replaces the chat's session with an empty one.
    ///
    /// Returns `true` if a session existed. Either way the chat afterwards has no history and no
    /// context, so calling this twice is the same as calling it once.
    pub fn reset(&self, chat_id: i64) -> bool {
        match self.sessions.get_mut(&chat_id) {
            Some(mut session) => {
                let generation = session.generation.wrapping_add(1);
                *session = ChatSession::new(self.capacity);
                session.generation = generation;
                debug!(chat_id = chat_id, generation = generation, "conversation reset");
                true
            }
            None => false,
        }
    }

    /// Overwrites the chat's persona. Callers must pass a non-blank string.
    pub fn set_context(&self, chat_id: i64, context: impl Into<String>) {
        let context = context.into();
        debug_assert!(!context.trim().is_empty(), "context must be non-blank");
        self.sessions
            .entry(chat_id)
            .or_insert_with(|| ChatSession::new(self.capacity))
            .context = Some(context);
    }

    /// Appends an exchange to the chat's history, evicting the oldest when full.
    pub fn append_exchange(&self, chat_id: i64, user: impl Into<String>, ai: impl Into<String>) {
        self.sessions
            .entry(chat_id)
            .or_insert_with(|| ChatSession::new(self.capacity))
            .history
            .push(Exchange::new(user, ai));
    }

    /// Appends an exchange only if the chat's generation still equals `generation`.
    ///
    /// Returns `false` (and leaves the session untouched) when the chat was reset after the
    /// caller took its snapshot.
    pub fn commit_exchange(
        &self,
        chat_id: i64,
        generation: u64,
        user: impl Into<String>,
        ai: impl Into<String>,
    ) -> bool {
        let mut session = self
            .sessions
            .entry(chat_id)
            .or_insert_with(|| ChatSession::new(self.capacity));
        if session.generation != generation {
            debug!(
                chat_id = chat_id,
                expected = generation,
                actual = session.generation,
                "exchange dropped: conversation was reset while the request was in flight"
            );
            return false;
        }
        session.history.push(Exchange::new(user, ai));
        true
    }

    /// Number of chats with a live session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
