//! # Memory Crate
//!
//! Per-chat conversation state for the KiwAI bot: a bounded, chronological history of
//! user/AI exchanges plus an optional persona ("context") string.
//!
//! ## Quick Start
//!
//! ```rust
//! use memory::ConversationStore;
//!
//! let store = ConversationStore::new();
//! store.set_context(42, "chef");
//! store.append_exchange(42, "hello", "Halo! Ada yang bisa saya bantu?");
//!
//! let session = store.get(42);
//! assert_eq!(session.context.as_deref(), Some("chef"));
//! assert_eq!(session.history.len(), 1);
//! ```
//!
//! ## Modules
//!
//! - [`history`] - [`BoundedHistory`], a capped FIFO ring of exchanges
//! - [`types`] - [`Exchange`] and [`ChatSession`]
//! - [`store`] - [`ConversationStore`], the concurrency-safe keyed map of sessions
//!
//! ## External Interactions
//!
//! None. State lives for the process lifetime; nothing is persisted.

pub mod history;
pub mod store;
pub mod types;

pub use history::{BoundedHistory, DEFAULT_HISTORY_CAPACITY};
pub use store::ConversationStore;
pub use types::{ChatSession, Exchange};
