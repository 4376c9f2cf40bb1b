//! Storage error types.
//!
//! `Io` and `Serialization` come out of [`crate::UsageStore::load`] and are fatal at startup.
//! `Persistence` comes out of writes after the in-memory counters were already updated.

use thiserror::Error;

/// Errors that can occur when loading or persisting usage data.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Persistence(String),
}
