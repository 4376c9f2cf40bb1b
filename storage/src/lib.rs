//! Storage crate: durable usage counters.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – UsageRecord, UserUsage
//! - [`usage_store`] – UsageStore (JSON file, whole-file atomic rewrites)

mod error;
mod models;
mod usage_store;

pub use error::StorageError;
pub use models::{UsageRecord, UserUsage};
pub use usage_store::UsageStore;
