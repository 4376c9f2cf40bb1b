//! UsageStore: global and per-chat message/token counters backed by one JSON file.
//!
//! Counters live behind a `RwLock`; every update rewrites the whole file (temp file + rename).
//! Writes are serialized by a separate mutex and always take the latest snapshot, so the file
//! never goes backwards even when updates race. The counters lock is released before any I/O.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::error::StorageError;
use crate::models::{UsageRecord, UserUsage};

pub struct UsageStore {
    path: PathBuf,
    record: RwLock<UsageRecord>,
    write_lock: Mutex<()>,
}

impl UsageStore {
    /// Loads counters from `path`. A missing file yields a fresh record (nothing is written until
    /// the first update); an unreadable or malformed file is an error.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let record = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => {
                let record: UsageRecord = serde_json::from_str(&raw)?;
                info!(
                    path = %path.display(),
                    users = record.user_count(),
                    total_messages = record.total_messages,
                    total_tokens = record.total_tokens,
                    "Usage data loaded"
                );
                record
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No usage file yet, starting fresh");
                UsageRecord::fresh(Utc::now())
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            record: RwLock::new(record),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counts one answered message of `tokens` for `chat_id` and persists.
    ///
    /// Returns the snapshot taken right after the increment. If the write fails the counters stay
    /// updated and `StorageError::Persistence` is returned; the next successful write catches up.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn record_usage(&self, chat_id: i64, tokens: u64) -> Result<UsageRecord, StorageError> {
        let updated = {
            let mut record = self.record.write().await;
            record.record(chat_id, tokens, Utc::now());
            record.clone()
        };
        debug!(
            total_messages = updated.total_messages,
            total_tokens = updated.total_tokens,
            "step: usage counters updated"
        );

        self.persist().await?;
        Ok(updated)
    }

    /// Read-only copy of the whole record.
    pub async fn snapshot(&self) -> UsageRecord {
        self.record.read().await.clone()
    }

    /// Read-only copy of one chat's counters, `None` if the chat never got an answer.
    pub async fn user(&self, chat_id: i64) -> Option<UserUsage> {
        self.record.read().await.user(chat_id).cloned()
    }

    /// Zeroes all counters, clears users, sets `last_reset = now` and persists.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn reset_all(&self) -> Result<UsageRecord, StorageError> {
        let fresh = {
            let mut record = self.record.write().await;
            *record = UsageRecord::fresh(Utc::now());
            record.clone()
        };
        info!("Usage counters reset");

        self.persist().await?;
        Ok(fresh)
    }

    /// Writes the current snapshot to disk.
    pub async fn flush(&self) -> Result<(), StorageError> {
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.snapshot().await;

        self.write_atomically(&snapshot).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to persist usage data");
            StorageError::Persistence(format!("{}: {}", self.path.display(), e))
        })
    }

    async fn write_atomically(&self, snapshot: &UsageRecord) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(snapshot)?;
        let temp_path = temp_path_for(&self.path);
        tokio::fs::write(&temp_path, data.as_bytes()).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;
        debug!(path = %self.path.display(), "step: usage data written");
        Ok(())
    }
}

/// Sibling temp file, `usage_data.json` -> `usage_data.json.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
