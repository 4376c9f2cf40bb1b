//! Per-chat usage counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Messages and tokens consumed by one chat since its first interaction (or the last reset-all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUsage {
    #[serde(default)]
    pub messages: u64,
    #[serde(default)]
    pub tokens: u64,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub first_interaction: DateTime<Utc>,
}

impl UserUsage {
    /// A zeroed record first seen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            messages: 0,
            tokens: 0,
            first_interaction: now,
        }
    }
}
