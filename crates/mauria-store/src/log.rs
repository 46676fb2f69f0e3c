//! The storage audit log.
//!
//! Every mutating store operation appends an observational entry.  The log is
//! purely diagnostic: nothing in the app reads it back for behavior, only a
//! developer view does.  It is held as a JSON array under its own storage key
//! and capped as a FIFO ring.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key holding the serialized audit log.
pub const LOG_KEY: &str = "storageLogs";

/// Maximum number of retained audit entries.
pub const LOG_CAPACITY: usize = 200;

/// What kind of storage mutation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    Set,
    Override,
    Remove,
    Clear,
    Launch,
}

/// One entry in the storage audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLogEntry {
    pub at: DateTime<Utc>,
    pub action: LogAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Byte length of a written value, or key count for an override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StorageLogEntry {
    pub fn new(action: LogAction) -> Self {
        Self {
            at: Utc::now(),
            action,
            key: None,
            size: None,
            details: None,
        }
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// Fixed-capacity FIFO ring over audit entries.  A push beyond capacity
/// drops the oldest entry first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRing {
    entries: VecDeque<StorageLogEntry>,
}

impl LogRing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored blob; anything unreadable degrades to an empty ring.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn push(&mut self, entry: StorageLogEntry) {
        while self.entries.len() >= LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order, oldest first.
    pub fn into_vec(self) -> Vec<StorageLogEntry> {
        self.entries.into_iter().collect()
    }
}
