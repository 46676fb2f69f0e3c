//! Store handle and the raw key/value operations.
//!
//! The [`Store`] owns a [`rusqlite::Connection`] and guarantees that
//! migrations are run before any other operation.  Mutating operations are
//! fail-safe: a storage failure (quota, locked file, ...) is reported through
//! `tracing` and otherwise swallowed, so callers observe a no-op instead of
//! an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::log::{LogAction, LogRing, StorageLogEntry, LOG_KEY};
use crate::migrations;

/// Provenance tag for values supplied by the embedding host.
const BOOTSTRAP_PROVENANCE: &str = "from-app";

/// Durable key/value store with an audit trail.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the default application database in the
    /// platform-appropriate data directory.
    pub fn open() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("fr", "mauria", "mauria").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("mauria.db");
        tracing::info!(path = %db_path.display(), "opening store");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.  Useful for tests and
    /// custom directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store.  This is the test substitute for the
    /// on-disk database; it honors the exact same API.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Filesystem path of the open database, if it has one.
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    // ------------------------------------------------------------------
    // Raw key/value plumbing (internal, errors propagate)
    // ------------------------------------------------------------------

    fn kv_get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn kv_set(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn kv_delete(&self, key: &str) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Public fail-safe API
    // ------------------------------------------------------------------

    /// Read a stored value.  Storage errors degrade to `None`.
    pub fn read(&self, key: &str) -> Option<String> {
        match self.kv_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed");
                None
            }
        }
    }

    /// Store `value` under `key`, appending a `set` audit entry.
    pub fn write(&self, key: &str, value: &str) {
        self.write_with(key, value, None);
    }

    /// Same as [`write`](Store::write), but the audit entry records that the
    /// value was supplied by the embedding host.
    pub fn write_from_remote_bootstrap(&self, key: &str, value: &str) {
        self.write_with(key, value, Some(BOOTSTRAP_PROVENANCE));
    }

    fn write_with(&self, key: &str, value: &str, provenance: Option<&str>) {
        if let Err(e) = self.kv_set(key, value) {
            tracing::warn!(key, error = %e, "storage write failed");
            return;
        }

        // The log's own key is written through kv_set directly; logging it
        // here would recurse.
        if key != LOG_KEY {
            let mut entry = StorageLogEntry::new(LogAction::Set)
                .with_key(key)
                .with_size(value.len());
            if let Some(provenance) = provenance {
                entry = entry.with_details(provenance);
            }
            self.append_log(entry);
        }
    }

    /// Write every entry of `map` in one transaction, emitting a single
    /// aggregate `override` audit entry recording the key count.
    pub fn override_many(&mut self, map: &BTreeMap<String, String>) {
        let write_all = |conn: &mut Connection| -> rusqlite::Result<()> {
            let tx = conn.transaction()?;
            for (key, value) in map {
                tx.execute(
                    "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                    params![key, value],
                )?;
            }
            tx.commit()
        };

        if let Err(e) = write_all(&mut self.conn) {
            tracing::warn!(keys = map.len(), error = %e, "bulk storage write failed");
            return;
        }

        self.append_log(
            StorageLogEntry::new(LogAction::Override)
                .with_size(map.len())
                .with_details(BOOTSTRAP_PROVENANCE),
        );
    }

    /// Delete a key, appending a `remove` audit entry.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.kv_delete(key) {
            tracing::warn!(key, error = %e, "storage delete failed");
            return;
        }

        if key != LOG_KEY {
            self.append_log(StorageLogEntry::new(LogAction::Remove).with_key(key));
        }
    }

    /// Wipe every key, audit log included, then record a single `clear`
    /// entry so the fresh log shows what happened.
    pub fn clear_all(&self) {
        if let Err(e) = self.conn.execute("DELETE FROM kv", []) {
            tracing::warn!(error = %e, "storage clear failed");
            return;
        }

        self.append_log(StorageLogEntry::new(LogAction::Clear));
    }

    /// Append a human-readable marker separating app sessions in the
    /// diagnostic view.
    pub fn append_launch_marker(&self) {
        self.append_log(
            StorageLogEntry::new(LogAction::Launch).with_details("---- app launch ----"),
        );
    }

    /// The audit trail, oldest entry first.
    pub fn read_log(&self) -> Vec<StorageLogEntry> {
        let ring = match self.kv_get(LOG_KEY) {
            Ok(Some(raw)) => LogRing::from_json(&raw),
            Ok(None) => LogRing::new(),
            Err(e) => {
                tracing::warn!(error = %e, "audit log read failed");
                LogRing::new()
            }
        };
        ring.into_vec()
    }

    /// Drop the audit trail.
    pub fn clear_log(&self) {
        if let Err(e) = self.kv_delete(LOG_KEY) {
            tracing::warn!(error = %e, "audit log clear failed");
        }
    }

    /// Append one entry to the capped audit log.  Never fails: any internal
    /// error degrades to a no-op.
    fn append_log(&self, entry: StorageLogEntry) {
        let mut ring = match self.kv_get(LOG_KEY) {
            Ok(Some(raw)) => LogRing::from_json(&raw),
            Ok(None) => LogRing::new(),
            Err(_) => return,
        };

        ring.push(entry);

        let Ok(raw) = serde_json::to_string(&ring) else {
            return;
        };
        if let Err(e) = self.kv_set(LOG_KEY, &raw) {
            tracing::debug!(error = %e, "audit log write failed");
        }
    }
}
