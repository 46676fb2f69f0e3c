//! # mauria-store
//!
//! On-device persistence for the Mauria companion app, backed by SQLite.
//!
//! The crate exposes a synchronous [`Store`] handle over a single `kv`
//! key/value table, an append-only capped audit log, typed collections for
//! user-created events and tasks, and validated accessors for the session and
//! preference keys.  Mutating operations never surface storage failures to
//! callers: they degrade to no-ops and report through `tracing`.
//!
//! The store is written for a single process; concurrent writers from
//! separate processes can clobber the read-modify-write collections.

pub mod events;
pub mod log;
pub mod migrations;
pub mod prefs;
pub mod session;
pub mod store;
pub mod tasks;

mod error;

pub use error::StoreError;
pub use log::{LogAction, LogRing, StorageLogEntry, LOG_CAPACITY, LOG_KEY};
pub use store::Store;
