//! Initial schema: a single string key/value table.
//!
//! Everything the app persists -- session keys, preferences, serialized
//! collections, the audit log itself -- lives in `kv` as a string value.

use rusqlite::Connection;

pub fn up(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}
