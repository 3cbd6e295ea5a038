//! v001: documents, index_meta.

use rusqlite::Connection;

use popcast_core::errors::PopcastResult;

use crate::to_storage_err;

pub const SCHEMA_VERSION: i64 = 1;

pub fn migrate(conn: &Connection) -> PopcastResult<()> {
    let version: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id          TEXT PRIMARY KEY,
            country     TEXT NOT NULL,
            title       TEXT NOT NULL,
            url         TEXT NOT NULL DEFAULT '',
            content     TEXT NOT NULL,
            embedding   BLOB NOT NULL,
            dimensions  INTEGER NOT NULL,
            ingested_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_documents_country ON documents(country);

        CREATE TABLE IF NOT EXISTS index_meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        PRAGMA user_version = 1;
        ",
    )
    .map_err(|e| popcast_core::errors::StorageError::MigrationFailed {
        reason: e.to_string(),
    })?;
    Ok(())
}
