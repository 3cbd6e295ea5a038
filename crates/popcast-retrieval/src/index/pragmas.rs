//! PRAGMA configuration applied to every index connection.

use rusqlite::Connection;

use popcast_core::errors::PopcastResult;

use crate::to_storage_err;

/// WAL journaling, NORMAL sync, 5s busy timeout.
pub fn apply_pragmas(conn: &Connection) -> PopcastResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
