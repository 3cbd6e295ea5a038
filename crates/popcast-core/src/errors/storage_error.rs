/// Context index storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed: {reason}")]
    MigrationFailed { reason: String },

    #[error(
        "index built with embedding {indexed}, configured embedding is {configured}; re-ingest required"
    )]
    IndexMismatch { indexed: String, configured: String },

    #[error("io error at {path}: {reason}")]
    Io { path: String, reason: String },
}
