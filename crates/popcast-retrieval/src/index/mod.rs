//! SQLite-backed context index.
//!
//! The index records the embedding identity (provider, model, dimensions)
//! it was built with. Opening it under a different embedding configuration
//! fails with `StorageError::IndexMismatch`; the documents must be
//! re-ingested.

mod pragmas;
mod schema;
pub mod vector_search;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use popcast_core::errors::{PopcastResult, StorageError};
use tracing::{debug, info};

use crate::document::ContextDocument;
use crate::to_storage_err;
use vector_search::f32_vec_to_bytes;

const IDENTITY_KEY: &str = "embedding_identity";

pub struct ContextIndex {
    conn: Mutex<Connection>,
    identity: String,
}

impl ContextIndex {
    /// Open (creating if needed) the index at `path`.
    pub fn open(path: &Path, identity: &str) -> PopcastResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn)?;
        Self::init(conn, identity)
    }

    pub fn open_in_memory(identity: &str) -> PopcastResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::init(conn, identity)
    }

    fn init(conn: Connection, identity: &str) -> PopcastResult<Self> {
        schema::migrate(&conn)?;

        let recorded: Option<String> = conn
            .query_row(
                "SELECT value FROM index_meta WHERE key = ?1",
                params![IDENTITY_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?;

        match recorded {
            Some(indexed) if indexed != identity => {
                return Err(StorageError::IndexMismatch {
                    indexed,
                    configured: identity.to_string(),
                }
                .into());
            }
            Some(_) => debug!(identity, "index identity verified"),
            None => {
                conn.execute(
                    "INSERT INTO index_meta (key, value) VALUES (?1, ?2)",
                    params![IDENTITY_KEY, identity],
                )
                .map_err(|e| to_storage_err(e.to_string()))?;
                info!(identity, "initialized context index");
            }
        }

        Ok(Self {
            conn: Mutex::new(conn),
            identity: identity.to_string(),
        })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> PopcastResult<T>) -> PopcastResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("index lock poisoned: {e}")))?;
        f(&conn)
    }

    /// Insert or replace a document. Returns `true` when it was new.
    pub fn upsert(&self, id: &str, doc: &ContextDocument, embedding: &[f32]) -> PopcastResult<bool> {
        self.with_conn(|conn| {
            let existed: bool = conn
                .query_row("SELECT 1 FROM documents WHERE id = ?1", params![id], |_| Ok(true))
                .optional()
                .map_err(|e| to_storage_err(e.to_string()))?
                .unwrap_or(false);
            conn.execute(
                "INSERT INTO documents (id, country, title, url, content, embedding, dimensions)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    country = excluded.country,
                    title = excluded.title,
                    url = excluded.url,
                    content = excluded.content,
                    embedding = excluded.embedding,
                    dimensions = excluded.dimensions",
                params![
                    id,
                    doc.country,
                    doc.title,
                    doc.url,
                    doc.content,
                    f32_vec_to_bytes(embedding),
                    embedding.len() as i64
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(!existed)
        })
    }

    pub fn search(
        &self,
        country: &str,
        query_embedding: &[f32],
        limit: usize,
        min_score: f64,
    ) -> PopcastResult<Vec<(ContextDocument, f64)>> {
        self.with_conn(|conn| {
            vector_search::search_vector(conn, country, query_embedding, limit, min_score)
        })
    }

    /// Number of documents for `country`, or in total when `None`.
    pub fn count(&self, country: Option<&str>) -> PopcastResult<usize> {
        self.with_conn(|conn| {
            let n: i64 = match country {
                Some(c) => conn.query_row(
                    "SELECT COUNT(*) FROM documents WHERE country = ?1",
                    params![c],
                    |row| row.get(0),
                ),
                None => conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0)),
            }
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(n as usize)
        })
    }
}
