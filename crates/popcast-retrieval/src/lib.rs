//! # popcast-retrieval
//!
//! Country-scoped document retrieval for the narrative adjuster.
//!
//! Documents are embedded at ingestion and stored in SQLite alongside
//! their vectors. Queries are embedded with the same provider and scored
//! by cosine similarity within the requested country only.

pub mod document;
pub mod embeddings;
pub mod index;
pub mod retriever;

pub use document::ContextDocument;
pub use embeddings::{create_provider, ApiEmbedder, HashingEmbedder};
pub use index::ContextIndex;
pub use retriever::{IngestReport, SqliteRetriever};

use std::path::Path;
use std::sync::Arc;

use popcast_core::config::{EmbeddingConfig, RetrievalConfig};
use popcast_core::errors::{PopcastResult, StorageError};

pub(crate) fn to_storage_err(message: String) -> StorageError {
    StorageError::SqliteError { message }
}

/// Open the configured index and wire it to the configured embedder.
pub fn open_retriever(
    retrieval: &RetrievalConfig,
    embedding: &EmbeddingConfig,
) -> PopcastResult<SqliteRetriever> {
    let embedder: Arc<dyn popcast_core::traits::IEmbeddingProvider> =
        Arc::from(create_provider(embedding)?);
    let index = ContextIndex::open(Path::new(&retrieval.index_path), &embedding.index_identity())?;
    Ok(SqliteRetriever::new(index, embedder, retrieval.clone()))
}
