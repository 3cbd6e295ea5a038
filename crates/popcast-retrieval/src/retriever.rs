//! `IContextRetriever` over the SQLite index.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use popcast_core::config::RetrievalConfig;
use popcast_core::errors::{PopcastResult, ValidationError};
use popcast_core::models::{RetrievedContext, RetrievedSnippet};
use popcast_core::traits::{IContextRetriever, IEmbeddingProvider};

use crate::document::ContextDocument;
use crate::index::ContextIndex;

type CacheKey = (String, String, usize);

/// Counts from an ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub inserted: usize,
    pub replaced: usize,
}

pub struct SqliteRetriever {
    index: ContextIndex,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
    cache: Option<Cache<CacheKey, RetrievedContext>>,
}

impl SqliteRetriever {
    pub fn new(
        index: ContextIndex,
        embedder: Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        let cache = (config.cache_ttl_secs > 0).then(|| {
            Cache::builder()
                .max_capacity(config.cache_capacity)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });
        Self {
            index,
            embedder,
            config,
            cache,
        }
    }

    pub fn index(&self) -> &ContextIndex {
        &self.index
    }

    pub fn ingest(&self, doc: &ContextDocument) -> PopcastResult<bool> {
        if doc.country.trim().is_empty() {
            return Err(ValidationError::missing("country").into());
        }
        if doc.content.trim().is_empty() {
            return Err(ValidationError::missing("content").into());
        }
        let mut doc = doc.clone();
        doc.country = doc.country.trim().to_ascii_uppercase();
        let embedding = self.embedder.embed(&doc.embedding_text())?;
        let inserted = self.index.upsert(&doc.id(), &doc, &embedding)?;
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
        Ok(inserted)
    }

    pub fn ingest_batch(&self, docs: &[ContextDocument]) -> PopcastResult<IngestReport> {
        let mut report = IngestReport::default();
        for doc in docs {
            if self.ingest(doc)? {
                report.inserted += 1;
            } else {
                report.replaced += 1;
            }
        }
        debug!(
            inserted = report.inserted,
            replaced = report.replaced,
            "ingested context documents"
        );
        Ok(report)
    }

    fn search(&self, country: &str, query_text: &str, top_k: usize) -> PopcastResult<RetrievedContext> {
        let embedding = self.embedder.embed(query_text)?;
        let hits = self
            .index
            .search(country, &embedding, top_k, self.config.min_score)?;
        let snippets = hits
            .into_iter()
            .map(|(doc, score)| RetrievedSnippet {
                snippet: doc.snippet(self.config.snippet_chars),
                title: doc.title,
                url: doc.url,
                relevance_score: score,
            })
            .collect();
        Ok(RetrievedContext::from_ranked(snippets, top_k))
    }
}

impl IContextRetriever for SqliteRetriever {
    fn retrieve(
        &self,
        country_code: &str,
        query_text: &str,
        top_k: usize,
    ) -> PopcastResult<RetrievedContext> {
        let country = country_code.trim().to_ascii_uppercase();
        let top_k = top_k.min(self.config.max_top_k);
        if country.is_empty() || top_k == 0 {
            return Ok(RetrievedContext::empty());
        }

        let key = (country.clone(), query_text.to_string(), top_k);
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&key)) {
            debug!(country = %country, "retrieval cache hit");
            return Ok(hit);
        }

        let context = self.search(&country, query_text, top_k)?;
        debug!(country = %country, snippets = context.len(), "retrieved context");
        if let Some(cache) = &self.cache {
            cache.insert(key, context.clone());
        }
        Ok(context)
    }
}
