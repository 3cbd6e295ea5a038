use serde::{Deserialize, Serialize};

use super::defaults;

/// Context retrieval configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// SQLite file holding the document index.
    pub index_path: String,
    /// Snippets requested per prediction.
    pub top_k: usize,
    /// Hard ceiling on `top_k`.
    pub max_top_k: usize,
    /// Results must score strictly above this.
    pub min_score: f64,
    /// Snippet length in characters.
    pub snippet_chars: usize,
    /// Query text; `{country}` is replaced with the country name.
    pub query_template: String,
    /// Result cache TTL. 0 disables caching.
    pub cache_ttl_secs: u64,
    pub cache_capacity: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            index_path: defaults::DEFAULT_INDEX_PATH.to_string(),
            top_k: defaults::DEFAULT_TOP_K,
            max_top_k: defaults::DEFAULT_MAX_TOP_K,
            min_score: defaults::DEFAULT_MIN_SCORE,
            snippet_chars: defaults::DEFAULT_SNIPPET_CHARS,
            query_template: defaults::DEFAULT_QUERY_TEMPLATE.to_string(),
            cache_ttl_secs: defaults::DEFAULT_RETRIEVAL_CACHE_TTL_SECS,
            cache_capacity: defaults::DEFAULT_RETRIEVAL_CACHE_CAPACITY,
        }
    }
}
