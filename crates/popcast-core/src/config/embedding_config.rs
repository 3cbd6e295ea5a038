use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding provider configuration.
///
/// Changing the provider, model, or dimensions invalidates an existing
/// index; documents must be re-ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// "hashing" or "api".
    pub provider: String,
    pub dimensions: usize,
    /// Model name for the "api" provider.
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: defaults::DEFAULT_EMBEDDING_BASE_URL.to_string(),
            api_key_env: defaults::DEFAULT_EMBEDDING_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_GENAI_TIMEOUT_SECS,
        }
    }
}

impl EmbeddingConfig {
    /// Identity recorded in the index: provider, model, and dimensions.
    pub fn index_identity(&self) -> String {
        match self.provider.as_str() {
            "api" => format!("api:{}:{}", self.model, self.dimensions),
            other => format!("{other}:{}", self.dimensions),
        }
    }
}
