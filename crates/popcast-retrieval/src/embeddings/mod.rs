mod api;
mod hashing;

pub use api::ApiEmbedder;
pub use hashing::HashingEmbedder;

use popcast_core::config::EmbeddingConfig;
use popcast_core::errors::{ConfigError, PopcastResult, UpstreamError};
use popcast_core::traits::IEmbeddingProvider;

/// Build the configured provider.
///
/// `api` requires the key named by `api_key_env`; the caller decides whether
/// a missing key is fatal.
pub fn create_provider(config: &EmbeddingConfig) -> PopcastResult<Box<dyn IEmbeddingProvider>> {
    match config.provider.as_str() {
        "hashing" => Ok(Box::new(HashingEmbedder::new(config.dimensions))),
        "api" => {
            let key = std::env::var(&config.api_key_env).map_err(|_| UpstreamError::Unavailable {
                service: "embeddings".to_string(),
                reason: format!("{} is not set", config.api_key_env),
            })?;
            Ok(Box::new(ApiEmbedder::new(config, &key)?))
        }
        other => Err(ConfigError::InvalidValue {
            key: "embedding.provider".to_string(),
            reason: format!("unknown provider {other:?}; expected \"hashing\" or \"api\""),
        }
        .into()),
    }
}
