//! Layered configuration: TOML file → section defaults.
//!
//! Every section is `#[serde(default)]`, so an empty document is a valid
//! configuration.

pub mod defaults;
mod embedding_config;
mod forecast_config;
mod genai_config;
mod model_config;
mod observability_config;
mod retrieval_config;
mod server_config;
mod training_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use embedding_config::EmbeddingConfig;
pub use forecast_config::{DriftConfig, DriftMode, ForecastConfig};
pub use genai_config::GenAiConfig;
pub use model_config::ModelConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use server_config::ServerConfig;
pub use training_config::{AugmentationConfig, TrainingConfig};

use crate::errors::{ConfigError, PopcastResult};

/// Environment variable naming the config file used by [`PopcastConfig::load`].
pub const CONFIG_PATH_ENV: &str = "POPCAST_CONFIG";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopcastConfig {
    pub model: ModelConfig,
    pub training: TrainingConfig,
    pub forecast: ForecastConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub genai: GenAiConfig,
    pub server: ServerConfig,
    pub observability: ObservabilityConfig,
}

impl PopcastConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml(toml_str: &str) -> PopcastResult<Self> {
        let config: PopcastConfig = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> PopcastResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load from `$POPCAST_CONFIG` when set, defaults otherwise.
    pub fn load() -> PopcastResult<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the pipeline cannot honor.
    pub fn validate(&self) -> PopcastResult<()> {
        let invalid = |key: &str, reason: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        if !(0.0..1.0).contains(&self.training.validation_fraction)
            || self.training.validation_fraction == 0.0
        {
            return Err(invalid("training.validation_fraction", "must be in (0, 1)").into());
        }
        if self.training.min_rows < 2 {
            return Err(invalid("training.min_rows", "must be at least 2").into());
        }
        let noise = self.training.augmentation.noise_scale;
        if !(0.0..1.0).contains(&noise) {
            return Err(invalid("training.augmentation.noise_scale", "must be in [0, 1)").into());
        }
        if self.model.n_estimators == 0 {
            return Err(invalid("model.n_estimators", "must be positive").into());
        }
        if !(self.model.learning_rate > 0.0 && self.model.learning_rate <= 1.0) {
            return Err(invalid("model.learning_rate", "must be in (0, 1]").into());
        }
        for (key, ratio) in [
            ("model.subsample", self.model.subsample),
            ("model.colsample_bytree", self.model.colsample_bytree),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(invalid(key, "must be in (0, 1]").into());
            }
        }
        if self.forecast.max_years == 0 {
            return Err(invalid("forecast.max_years", "must be positive").into());
        }
        if self.retrieval.top_k == 0 || self.retrieval.top_k > self.retrieval.max_top_k {
            return Err(invalid("retrieval.top_k", "must be in [1, max_top_k]").into());
        }
        if self.embedding.dimensions == 0 {
            return Err(invalid("embedding.dimensions", "must be positive").into());
        }
        for (key, secs) in [
            ("genai.timeout_secs", self.genai.timeout_secs),
            ("embedding.timeout_secs", self.embedding.timeout_secs),
        ] {
            if secs == 0 {
                return Err(invalid(key, "must be at least one second").into());
            }
        }
        if self.genai.max_retries > 1 {
            return Err(invalid("genai.max_retries", "at most one retry is allowed").into());
        }
        Ok(())
    }
}
