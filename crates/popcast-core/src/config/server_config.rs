use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Load the persisted model at startup when present.
    pub load_model_on_start: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::DEFAULT_BIND.to_string(),
            load_model_on_start: true,
        }
    }
}
