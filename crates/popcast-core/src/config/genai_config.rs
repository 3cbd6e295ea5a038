use serde::{Deserialize, Serialize};

use super::defaults;

/// Text-generation service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenAiConfig {
    /// "gemini", "openai", or "disabled".
    pub provider: String,
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Inline key; takes precedence over `api_key_env`.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Immediate retries on transient network failures. Capped at 1.
    pub max_retries: u32,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Adjustment deltas are clamped to `±max_abs_delta`.
    pub max_abs_delta: f64,
    pub max_insights: usize,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_GENAI_PROVIDER.to_string(),
            model: defaults::DEFAULT_GEMINI_MODEL.to_string(),
            base_url: defaults::DEFAULT_GEMINI_BASE_URL.to_string(),
            api_key_env: defaults::DEFAULT_GEMINI_API_KEY_ENV.to_string(),
            api_key: None,
            timeout_secs: defaults::DEFAULT_GENAI_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_GENAI_MAX_RETRIES,
            max_tokens: defaults::DEFAULT_GENAI_MAX_TOKENS,
            temperature: defaults::DEFAULT_GENAI_TEMPERATURE,
            max_abs_delta: defaults::DEFAULT_MAX_ABS_DELTA,
            max_insights: defaults::DEFAULT_MAX_INSIGHTS,
        }
    }
}

impl GenAiConfig {
    /// Preset for an OpenAI-compatible endpoint.
    pub fn openai() -> Self {
        Self {
            provider: "openai".to_string(),
            model: defaults::DEFAULT_OPENAI_MODEL.to_string(),
            base_url: defaults::DEFAULT_OPENAI_BASE_URL.to_string(),
            api_key_env: defaults::DEFAULT_OPENAI_API_KEY_ENV.to_string(),
            ..Default::default()
        }
    }

    /// Preset that never calls out.
    pub fn disabled() -> Self {
        Self {
            provider: "disabled".to_string(),
            ..Default::default()
        }
    }

    /// Resolve the API key: inline value first, then the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
