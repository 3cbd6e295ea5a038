mod disabled;
mod gemini;
mod openai;

pub use disabled::DisabledGenerator;
pub use gemini::GeminiGenerator;
pub use openai::OpenAiGenerator;

use popcast_core::config::GenAiConfig;
use popcast_core::errors::{ConfigError, PopcastResult};
use popcast_core::traits::ITextGenerator;
use tracing::warn;

/// Build the configured generator.
///
/// A missing API key is not an error: the result is a [`DisabledGenerator`]
/// and every caller falls back to its offline behavior.
pub fn create_generator(config: &GenAiConfig) -> PopcastResult<Box<dyn ITextGenerator>> {
    let provider = config.provider.as_str();
    if provider == "disabled" {
        return Ok(Box::new(DisabledGenerator::new("text generation is disabled")));
    }
    if provider != "gemini" && provider != "openai" {
        return Err(ConfigError::InvalidValue {
            key: "genai.provider".to_string(),
            reason: format!("unknown provider {provider:?}; expected gemini, openai or disabled"),
        }
        .into());
    }

    let Some(api_key) = config.resolve_api_key() else {
        warn!(provider, env = %config.api_key_env, "no API key configured; text generation disabled");
        return Ok(Box::new(DisabledGenerator::new(format!(
            "{} is not set",
            config.api_key_env
        ))));
    };

    Ok(match provider {
        "openai" => Box::new(OpenAiGenerator::new(config, api_key)?),
        _ => Box::new(GeminiGenerator::new(config, api_key)?),
    })
}
