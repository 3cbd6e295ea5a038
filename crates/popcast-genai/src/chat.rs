//! Stateless chat replies.

use popcast_core::models::ChatContext;
use popcast_core::traits::ITextGenerator;
use tracing::warn;

use crate::prompts::chat_prompt;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    pub response: String,
    /// Set when the reply is canned.
    pub note: Option<String>,
}

pub fn chat_reply(
    generator: &dyn ITextGenerator,
    message: &str,
    context: &ChatContext,
    model_r2: Option<f64>,
) -> ChatOutcome {
    let offline = |reason: String| ChatOutcome {
        response: offline_reply(message),
        note: Some(format!("offline reply: {reason}")),
    };
    if !generator.is_available() {
        return offline(format!("text generation unavailable ({})", generator.name()));
    }
    match generator.generate(&chat_prompt(message, context, model_r2)) {
        Ok(text) if !text.trim().is_empty() => ChatOutcome {
            response: text.trim().to_string(),
            note: None,
        },
        Ok(_) => offline("empty reply".to_string()),
        Err(e) => {
            warn!(generator = generator.name(), error = %e, "chat generation failed");
            offline(e.to_string())
        }
    }
}

/// Keyword-matched canned reply.
pub fn offline_reply(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("forecast") || lower.contains("predict") {
        "Forecasts come from a gradient-boosted model over birth rate, death rate, GDP per \
         capita, life expectancy and urbanization, rolled forward one year at a time."
            .to_string()
    } else if lower.contains("model") || lower.contains("accuracy") {
        "The forecaster is a gradient-boosted tree ensemble trained on historical growth; \
         its validation R² is shown on the model status panel."
            .to_string()
    } else if lower.contains("population") {
        "I can help analyse population trends. Tell me which country you are interested in."
            .to_string()
    } else {
        "I understand your question. For a detailed answer, please add more context or \
         configure a text generation API key."
            .to_string()
    }
}
