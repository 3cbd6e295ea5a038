use popcast_core::errors::{PopcastResult, UpstreamError};
use popcast_core::traits::ITextGenerator;

/// Generator that refuses every call, used when generation is switched off
/// or no credentials are configured.
pub struct DisabledGenerator {
    reason: String,
}

impl DisabledGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl ITextGenerator for DisabledGenerator {
    fn generate(&self, _prompt: &str) -> PopcastResult<String> {
        Err(UpstreamError::Unavailable {
            service: "genai".to_string(),
            reason: self.reason.clone(),
        }
        .into())
    }

    fn name(&self) -> &str {
        "disabled"
    }

    fn is_available(&self) -> bool {
        false
    }
}
