use crate::errors::PopcastResult;

/// A single-turn text generation backend.
pub trait ITextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    fn generate(&self, prompt: &str) -> PopcastResult<String>;

    /// Provider name for logs and degradation events.
    fn name(&self) -> &str;

    /// Whether credentials and configuration allow a call at all.
    fn is_available(&self) -> bool;
}
