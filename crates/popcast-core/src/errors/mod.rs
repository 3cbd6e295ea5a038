mod config_error;
mod model_error;
mod storage_error;
mod upstream_error;
mod validation_error;

pub use config_error::ConfigError;
pub use model_error::ModelError;
pub use storage_error::StorageError;
pub use upstream_error::UpstreamError;
pub use validation_error::ValidationError;

/// Top-level error for every popcast crate.
#[derive(Debug, thiserror::Error)]
pub enum PopcastError {
    #[error("validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("model error: {0}")]
    ModelError(#[from] ModelError),

    #[error("upstream error: {0}")]
    UpstreamError(#[from] UpstreamError),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl PopcastError {
    /// Whether the caller supplied bad input or hit an unmet precondition.
    ///
    /// These are surfaced verbatim and never retried.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            PopcastError::ValidationError(_)
                | PopcastError::ModelError(ModelError::NotTrained)
                | PopcastError::ModelError(ModelError::InsufficientData { .. })
        )
    }

    /// Whether the failure came from an external service (LLM, embedding API).
    pub fn is_upstream(&self) -> bool {
        matches!(self, PopcastError::UpstreamError(_))
    }
}

pub type PopcastResult<T> = Result<T, PopcastError>;
