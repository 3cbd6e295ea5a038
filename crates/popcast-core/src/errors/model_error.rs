/// Forecast model precondition and persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model has not been trained")]
    NotTrained,

    #[error("insufficient training data: {rows} rows, need at least {min_rows}")]
    InsufficientData { rows: usize, min_rows: usize },

    #[error("training failed: {reason}")]
    TrainingFailed { reason: String },

    #[error("model artifact {path}: {reason}")]
    Persistence { path: String, reason: String },

    #[error("incompatible model artifact: {reason}")]
    IncompatibleArtifact { reason: String },
}
