use serde::{Deserialize, Serialize};

use super::defaults;

/// Gradient-boosting hyperparameters and artifact location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Number of boosting rounds.
    pub n_estimators: usize,
    /// Shrinkage applied to every tree's output.
    pub learning_rate: f64,
    /// Maximum depth of each tree (root has depth 0).
    pub max_depth: usize,
    /// Minimum hessian sum per child. With squared error this is a sample count.
    pub min_child_weight: f64,
    /// Row sampling ratio per tree.
    pub subsample: f64,
    /// Feature sampling ratio per tree.
    pub colsample_bytree: f64,
    /// Minimum loss reduction required to split.
    pub gamma: f64,
    /// L1 regularization on leaf weights.
    pub reg_alpha: f64,
    /// L2 regularization on leaf weights.
    pub reg_lambda: f64,
    /// Where the trained model is persisted. `None` keeps it in memory only.
    pub artifact_path: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_estimators: defaults::DEFAULT_N_ESTIMATORS,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            max_depth: defaults::DEFAULT_MAX_DEPTH,
            min_child_weight: defaults::DEFAULT_MIN_CHILD_WEIGHT,
            subsample: defaults::DEFAULT_SUBSAMPLE,
            colsample_bytree: defaults::DEFAULT_COLSAMPLE_BYTREE,
            gamma: defaults::DEFAULT_GAMMA,
            reg_alpha: defaults::DEFAULT_REG_ALPHA,
            reg_lambda: defaults::DEFAULT_REG_LAMBDA,
            artifact_path: Some(defaults::DEFAULT_ARTIFACT_PATH.to_string()),
        }
    }
}
