use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::FeatureName;

/// Result of one training run. Replaced wholesale by the next run.
///
/// Validation figures are computed on held-out organic rows only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModelMetrics {
    pub train_rmse: f64,
    pub val_rmse: f64,
    pub train_mae: f64,
    pub val_mae: f64,
    pub train_r2: f64,
    pub val_r2: f64,
    /// Total split gain per feature, normalized to sum to 1 when any split exists.
    pub feature_importance: BTreeMap<FeatureName, f64>,
    /// Wall-clock seconds.
    pub training_time: f64,
    pub organic_rows: usize,
    pub training_rows: usize,
    pub augmented_rows: usize,
    pub validation_rows: usize,
    pub seed: u64,
    pub model_version: String,
    pub trained_at: DateTime<Utc>,
}

impl ModelMetrics {
    /// Feature with the largest importance weight.
    pub fn top_feature(&self) -> Option<FeatureName> {
        self.feature_importance
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| *name)
    }
}
