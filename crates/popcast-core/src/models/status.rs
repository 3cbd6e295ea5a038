use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{DegradationEvent, FeatureName, ModelMetrics};

/// Snapshot returned by `GET /api/model/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ModelStatus {
    pub is_trained: bool,
    pub metrics: Option<ModelMetrics>,
    pub feature_importance: Option<BTreeMap<FeatureName, f64>>,
    /// Components currently running on a fallback.
    pub active_degradations: Vec<DegradationEvent>,
}
