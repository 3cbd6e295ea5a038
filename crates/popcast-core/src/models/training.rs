use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{CountryHistory, FeatureVector, ModelMetrics};

/// One supervised example: features for year `t`, growth into `t + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrainingRow {
    pub features: FeatureVector,
    /// Percent.
    pub growth_rate: f64,
}

/// Body of `POST /api/train`. Either histories or pre-built rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct TrainingRequest {
    pub countries_data: Vec<CountryHistory>,
    pub rows: Vec<TrainingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrainingResponse {
    pub metrics: ModelMetrics,
    pub message: String,
}
