use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{CountryProfile, ForecastSummary, ModelMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsightsRequest {
    /// Falls back to the current model's metrics when absent.
    #[serde(default)]
    pub model_metrics: Option<ModelMetrics>,
    pub forecast_data: ForecastSummary,
    pub country_data: CountryProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InsightsResponse {
    pub insights: Vec<String>,
    pub timestamp: DateTime<Utc>,
}
