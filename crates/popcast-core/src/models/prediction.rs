use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{CountryProfile, ForecastPoint, ModelMetrics, RagAdjustment, RagNarrative};
use crate::config::defaults;

/// Body of `POST /api/predict`.
///
/// `years` is signed so that out-of-range values reach validation instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionRequest {
    pub country_data: CountryProfile,
    #[serde(default = "default_years")]
    pub years: i64,
    #[serde(default)]
    pub use_rag: bool,
}

fn default_years() -> i64 {
    defaults::DEFAULT_FORECAST_YEARS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PredictionResponse {
    pub forecast: Vec<ForecastPoint>,
    /// Unadjusted forecast, present only when an adjustment changed the inputs.
    #[serde(
        default,
        rename = "baselineForecast",
        skip_serializing_if = "Option::is_none"
    )]
    pub baseline_forecast: Option<Vec<ForecastPoint>>,
    pub metrics: Option<ModelMetrics>,
    #[ts(as = "Option<RagNarrative>")]
    #[serde(default)]
    pub rag_adjustments: RagAdjustment,
}
