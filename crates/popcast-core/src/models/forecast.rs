use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ForecastPoint {
    pub year: i32,
    pub population: f64,
    /// Percent change from the previous year.
    pub growth_rate: f64,
    /// Birth rate in effect for this year's prediction.
    pub birth_rate: f64,
    /// Death rate in effect for this year's prediction.
    pub death_rate: f64,
}

/// Headline numbers of a forecast, used by insight generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ForecastSummary {
    /// Total percent change over the horizon.
    pub growth_rate: f64,
    pub years: u32,
    pub final_population: f64,
}

impl ForecastSummary {
    /// Summarize a forecast that started from `initial_population`.
    pub fn from_points(initial_population: f64, points: &[ForecastPoint]) -> Option<Self> {
        let last = points.last()?;
        if initial_population <= 0.0 {
            return None;
        }
        Some(Self {
            growth_rate: (last.population - initial_population) / initial_population * 100.0,
            years: points.len() as u32,
            final_population: last.population,
        })
    }
}
