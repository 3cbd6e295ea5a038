use serde::{Deserialize, Serialize};

use super::defaults;

/// Multi-year rollout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Largest accepted `years` value.
    pub max_years: u32,
    /// The first forecast point is `base_year + 1`.
    pub base_year: i32,
    pub drift: DriftConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_years: defaults::DEFAULT_MAX_YEARS,
            base_year: defaults::DEFAULT_BASE_YEAR,
            drift: DriftConfig::default(),
        }
    }
}

/// How the feature vector evolves between forecast years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftMode {
    /// Indicators drift by the configured per-year factors.
    Evolving,
    /// The initial vector is reused for every year.
    Fixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    pub mode: DriftMode,
    /// Multiplier applied to the birth rate each year.
    pub birth_rate_factor: f64,
    /// Multiplier applied to the death rate each year.
    pub death_rate_factor: f64,
    /// Multiplier applied to GDP per capita each year.
    pub gdp_growth_factor: f64,
    /// Years added to life expectancy each year.
    pub life_expectancy_step: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            mode: DriftMode::Evolving,
            birth_rate_factor: defaults::DEFAULT_BIRTH_RATE_FACTOR,
            death_rate_factor: defaults::DEFAULT_DEATH_RATE_FACTOR,
            gdp_growth_factor: defaults::DEFAULT_GDP_GROWTH_FACTOR,
            life_expectancy_step: defaults::DEFAULT_LIFE_EXPECTANCY_STEP,
        }
    }
}
