//! Multi-year rollout.
//!
//! Year `t` predicts growth from the vector in effect for that year and
//! compounds: `population[t] = population[t-1] * (1 + growth[t] / 100)`.
//! Under [`DriftMode::Evolving`] the vector then drifts by the configured
//! per-year factors before the next year; under [`DriftMode::Fixed`] the
//! initial vector is reused for the whole horizon.

use popcast_core::config::{DriftConfig, DriftMode, ForecastConfig};
use popcast_core::models::{FeatureVector, ForecastPoint};

use crate::trained::TrainedModel;

/// Evolves a feature vector one year at a time.
///
/// Primary indicators drift multiplicatively (life expectancy additively).
/// Derived features are recomputed from the drifted primaries plus whatever
/// offset the starting vector carried relative to its own primaries, so an
/// adjustment applied directly to a derived feature persists across years.
#[derive(Debug, Clone)]
pub struct FeatureDrift {
    current: FeatureVector,
    gdp_per_capita: f64,
    increase_offset: f64,
    ratio_offset: f64,
    drift: DriftConfig,
}

impl FeatureDrift {
    pub fn new(initial: FeatureVector, drift: &DriftConfig) -> Self {
        let increase_offset = initial.natural_increase - (initial.birth_rate - initial.death_rate);
        let ratio_offset =
            initial.birth_death_ratio - initial.birth_rate / initial.death_rate.max(1.0);
        Self {
            current: initial,
            gdp_per_capita: initial.gdp_per_capita(),
            increase_offset,
            ratio_offset,
            drift: drift.clone(),
        }
    }

    pub fn current(&self) -> &FeatureVector {
        &self.current
    }

    /// Move to the next year.
    pub fn advance(&mut self) {
        if self.drift.mode == DriftMode::Fixed {
            return;
        }
        let d = &self.drift;
        let v = &mut self.current;
        v.birth_rate *= d.birth_rate_factor;
        v.death_rate *= d.death_rate_factor;
        v.life_expectancy += d.life_expectancy_step;
        self.gdp_per_capita *= d.gdp_growth_factor;
        v.gdp_log = self.gdp_per_capita.ln_1p();
        v.natural_increase = v.birth_rate - v.death_rate + self.increase_offset;
        v.birth_death_ratio = v.birth_rate / v.death_rate.max(1.0) + self.ratio_offset;
    }
}

/// Project `years` points starting at `base_year + 1`.
///
/// Callers validate `years` and `initial_population`.
pub fn rollout(
    model: &TrainedModel,
    initial: &FeatureVector,
    initial_population: f64,
    years: u32,
    config: &ForecastConfig,
) -> Vec<ForecastPoint> {
    let mut drift = FeatureDrift::new(*initial, &config.drift);
    let mut population = initial_population;
    let mut points = Vec::with_capacity(years as usize);

    for step in 1..=years {
        let features = *drift.current();
        let growth_rate = model.predict_growth(&features);
        population *= 1.0 + growth_rate / 100.0;
        points.push(ForecastPoint {
            year: config.base_year + step as i32,
            population,
            growth_rate,
            birth_rate: features.birth_rate,
            death_rate: features.death_rate,
        });
        drift.advance();
    }
    points
}
