use std::collections::BTreeMap;

use popcast_core::config::ModelConfig;
use popcast_core::models::{FeatureName, FeatureVector, ModelMetrics};
use popcast_features::normalize;

use crate::booster::GradientBooster;

/// An immutable fitted model and the metrics of the run that produced it.
///
/// Published whole; never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    booster: GradientBooster,
    config: ModelConfig,
    metrics: ModelMetrics,
}

impl TrainedModel {
    pub fn new(booster: GradientBooster, config: ModelConfig, metrics: ModelMetrics) -> Self {
        Self {
            booster,
            config,
            metrics,
        }
    }

    /// Predicted growth rate (percent) for one natural-unit vector.
    pub fn predict_growth(&self, features: &FeatureVector) -> f64 {
        self.booster.predict_row(&normalize(features))
    }

    pub fn booster(&self) -> &GradientBooster {
        &self.booster
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ModelMetrics {
        &self.metrics
    }

    /// Same keys as [`FeatureVector`], in canonical order.
    pub fn feature_importance(&self) -> BTreeMap<FeatureName, f64> {
        self.metrics.feature_importance.clone()
    }
}
