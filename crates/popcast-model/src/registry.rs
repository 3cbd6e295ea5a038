//! The process-wide model slot.
//!
//! Readers load the current [`TrainedModel`] snapshot without blocking.
//! Training builds a complete new snapshot off to the side and publishes it
//! with a single atomic store; concurrent trainers are serialized.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use popcast_core::config::{ForecastConfig, ModelConfig, PopcastConfig, TrainingConfig};
use popcast_core::errors::{ModelError, PopcastResult, ValidationError};
use popcast_core::models::{FeatureName, FeatureVector, ForecastPoint, ModelMetrics, TrainingRow};
use popcast_features::{validate_population, validate_vector};
use tracing::{info, warn};

use crate::artifact;
use crate::rollout::rollout;
use crate::trained::TrainedModel;
use crate::training::train_model;

pub struct ForecastModel {
    snapshot: ArcSwapOption<TrainedModel>,
    train_lock: Mutex<()>,
    model_config: ModelConfig,
    training_config: TrainingConfig,
    forecast_config: ForecastConfig,
}

impl ForecastModel {
    /// An untrained model.
    pub fn new(config: &PopcastConfig) -> Self {
        Self {
            snapshot: ArcSwapOption::from(None),
            train_lock: Mutex::new(()),
            model_config: config.model.clone(),
            training_config: config.training.clone(),
            forecast_config: config.forecast.clone(),
        }
    }

    /// Train on organic rows and publish the result.
    ///
    /// The previous model keeps serving until the new one is stored. When an
    /// artifact path is configured the new model is persisted before it is
    /// published; a persistence failure leaves the previous model in place.
    pub fn train(&self, rows: &[TrainingRow]) -> PopcastResult<ModelMetrics> {
        let _guard = self.train_lock.lock().map_err(|e| ModelError::TrainingFailed {
            reason: format!("training lock poisoned: {e}"),
        })?;

        let model = train_model(rows, &self.model_config, &self.training_config)?;
        if let Some(path) = &self.model_config.artifact_path {
            artifact::save(&model, Path::new(path))?;
        }
        let metrics = model.metrics().clone();
        self.snapshot.store(Some(Arc::new(model)));
        Ok(metrics)
    }

    /// Multi-year forecast from `initial`.
    ///
    /// Caller input is checked before the model slot, so a bad `years` is a
    /// validation error even when nothing is trained yet.
    pub fn forecast(
        &self,
        initial: &FeatureVector,
        initial_population: f64,
        years: i64,
    ) -> PopcastResult<Vec<ForecastPoint>> {
        let years = self.validate_years(years)?;
        validate_population(initial_population)?;
        validate_vector(initial)?;
        let model = self.snapshot().ok_or(ModelError::NotTrained)?;
        Ok(rollout(
            &model,
            initial,
            initial_population,
            years,
            &self.forecast_config,
        ))
    }

    /// `years` must be in `[1, forecast.max_years]`.
    pub fn validate_years(&self, years: i64) -> PopcastResult<u32> {
        let max = self.forecast_config.max_years;
        if years < 1 || years > i64::from(max) {
            return Err(ValidationError::YearsOutOfRange { years, max }.into());
        }
        Ok(years as u32)
    }

    pub fn feature_importance(&self) -> PopcastResult<BTreeMap<FeatureName, f64>> {
        self.snapshot()
            .map(|m| m.feature_importance())
            .ok_or_else(|| ModelError::NotTrained.into())
    }

    /// Metrics of the currently published model.
    pub fn metrics(&self) -> Option<ModelMetrics> {
        self.snapshot().map(|m| m.metrics().clone())
    }

    pub fn is_trained(&self) -> bool {
        self.snapshot.load().is_some()
    }

    pub fn snapshot(&self) -> Option<Arc<TrainedModel>> {
        self.snapshot.load_full()
    }

    pub fn forecast_config(&self) -> &ForecastConfig {
        &self.forecast_config
    }

    pub fn save(&self, path: &Path) -> PopcastResult<()> {
        let model = self.snapshot().ok_or(ModelError::NotTrained)?;
        artifact::save(&model, path)
    }

    /// Load an artifact and publish it.
    pub fn load(&self, path: &Path) -> PopcastResult<ModelMetrics> {
        let model = artifact::load(path)?;
        let metrics = model.metrics().clone();
        self.snapshot.store(Some(Arc::new(model)));
        Ok(metrics)
    }

    /// Load the configured artifact if one exists. A missing file is not an
    /// error; an unreadable or incompatible one is logged and skipped.
    pub fn load_configured(&self) -> Option<ModelMetrics> {
        let path = Path::new(self.model_config.artifact_path.as_deref()?);
        if !path.exists() {
            info!(path = %path.display(), "no model artifact; starting untrained");
            return None;
        }
        match self.load(path) {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load model artifact");
                None
            }
        }
    }
}
