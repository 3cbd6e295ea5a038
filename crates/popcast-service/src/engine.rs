//! [`ForecastService`]: owns the model slot and the external seams.

use std::sync::{Arc, Mutex};

use popcast_core::config::PopcastConfig;
use popcast_core::errors::PopcastResult;
use popcast_core::models::{
    DegradationEvent, ModelMetrics, ModelStatus, TrainingRequest, TrainingResponse, TrainingRow,
};
use popcast_core::traits::{IContextRetriever, INarrativeAdjuster, ITextGenerator};
use popcast_genai::{create_generator, LlmNarrativeAdjuster};
use popcast_model::ForecastModel;
use popcast_observability::tracing_setup::events;
use popcast_observability::{training_span, DegradationTracker};
use popcast_retrieval::open_retriever;
use tracing::{info, warn};

use crate::offline::OfflineRetriever;

pub struct ForecastService {
    pub(crate) config: PopcastConfig,
    pub(crate) model: ForecastModel,
    pub(crate) retriever: Arc<dyn IContextRetriever>,
    pub(crate) adjuster: Arc<dyn INarrativeAdjuster>,
    pub(crate) generator: Arc<dyn ITextGenerator>,
    degradations: Mutex<DegradationTracker>,
}

impl ForecastService {
    /// Assemble a service from explicit parts. The model starts untrained.
    pub fn new(
        config: PopcastConfig,
        retriever: Arc<dyn IContextRetriever>,
        adjuster: Arc<dyn INarrativeAdjuster>,
        generator: Arc<dyn ITextGenerator>,
    ) -> Self {
        let model = ForecastModel::new(&config);
        Self {
            config,
            model,
            retriever,
            adjuster,
            generator,
            degradations: Mutex::new(DegradationTracker::new()),
        }
    }

    /// Build every component from configuration and, when
    /// `server.load_model_on_start` is set, load the persisted model.
    ///
    /// An index built with a different embedding configuration is fatal.
    /// An unreachable embedding service only disables retrieval.
    pub fn from_config(config: PopcastConfig) -> PopcastResult<Self> {
        config.validate()?;

        let retriever: Arc<dyn IContextRetriever> =
            match open_retriever(&config.retrieval, &config.embedding) {
                Ok(r) => Arc::new(r),
                Err(e) if e.is_upstream() => {
                    warn!(error = %e, "context retrieval unavailable; RAG predictions will use the baseline");
                    Arc::new(OfflineRetriever::new(e.to_string()))
                }
                Err(e) => return Err(e),
            };
        let generator: Arc<dyn ITextGenerator> = Arc::from(create_generator(&config.genai)?);
        let adjuster: Arc<dyn INarrativeAdjuster> = Arc::new(LlmNarrativeAdjuster::new(
            generator.clone(),
            config.genai.max_abs_delta,
        ));

        let load_model = config.server.load_model_on_start;
        let service = Self::new(config, retriever, adjuster, generator);
        if load_model {
            if let Some(metrics) = service.model.load_configured() {
                info!(model_version = %metrics.model_version, val_r2 = metrics.val_r2, "loaded persisted model");
            }
        }
        Ok(service)
    }

    pub fn config(&self) -> &PopcastConfig {
        &self.config
    }

    pub fn model(&self) -> &ForecastModel {
        &self.model
    }

    /// Train from histories and/or pre-built rows and publish the model.
    pub fn train(&self, request: &TrainingRequest) -> PopcastResult<TrainingResponse> {
        let mut rows: Vec<TrainingRow> = request.rows.clone();
        for history in &request.countries_data {
            rows.extend(popcast_features::rows_from_history(history)?);
        }
        let metrics = self.train_rows(&rows)?;
        let message = format!(
            "Model trained on {} rows from {} countries (validation R² {:.3}).",
            metrics.organic_rows,
            request.countries_data.len(),
            metrics.val_r2
        );
        Ok(TrainingResponse { metrics, message })
    }

    pub fn train_rows(&self, rows: &[TrainingRow]) -> PopcastResult<ModelMetrics> {
        let span = training_span!(rows.len());
        let _enter = span.enter();
        let metrics = self.model.train(rows)?;
        events::model_trained(
            &metrics.model_version,
            metrics.organic_rows,
            metrics.val_r2,
            metrics.training_time,
        );
        Ok(metrics)
    }

    pub fn status(&self) -> ModelStatus {
        let snapshot = self.model.snapshot();
        ModelStatus {
            is_trained: snapshot.is_some(),
            metrics: snapshot.as_ref().map(|m| m.metrics().clone()),
            feature_importance: snapshot.as_ref().map(|m| m.feature_importance()),
            active_degradations: self.active_degradations(),
        }
    }

    pub fn active_degradations(&self) -> Vec<DegradationEvent> {
        self.degradations
            .lock()
            .map(|t| t.active_events())
            .unwrap_or_default()
    }

    pub(crate) fn record_degradation(&self, component: &str, failure: &str, fallback: &str) {
        if let Ok(mut tracker) = self.degradations.lock() {
            tracker.record_now(component, failure, fallback);
        }
    }

    pub(crate) fn mark_recovered(&self, component: &str) {
        if let Ok(mut tracker) = self.degradations.lock() {
            tracker.mark_recovered(component);
        }
    }
}
