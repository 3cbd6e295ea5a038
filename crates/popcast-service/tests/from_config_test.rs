//! Services assembled from configuration with on-disk state.

use popcast_core::config::{GenAiConfig, PopcastConfig};
use popcast_core::models::{NarrativeStatus, PredictionRequest, TrainingRequest};
use popcast_service::ForecastService;
use test_fixtures::sample_profile;

fn disk_config(dir: &tempfile::TempDir) -> PopcastConfig {
    let mut config = PopcastConfig::default();
    config.model.n_estimators = 40;
    config.model.artifact_path = Some(dir.path().join("model.json").display().to_string());
    config.retrieval.index_path = dir.path().join("context.db").display().to_string();
    config.genai = GenAiConfig::disabled();
    config
}

#[test]
fn persisted_model_is_loaded_on_start() {
    let dir = tempfile::tempdir().unwrap();
    let config = disk_config(&dir);

    let first = ForecastService::from_config(config.clone()).unwrap();
    assert!(!first.status().is_trained);
    let trained = first
        .train(&TrainingRequest {
            countries_data: test_fixtures::histories(3),
            rows: Vec::new(),
        })
        .unwrap();
    drop(first);

    let second = ForecastService::from_config(config).unwrap();
    let status = second.status();
    assert!(status.is_trained);
    assert_eq!(
        status.metrics.map(|m| m.model_version),
        Some(trained.metrics.model_version)
    );
}

#[test]
fn loading_can_be_switched_off() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = disk_config(&dir);
    ForecastService::from_config(config.clone())
        .unwrap()
        .train(&TrainingRequest {
            countries_data: test_fixtures::histories(3),
            rows: Vec::new(),
        })
        .unwrap();

    config.server.load_model_on_start = false;
    let service = ForecastService::from_config(config).unwrap();
    assert!(!service.status().is_trained);
}

#[test]
fn empty_index_yields_no_context() {
    let dir = tempfile::tempdir().unwrap();
    let service = ForecastService::from_config(disk_config(&dir)).unwrap();
    service
        .train(&TrainingRequest {
            countries_data: test_fixtures::histories(3),
            rows: Vec::new(),
        })
        .unwrap();

    let response = service
        .predict(&PredictionRequest {
            country_data: sample_profile(),
            years: 5,
            use_rag: true,
        })
        .unwrap();
    let narrative = response.rag_adjustments.narrative().unwrap();
    assert_eq!(narrative.status, NarrativeStatus::NoContext);
    assert_eq!(response.forecast.len(), 5);
    assert!(response.baseline_forecast.is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = PopcastConfig::default();
    config.model.n_estimators = 0;
    assert!(ForecastService::from_config(config).is_err());
}
