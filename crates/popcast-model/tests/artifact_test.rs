use popcast_core::config::PopcastConfig;
use popcast_core::errors::{ModelError, PopcastError};
use popcast_features::build;
use popcast_model::artifact::{self, ModelArtifact};
use popcast_model::booster::TreeNode;
use popcast_model::ForecastModel;

fn config_with_artifact(path: Option<String>) -> PopcastConfig {
    let mut config = PopcastConfig::default();
    config.model.n_estimators = 40;
    config.model.artifact_path = path;
    config
}

#[test]
fn training_persists_and_a_fresh_process_serves_identical_forecasts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("models").join("population_model.json");
    let config = config_with_artifact(Some(path.display().to_string()));

    let original = ForecastModel::new(&config);
    original.train(&test_fixtures::synthetic_rows(60)).unwrap();
    assert!(path.exists());

    let restarted = ForecastModel::new(&config);
    let metrics = restarted.load_configured().unwrap();
    assert_eq!(Some(metrics), original.metrics());

    let initial = build(&test_fixtures::sample_profile()).unwrap();
    assert_eq!(
        original.forecast(&initial, 1e8, 20).unwrap(),
        restarted.forecast(&initial, 1e8, 20).unwrap()
    );
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let model = ForecastModel::new(&config_with_artifact(None));
    model.train(&test_fixtures::synthetic_rows(30)).unwrap();

    let path = dir.path().join("model.json");
    model.save(&path).unwrap();
    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn save_without_model_is_not_trained() {
    let dir = tempfile::tempdir().unwrap();
    let model = ForecastModel::new(&config_with_artifact(None));
    assert!(matches!(
        model.save(&dir.path().join("m.json")),
        Err(PopcastError::ModelError(ModelError::NotTrained))
    ));
}

#[test]
fn missing_artifact_starts_untrained() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let model = ForecastModel::new(&config_with_artifact(Some(path.display().to_string())));
    assert!(model.load_configured().is_none());
    assert!(!model.is_trained());
}

#[test]
fn mismatched_feature_names_are_incompatible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let model = ForecastModel::new(&config_with_artifact(None));
    model.train(&test_fixtures::synthetic_rows(30)).unwrap();
    model.save(&path).unwrap();

    let mut doc: ModelArtifact =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    doc.feature_names.swap(0, 1);
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    match artifact::load(&path) {
        Err(PopcastError::ModelError(ModelError::IncompatibleArtifact { reason })) => {
            assert!(reason.contains("feature names"))
        }
        other => panic!("expected incompatible artifact, got {other:?}"),
    }
}

#[test]
fn out_of_range_split_feature_is_incompatible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    let model = ForecastModel::new(&config_with_artifact(None));
    model.train(&test_fixtures::synthetic_rows(30)).unwrap();
    model.save(&path).unwrap();

    let mut doc: ModelArtifact =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    let mut edited = 0;
    for tree in &mut doc.trees {
        if let TreeNode::Split { feature, .. } = &mut tree.root {
            *feature = 99;
            edited += 1;
        }
    }
    assert!(edited > 0);
    std::fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();

    match artifact::load(&path) {
        Err(PopcastError::ModelError(ModelError::IncompatibleArtifact { reason })) => {
            assert!(reason.contains("feature index 99"))
        }
        other => panic!("expected incompatible artifact, got {other:?}"),
    }
}

#[test]
fn corrupt_artifact_is_incompatible_and_skipped_on_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, b"{ not json").unwrap();

    assert!(matches!(
        artifact::load(&path),
        Err(PopcastError::ModelError(ModelError::IncompatibleArtifact { .. }))
    ));
    let model = ForecastModel::new(&config_with_artifact(Some(path.display().to_string())));
    assert!(model.load_configured().is_none());
}
