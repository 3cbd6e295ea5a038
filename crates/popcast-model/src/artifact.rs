//! Durable model artifact.
//!
//! JSON document carrying the format version, the feature names the model
//! was fitted on, hyperparameters, the ensemble, and the training metrics.
//! Written to a sibling temp file and renamed into place.

use std::io::Write;
use std::path::{Path, PathBuf};

use popcast_core::config::ModelConfig;
use popcast_core::constants::ARTIFACT_FORMAT_VERSION;
use popcast_core::errors::{ModelError, PopcastResult};
use popcast_core::models::{FeatureName, ModelMetrics};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::booster::{GradientBooster, RegressionTree};
use crate::trained::TrainedModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub config: ModelConfig,
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
    pub metrics: ModelMetrics,
}

impl ModelArtifact {
    pub fn from_model(model: &TrainedModel) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_names: FeatureName::ALL
                .iter()
                .map(|n| n.as_str().to_string())
                .collect(),
            config: model.config().clone(),
            base_score: model.booster().base_score,
            trees: model.booster().trees.clone(),
            metrics: model.metrics().clone(),
        }
    }

    /// Check compatibility and rebuild the model.
    pub fn into_model(self) -> PopcastResult<TrainedModel> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::IncompatibleArtifact {
                reason: format!(
                    "format version {} (expected {ARTIFACT_FORMAT_VERSION})",
                    self.format_version
                ),
            }
            .into());
        }
        let expected: Vec<&str> = FeatureName::ALL.iter().map(|n| n.as_str()).collect();
        if self.feature_names != expected {
            return Err(ModelError::IncompatibleArtifact {
                reason: format!(
                    "feature names {:?} do not match {:?}",
                    self.feature_names, expected
                ),
            }
            .into());
        }
        if let Some(feature) = self
            .trees
            .iter()
            .filter_map(|t| t.root.max_feature())
            .find(|&f| f >= FeatureName::COUNT)
        {
            return Err(ModelError::IncompatibleArtifact {
                reason: format!(
                    "split on feature index {feature}, model has {} features",
                    FeatureName::COUNT
                ),
            }
            .into());
        }
        let booster = GradientBooster {
            base_score: self.base_score,
            trees: self.trees,
        };
        Ok(TrainedModel::new(booster, self.config, self.metrics))
    }
}

fn persistence(path: &Path, reason: impl ToString) -> ModelError {
    ModelError::Persistence {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `model` to `path` atomically.
pub fn save(model: &TrainedModel, path: &Path) -> PopcastResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| persistence(parent, e))?;
    }
    let body = serde_json::to_vec(&ModelArtifact::from_model(model))?;

    let tmp = temp_path(path);
    {
        let mut file = std::fs::File::create(&tmp).map_err(|e| persistence(&tmp, e))?;
        file.write_all(&body).map_err(|e| persistence(&tmp, e))?;
        file.sync_all().map_err(|e| persistence(&tmp, e))?;
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(persistence(path, e).into());
    }

    info!(path = %path.display(), bytes = body.len(), "model artifact saved");
    Ok(())
}

/// Read and validate an artifact.
pub fn load(path: &Path) -> PopcastResult<TrainedModel> {
    let body = std::fs::read(path).map_err(|e| persistence(path, e))?;
    let artifact: ModelArtifact = serde_json::from_slice(&body).map_err(|e| {
        ModelError::IncompatibleArtifact {
            reason: format!("{}: {e}", path.display()),
        }
    })?;
    let model = artifact.into_model()?;
    info!(
        path = %path.display(),
        model_version = %model.metrics().model_version,
        "model artifact loaded"
    );
    Ok(model)
}
