//! Training pipeline: organic split, augmentation, fit, evaluation.

mod augment;
mod split;

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::Utc;
use popcast_core::config::{ModelConfig, TrainingConfig};
use popcast_core::errors::{ModelError, PopcastResult};
use popcast_core::models::{FeatureName, ModelMetrics, TrainingRow};
use popcast_features::{normalize, validate_vector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

pub use augment::augment;
pub use split::train_validation_split;

use crate::booster::{GradientBooster, Row};
use crate::metrics::{mae, r2, rmse};
use crate::trained::TrainedModel;

/// Fit a new model on organic `rows`.
///
/// Rows are split before augmentation, so validation scores only ever see
/// organic rows. Fails with `InsufficientData` below `training.min_rows`.
pub fn train_model(
    rows: &[TrainingRow],
    model: &ModelConfig,
    training: &TrainingConfig,
) -> PopcastResult<TrainedModel> {
    if rows.len() < training.min_rows {
        return Err(ModelError::InsufficientData {
            rows: rows.len(),
            min_rows: training.min_rows,
        }
        .into());
    }
    for row in rows {
        validate_vector(&row.features)?;
        if !row.growth_rate.is_finite() {
            return Err(ModelError::TrainingFailed {
                reason: "growth rate label is not finite".to_string(),
            }
            .into());
        }
    }

    let started = Instant::now();
    let mut rng = StdRng::seed_from_u64(training.seed);
    let (train_rows, val_rows) =
        train_validation_split(rows, training.validation_fraction, &mut rng);

    let aug = &training.augmentation;
    let fit_rows = if aug.enabled && aug.copies_per_row > 0 && rows.len() < aug.max_organic_rows {
        augment(&train_rows, aug, &mut rng)
    } else {
        train_rows.clone()
    };
    debug!(
        organic = rows.len(),
        train = train_rows.len(),
        validation = val_rows.len(),
        fitted = fit_rows.len(),
        "prepared training set"
    );

    let (x_fit, y_fit) = matrix(&fit_rows);
    let booster = GradientBooster::fit(&x_fit, &y_fit, model, training.seed)?;

    let (x_train, y_train) = matrix(&train_rows);
    let (x_val, y_val) = matrix(&val_rows);
    let train_pred = booster.predict(&x_train);
    let val_pred = booster.predict(&x_val);

    let importance = booster.feature_importance();
    let feature_importance: BTreeMap<FeatureName, f64> = FeatureName::ALL
        .into_iter()
        .zip(importance)
        .collect();

    let metrics = ModelMetrics {
        train_rmse: rmse(&y_train, &train_pred),
        val_rmse: rmse(&y_val, &val_pred),
        train_mae: mae(&y_train, &train_pred),
        val_mae: mae(&y_val, &val_pred),
        train_r2: r2(&y_train, &train_pred),
        val_r2: r2(&y_val, &val_pred),
        feature_importance,
        training_time: started.elapsed().as_secs_f64(),
        organic_rows: rows.len(),
        training_rows: train_rows.len(),
        augmented_rows: fit_rows.len() - train_rows.len(),
        validation_rows: val_rows.len(),
        seed: training.seed,
        model_version: uuid::Uuid::new_v4().to_string(),
        trained_at: Utc::now(),
    };

    info!(
        organic_rows = metrics.organic_rows,
        augmented_rows = metrics.augmented_rows,
        val_rmse = metrics.val_rmse,
        val_r2 = metrics.val_r2,
        training_time = metrics.training_time,
        "model trained"
    );

    Ok(TrainedModel::new(booster, model.clone(), metrics))
}

fn matrix(rows: &[TrainingRow]) -> (Vec<Row>, Vec<f64>) {
    rows.iter()
        .map(|r| (normalize(&r.features), r.growth_rate))
        .unzip()
}
