//! Gradient-boosted regression with squared-error loss.
//!
//! 1. Start from `base_score = mean(y)`.
//! 2. Each round: gradients `g = ŷ − y`, hessians `h = 1`; draw a row
//!    subsample and a column subsample; grow one tree; add its shrunk
//!    leaf weights to `ŷ`.
//! 3. Prediction is `base_score + Σ tree(x)`.

mod tree;

use popcast_core::config::ModelConfig;
use popcast_core::errors::{ModelError, PopcastResult};
use popcast_core::models::FeatureName;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

pub use tree::{RegressionTree, Row, TreeNode, TreeParams};

/// A fitted ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBooster {
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

impl GradientBooster {
    /// Fit on normalized rows `x` with labels `y`.
    pub fn fit(x: &[Row], y: &[f64], config: &ModelConfig, seed: u64) -> PopcastResult<Self> {
        if x.len() != y.len() {
            return Err(ModelError::TrainingFailed {
                reason: format!("{} rows but {} labels", x.len(), y.len()),
            }
            .into());
        }
        if x.is_empty() {
            return Err(ModelError::TrainingFailed {
                reason: "cannot fit with zero rows".to_string(),
            }
            .into());
        }
        if let Some(bad) = y.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::TrainingFailed {
                reason: format!("label at row {bad} is not finite"),
            }
            .into());
        }

        let params = TreeParams {
            max_depth: config.max_depth,
            min_child_weight: config.min_child_weight,
            gamma: config.gamma,
            reg_alpha: config.reg_alpha,
            reg_lambda: config.reg_lambda,
            learning_rate: config.learning_rate,
        };
        let mut rng = StdRng::seed_from_u64(seed);

        let n = x.len();
        let base_score = y.iter().sum::<f64>() / n as f64;
        let mut pred = vec![base_score; n];
        let hess = vec![1.0; n];
        let mut grad = vec![0.0; n];

        let rows_per_tree = fraction_count(n, config.subsample);
        let cols_per_tree = fraction_count(FeatureName::COUNT, config.colsample_bytree);
        let mut all_rows: Vec<usize> = (0..n).collect();
        let mut all_cols: Vec<usize> = (0..FeatureName::COUNT).collect();

        let mut trees = Vec::with_capacity(config.n_estimators);
        for _ in 0..config.n_estimators {
            for ((g, p), target) in grad.iter_mut().zip(&pred).zip(y) {
                *g = p - target;
            }

            all_rows.shuffle(&mut rng);
            let mut sample = all_rows[..rows_per_tree].to_vec();
            sample.sort_unstable();

            all_cols.shuffle(&mut rng);
            let mut features = all_cols[..cols_per_tree].to_vec();
            features.sort_unstable();

            let tree = RegressionTree::grow(x, &grad, &hess, &sample, &features, &params);
            for (p, row) in pred.iter_mut().zip(x) {
                *p += tree.predict(row);
            }
            trees.push(tree);
        }

        Ok(Self { base_score, trees })
    }

    pub fn predict_row(&self, row: &Row) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.predict(row)).sum::<f64>()
    }

    pub fn predict(&self, x: &[Row]) -> Vec<f64> {
        x.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Total split gain per feature, normalized to sum to 1.
    ///
    /// All zeros when no tree split at all.
    pub fn feature_importance(&self) -> [f64; FeatureName::COUNT] {
        let mut totals = [0.0; FeatureName::COUNT];
        for tree in &self.trees {
            tree.accumulate_gain(&mut totals);
        }
        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            for t in &mut totals {
                *t /= sum;
            }
        }
        totals
    }
}

/// `ceil(n * ratio)`, at least 1 and at most `n`.
fn fraction_count(n: usize, ratio: f64) -> usize {
    ((n as f64 * ratio).ceil() as usize).clamp(1, n.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ModelConfig {
        ModelConfig {
            n_estimators: 60,
            learning_rate: 0.3,
            max_depth: 3,
            min_child_weight: 1.0,
            subsample: 1.0,
            colsample_bytree: 1.0,
            gamma: 0.0,
            reg_alpha: 0.0,
            reg_lambda: 1.0,
            ..Default::default()
        }
    }

    fn linear_data(n: usize) -> (Vec<Row>, Vec<f64>) {
        let x: Vec<Row> = (0..n)
            .map(|i| {
                let mut row = [0.5; FeatureName::COUNT];
                row[0] = i as f64 / n as f64;
                row
            })
            .collect();
        let y = x.iter().map(|r| 3.0 * r[0] - 1.0).collect();
        (x, y)
    }

    #[test]
    fn fits_a_monotone_signal() {
        let (x, y) = linear_data(80);
        let config = ModelConfig {
            n_estimators: 100,
            ..small_config()
        };
        let model = GradientBooster::fit(&x, &y, &config, 7).unwrap();
        let pred = model.predict(&x);
        let mse: f64 =
            pred.iter().zip(&y).map(|(p, t)| (p - t).powi(2)).sum::<f64>() / y.len() as f64;
        assert!(mse < 0.02, "mse {mse}");
        assert!(model.predict_row(&x[79]) > model.predict_row(&x[0]));
    }

    #[test]
    fn base_score_is_label_mean() {
        let (x, y) = linear_data(10);
        let config = ModelConfig {
            n_estimators: 1,
            ..small_config()
        };
        let model = GradientBooster::fit(&x, &y, &config, 1).unwrap();
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        assert!((model.base_score - mean).abs() < 1e-12);
    }

    #[test]
    fn importance_is_normalized_and_concentrated() {
        let (x, y) = linear_data(80);
        let model = GradientBooster::fit(&x, &y, &small_config(), 7).unwrap();
        let imp = model.feature_importance();
        assert!((imp.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((imp[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_trees() {
        let (x, y) = linear_data(50);
        let config = ModelConfig {
            subsample: 0.7,
            colsample_bytree: 0.6,
            ..small_config()
        };
        let a = GradientBooster::fit(&x, &y, &config, 42).unwrap();
        let b = GradientBooster::fit(&x, &y, &config, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_mismatched_lengths_and_empty_input() {
        let (x, y) = linear_data(10);
        assert!(GradientBooster::fit(&x, &y[..5], &small_config(), 1).is_err());
        assert!(GradientBooster::fit(&[], &[], &small_config(), 1).is_err());
    }

    #[test]
    fn fraction_count_bounds() {
        assert_eq!(fraction_count(7, 0.8), 6);
        assert_eq!(fraction_count(10, 0.01), 1);
        assert_eq!(fraction_count(10, 1.0), 10);
    }
}
