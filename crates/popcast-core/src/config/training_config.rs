use serde::{Deserialize, Serialize};

use super::defaults;

/// Training-run policy: sample floor, validation split, augmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Organic rows below this count fail with `InsufficientData`.
    pub min_rows: usize,
    /// Fraction of organic rows held out for validation.
    pub validation_fraction: f64,
    /// Seed for shuffling, augmentation, and tree sampling.
    pub seed: u64,
    pub augmentation: AugmentationConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_rows: defaults::DEFAULT_MIN_TRAINING_ROWS,
            validation_fraction: defaults::DEFAULT_VALIDATION_FRACTION,
            seed: defaults::DEFAULT_SEED,
            augmentation: AugmentationConfig::default(),
        }
    }
}

/// Synthetic-copy augmentation of the training split.
///
/// Each training row receives `copies_per_row` copies whose primary
/// indicators and label are scaled by independent factors drawn uniformly
/// from `[1 - noise_scale, 1 + noise_scale]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    pub enabled: bool,
    pub copies_per_row: usize,
    pub noise_scale: f64,
    /// Augmentation only applies while the organic row count is below this.
    pub max_organic_rows: usize,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_AUGMENTATION_ENABLED,
            copies_per_row: defaults::DEFAULT_AUGMENTATION_COPIES,
            noise_scale: defaults::DEFAULT_AUGMENTATION_NOISE,
            max_organic_rows: defaults::DEFAULT_AUGMENTATION_MAX_ORGANIC_ROWS,
        }
    }
}
