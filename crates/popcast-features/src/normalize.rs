use popcast_core::constants::FEATURE_SCALES;
use popcast_core::models::{FeatureName, FeatureVector};

/// Model input row: each feature divided by its fixed scale.
pub fn normalize(vector: &FeatureVector) -> [f64; FeatureName::COUNT] {
    let mut out = [0.0; FeatureName::COUNT];
    normalize_into(vector, &mut out);
    out
}

/// Write the normalized row into `out`.
pub fn normalize_into(vector: &FeatureVector, out: &mut [f64; FeatureName::COUNT]) {
    for (slot, (value, scale)) in out
        .iter_mut()
        .zip(vector.to_array().into_iter().zip(FEATURE_SCALES))
    {
        *slot = value / scale;
    }
}
