use crate::models::{AdjustmentOutcome, FeatureVector, RetrievedContext};

/// Turns retrieved context into bounded feature adjustments.
///
/// Infallible by contract: every failure becomes a degraded outcome with an
/// empty adjustment set.
pub trait INarrativeAdjuster: Send + Sync {
    fn adjust(&self, base: &FeatureVector, context: &RetrievedContext) -> AdjustmentOutcome;
}
