//! Generator-backed narrative adjuster.

use std::sync::Arc;

use popcast_core::models::{AdjustmentOutcome, FeatureVector, RetrievedContext};
use popcast_core::traits::{INarrativeAdjuster, ITextGenerator};
use tracing::{debug, warn};

use crate::prompts::adjustment_prompt;
use crate::response::parse_narrative;

pub struct LlmNarrativeAdjuster {
    generator: Arc<dyn ITextGenerator>,
    max_abs_delta: f64,
}

impl LlmNarrativeAdjuster {
    pub fn new(generator: Arc<dyn ITextGenerator>, max_abs_delta: f64) -> Self {
        Self {
            generator,
            max_abs_delta: max_abs_delta.abs(),
        }
    }
}

impl INarrativeAdjuster for LlmNarrativeAdjuster {
    fn adjust(&self, base: &FeatureVector, context: &RetrievedContext) -> AdjustmentOutcome {
        if context.is_empty() {
            return AdjustmentOutcome {
                summary: "No context supplied; no adjustments proposed.".to_string(),
                ..AdjustmentOutcome::default()
            };
        }
        if !self.generator.is_available() {
            return AdjustmentOutcome::degraded(format!(
                "text generation unavailable ({})",
                self.generator.name()
            ));
        }

        let prompt = adjustment_prompt(base, context, self.max_abs_delta);
        let text = match self.generator.generate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                warn!(generator = self.generator.name(), error = %e, "narrative generation failed");
                return AdjustmentOutcome::degraded(e.to_string());
            }
        };

        match parse_narrative(self.generator.name(), &text, self.max_abs_delta) {
            Ok(parsed) => {
                if !parsed.ignored_keys.is_empty() {
                    warn!(keys = ?parsed.ignored_keys, "ignoring adjustments for unknown features");
                }
                if !parsed.clamped.is_empty() {
                    warn!(features = ?parsed.clamped, bound = self.max_abs_delta, "clamped oversized adjustments");
                }
                debug!(adjustments = parsed.adjustments.len(), "narrative parsed");
                AdjustmentOutcome {
                    adjustments: parsed.adjustments,
                    summary: parsed.summary,
                    insights: parsed.insights,
                    confidence: parsed.confidence,
                    ignored_keys: parsed.ignored_keys,
                    degraded: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "discarding malformed narrative response");
                AdjustmentOutcome::degraded(e.to_string())
            }
        }
    }
}
