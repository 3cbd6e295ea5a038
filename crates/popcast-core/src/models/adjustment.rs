use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{FeatureName, FeatureVector, RetrievedSnippet};

/// Signed additive deltas keyed by feature name.
///
/// Only names in [`FeatureName::ALL`] can be represented, so unknown keys are
/// filtered out before a set is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdjustmentSet(BTreeMap<FeatureName, f64>);

impl AdjustmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a delta, clamped to `±max_abs_delta`. Returns `true` if clamping occurred.
    pub fn insert_clamped(&mut self, name: FeatureName, delta: f64, max_abs_delta: f64) -> bool {
        let bound = max_abs_delta.abs();
        let clamped = delta.clamp(-bound, bound);
        self.0.insert(name, clamped);
        clamped != delta
    }

    pub fn insert(&mut self, name: FeatureName, delta: f64) {
        self.0.insert(name, delta);
    }

    pub fn get(&self, name: FeatureName) -> Option<f64> {
        self.0.get(&name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureName, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Add every delta to the matching feature. Untouched features keep their value.
    pub fn apply_to(&self, base: &FeatureVector) -> FeatureVector {
        let mut adjusted = *base;
        for (name, delta) in self.iter() {
            adjusted.set(name, adjusted.get(name) + delta);
        }
        adjusted
    }
}

impl FromIterator<(FeatureName, f64)> for AdjustmentSet {
    fn from_iter<T: IntoIterator<Item = (FeatureName, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What the narrative layer did for one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NarrativeStatus {
    /// Adjustments (possibly empty) were produced from retrieved context.
    Applied,
    /// Retrieval found nothing; the baseline stands.
    NoContext,
    /// Retrieval or generation failed; the baseline stands.
    Degraded,
}

/// Narrative and adjustment details returned with a RAG prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RagNarrative {
    pub status: NarrativeStatus,
    pub summary: String,
    pub adjustments: AdjustmentSet,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub sources: Vec<RetrievedSnippet>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub ignored_keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RagNarrative {
    /// Narrative for a request whose retrieval returned no snippets.
    pub fn no_context(country: &str) -> Self {
        Self {
            status: NarrativeStatus::NoContext,
            summary: format!("No contextual documents found for {country}; baseline forecast kept."),
            adjustments: AdjustmentSet::new(),
            insights: Vec::new(),
            sources: Vec::new(),
            confidence: None,
            ignored_keys: Vec::new(),
            note: None,
        }
    }

    /// Narrative for a request whose retrieval or generation failed.
    pub fn degraded(summary: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            status: NarrativeStatus::Degraded,
            summary: summary.into(),
            adjustments: AdjustmentSet::new(),
            insights: Vec::new(),
            sources: Vec::new(),
            confidence: None,
            ignored_keys: Vec::new(),
            note: Some(note.into()),
        }
    }
}

/// Result of the narrative step of a prediction.
///
/// Serialized as `null` when RAG was not requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<RagNarrative>", into = "Option<RagNarrative>")]
pub enum RagAdjustment {
    #[default]
    NoAdjustment,
    Adjustment(RagNarrative),
}

impl RagAdjustment {
    pub fn narrative(&self) -> Option<&RagNarrative> {
        match self {
            RagAdjustment::NoAdjustment => None,
            RagAdjustment::Adjustment(n) => Some(n),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RagAdjustment::NoAdjustment)
    }
}

impl From<Option<RagNarrative>> for RagAdjustment {
    fn from(value: Option<RagNarrative>) -> Self {
        match value {
            Some(n) => RagAdjustment::Adjustment(n),
            None => RagAdjustment::NoAdjustment,
        }
    }
}

impl From<RagAdjustment> for Option<RagNarrative> {
    fn from(value: RagAdjustment) -> Self {
        match value {
            RagAdjustment::NoAdjustment => None,
            RagAdjustment::Adjustment(n) => Some(n),
        }
    }
}

/// Output of a narrative adjuster. Never an error: failures set `degraded`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentOutcome {
    pub adjustments: AdjustmentSet,
    pub summary: String,
    pub insights: Vec<String>,
    pub confidence: Option<f64>,
    /// Keys the generator proposed that are not model features.
    pub ignored_keys: Vec<String>,
    /// Reason the adjuster fell back, if it did.
    pub degraded: Option<String>,
}

impl AdjustmentOutcome {
    pub fn degraded(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            summary: format!("Narrative analysis unavailable ({reason}); baseline forecast kept."),
            degraded: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}
