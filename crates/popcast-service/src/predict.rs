//! The prediction pipeline.

use popcast_core::constants::{components, country_name};
use popcast_core::errors::{PopcastResult, ValidationError};
use popcast_core::models::{
    AdjustmentOutcome, CountryProfile, FeatureVector, ForecastPoint, NarrativeStatus,
    PredictionRequest, PredictionResponse, RagAdjustment, RagNarrative, RetrievedContext,
};
use popcast_features::{build, validate_adjusted, validate_population};
use popcast_observability::tracing_setup::events;
use popcast_observability::{forecast_span, generation_span, retrieval_span};
use tracing::{debug, warn};

use crate::engine::ForecastService;

const BASELINE_FALLBACK: &str = "baseline forecast";

/// Forecast plus narrative for one request.
struct Narrated {
    forecast: Vec<ForecastPoint>,
    baseline: Option<Vec<ForecastPoint>>,
    narrative: RagNarrative,
}

impl ForecastService {
    /// Baseline forecast, optionally adjusted from retrieved context.
    ///
    /// Validation and `NotTrained` surface as errors. Retrieval and
    /// generation failures never do: the baseline is returned with a
    /// `degraded` narrative.
    pub fn predict(&self, request: &PredictionRequest) -> PopcastResult<PredictionResponse> {
        let profile = &request.country_data;
        let years = self.model.validate_years(request.years)?;
        let span = forecast_span!(profile.code, years, request.use_rag);
        let _enter = span.enter();

        let base = build(profile)?;
        let population = validate_population(
            profile
                .population
                .ok_or_else(|| ValidationError::missing("population"))?,
        )?;
        let baseline = self.model.forecast(&base, population, request.years)?;

        let (forecast, baseline_forecast, rag_adjustments) = if request.use_rag {
            let narrated = self.narrate(profile, &base, population, baseline)?;
            events::forecast_completed(&profile.code, years, status_label(narrated.narrative.status));
            (
                narrated.forecast,
                narrated.baseline,
                RagAdjustment::Adjustment(narrated.narrative),
            )
        } else {
            events::forecast_completed(&profile.code, years, "none");
            (baseline, None, RagAdjustment::NoAdjustment)
        };

        Ok(PredictionResponse {
            forecast,
            baseline_forecast,
            metrics: self.model.metrics(),
            rag_adjustments,
        })
    }

    fn narrate(
        &self,
        profile: &CountryProfile,
        base: &FeatureVector,
        population: f64,
        baseline: Vec<ForecastPoint>,
    ) -> PopcastResult<Narrated> {
        let code = profile.code.trim().to_ascii_uppercase();
        let display = display_name(profile, &code);

        let context = match self.retrieve(&code, &display) {
            Ok(context) => context,
            Err(failure) => {
                return Ok(Narrated {
                    forecast: baseline,
                    baseline: None,
                    narrative: RagNarrative::degraded(
                        "Context retrieval failed; baseline forecast kept.",
                        failure,
                    ),
                });
            }
        };
        if context.is_empty() {
            debug!(country = %code, "no context documents");
            return Ok(Narrated {
                forecast: baseline,
                baseline: None,
                narrative: RagNarrative::no_context(&display),
            });
        }

        let outcome = {
            let span = generation_span!("adjustment", self.generator.name());
            let _enter = span.enter();
            self.adjuster.adjust(base, &context)
        };
        if let Some(reason) = &outcome.degraded {
            self.record_degradation(components::ADJUSTER, reason, BASELINE_FALLBACK);
            let mut narrative = RagNarrative::degraded(outcome.summary.clone(), reason.clone());
            narrative.sources = context.into_snippets();
            return Ok(Narrated {
                forecast: baseline,
                baseline: None,
                narrative,
            });
        }
        self.mark_recovered(components::ADJUSTER);

        if outcome.adjustments.is_empty() {
            return Ok(Narrated {
                forecast: baseline,
                baseline: None,
                narrative: applied(outcome, context),
            });
        }

        let adjusted = outcome.adjustments.apply_to(base);
        if let Err(e) = validate_adjusted(&adjusted) {
            warn!(country = %code, error = %e, "adjusted features invalid; keeping baseline");
            self.record_degradation(components::ADJUSTER, &e.to_string(), BASELINE_FALLBACK);
            let mut narrative = RagNarrative::degraded(
                "Proposed adjustments produced invalid inputs; baseline forecast kept.",
                e.to_string(),
            );
            narrative.sources = context.into_snippets();
            return Ok(Narrated {
                forecast: baseline,
                baseline: None,
                narrative,
            });
        }

        let forecast = self
            .model
            .forecast(&adjusted, population, baseline.len() as i64)?;
        events::adjustments_applied(&code, outcome.adjustments.len(), outcome.ignored_keys.len());
        Ok(Narrated {
            forecast,
            baseline: Some(baseline),
            narrative: applied(outcome, context),
        })
    }

    /// Retrieval with failures recorded and converted to a reason string.
    fn retrieve(&self, code: &str, display: &str) -> Result<RetrievedContext, String> {
        let top_k = self.config.retrieval.top_k;
        let span = retrieval_span!(code, top_k);
        let _enter = span.enter();

        let query = self.config.retrieval.query_template.replace("{country}", display);
        match self.retriever.retrieve(code, &query, top_k) {
            Ok(context) => {
                self.mark_recovered(components::RETRIEVER);
                Ok(context)
            }
            Err(e) => {
                warn!(country = %code, error = %e, "context retrieval failed; keeping baseline");
                self.record_degradation(components::RETRIEVER, &e.to_string(), BASELINE_FALLBACK);
                Err(e.to_string())
            }
        }
    }
}

fn applied(outcome: AdjustmentOutcome, context: RetrievedContext) -> RagNarrative {
    RagNarrative {
        status: NarrativeStatus::Applied,
        summary: outcome.summary,
        adjustments: outcome.adjustments,
        insights: outcome.insights,
        sources: context.into_snippets(),
        confidence: outcome.confidence,
        ignored_keys: outcome.ignored_keys,
        note: None,
    }
}

fn display_name(profile: &CountryProfile, code: &str) -> String {
    if !profile.name.trim().is_empty() {
        return profile.name.trim().to_string();
    }
    country_name(code).unwrap_or(code).to_string()
}

fn status_label(status: NarrativeStatus) -> &'static str {
    match status {
        NarrativeStatus::Applied => "applied",
        NarrativeStatus::NoContext => "no_context",
        NarrativeStatus::Degraded => "degraded",
    }
}
