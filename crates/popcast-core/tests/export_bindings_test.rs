//! Ensures every dashboard-facing type derives `TS`.
//!
//! Run with: cargo test -p popcast-core export_bindings
//! Generated files appear in popcast-core/bindings/*.ts

#[test]
fn export_bindings() {
    use popcast_core::models::{
        AdjustmentSet, ChatReply, ChatRequest, CountryHistory, CountryProfile, DegradationEvent,
        FeatureName, FeatureVector, ForecastPoint, ForecastSummary, InsightsRequest,
        InsightsResponse, ModelMetrics, ModelStatus, NarrativeStatus, PredictionRequest,
        PredictionResponse, RagNarrative, RetrievedContext, RetrievedSnippet, TrainingRequest,
        TrainingResponse,
    };
    use ts_rs::TS;

    fn assert_ts<T: TS>() {}

    assert_ts::<CountryProfile>();
    assert_ts::<CountryHistory>();
    assert_ts::<FeatureName>();
    assert_ts::<FeatureVector>();
    assert_ts::<ForecastPoint>();
    assert_ts::<ForecastSummary>();
    assert_ts::<ModelMetrics>();
    assert_ts::<RetrievedSnippet>();
    assert_ts::<RetrievedContext>();
    assert_ts::<AdjustmentSet>();
    assert_ts::<NarrativeStatus>();
    assert_ts::<RagNarrative>();
    assert_ts::<PredictionRequest>();
    assert_ts::<PredictionResponse>();
    assert_ts::<ChatRequest>();
    assert_ts::<ChatReply>();
    assert_ts::<InsightsRequest>();
    assert_ts::<InsightsResponse>();
    assert_ts::<TrainingRequest>();
    assert_ts::<TrainingResponse>();
    assert_ts::<ModelStatus>();
    assert_ts::<DegradationEvent>();
}
