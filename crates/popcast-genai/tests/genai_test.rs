//! Narrative adjuster, insights and chat against scripted generators.

use std::sync::Arc;

use popcast_core::models::{
    ChatContext, CountryProfile, FeatureName, FeatureVector, ForecastSummary, RetrievedContext,
    RetrievedSnippet,
};
use popcast_core::traits::INarrativeAdjuster;
use popcast_genai::{
    chat_reply, extract_json_object, generate_insights, DisabledGenerator, LlmNarrativeAdjuster,
};
use proptest::prelude::*;
use test_fixtures::{Script, ScriptedGenerator};
use test_fixtures::narrative_response;

fn base() -> FeatureVector {
    FeatureVector::from_array([15.0, 7.0, 8.0, 15.0 / 7.0, 4001f64.ln(), 74.0, 40.0])
}

fn context() -> RetrievedContext {
    RetrievedContext::from_ranked(
        vec![RetrievedSnippet {
            title: "Thailand expands baby bonus".into(),
            url: "https://example.org/th/baby-bonus".into(),
            snippet: "The cabinet approved an expanded birth incentive policy.".into(),
            relevance_score: 0.8,
        }],
        3,
    )
}

fn adjust_with(reply: &str) -> popcast_core::models::AdjustmentOutcome {
    let generator = Arc::new(ScriptedGenerator::replying(reply));
    LlmNarrativeAdjuster::new(generator, 5.0).adjust(&base(), &context())
}

#[test]
fn valid_response_with_surrounding_text_is_parsed() {
    let out = adjust_with(&narrative_response("valid"));
    assert!(!out.is_degraded());
    assert_eq!(out.adjustments.get(FeatureName::BirthRate), Some(0.4));
    assert_eq!(out.adjustments.get(FeatureName::DeathRate), Some(-0.1));
    assert_eq!(out.adjustments.len(), 2);
    assert_eq!(out.confidence, Some(0.7));
    assert_eq!(out.insights.len(), 2);
    assert_eq!(out.summary, "Birth incentives should modestly lift births.");
}

#[test]
fn fenced_response_is_parsed() {
    let out = adjust_with(&narrative_response("fenced"));
    assert!(!out.is_degraded());
    assert_eq!(out.adjustments.get(FeatureName::Urbanization), Some(1.5));
    assert!(out.insights.is_empty());
    assert_eq!(out.confidence, None);
}

#[test]
fn unknown_keys_are_ignored_and_reported() {
    let out = adjust_with(&narrative_response("unknown_keys"));
    assert!(!out.is_degraded());
    assert_eq!(out.adjustments.len(), 1);
    assert_eq!(out.adjustments.get(FeatureName::BirthRate), Some(0.2));
    let mut ignored = out.ignored_keys.clone();
    ignored.sort();
    assert_eq!(ignored, vec!["fertilityRate", "migration"]);
}

#[test]
fn oversized_deltas_are_clamped() {
    let out = adjust_with(&narrative_response("oversized"));
    assert!(!out.is_degraded());
    assert_eq!(out.adjustments.get(FeatureName::DeathRate), Some(5.0));
    assert_eq!(out.adjustments.get(FeatureName::BirthRate), Some(-5.0));
}

#[test]
fn malformed_responses_degrade_to_empty_set() {
    for name in ["non_numeric", "missing_summary", "not_an_object", "no_json", "truncated"] {
        let out = adjust_with(&narrative_response(name));
        assert!(out.is_degraded(), "{name} should degrade");
        assert!(out.adjustments.is_empty(), "{name} should carry no adjustments");
        assert!(out.summary.contains("baseline forecast kept"), "{name}: {}", out.summary);
    }
}

#[test]
fn generator_failures_degrade() {
    for step in [Script::Timeout, Script::Status(503), Script::Network, Script::Unavailable] {
        let generator = Arc::new(ScriptedGenerator::new(vec![step.clone()]));
        let out = LlmNarrativeAdjuster::new(generator.clone(), 5.0).adjust(&base(), &context());
        assert!(out.is_degraded(), "{step:?}");
        assert!(out.adjustments.is_empty());
        assert_eq!(generator.calls(), 1);
    }
}

#[test]
fn disabled_generator_degrades_without_calling() {
    let out = LlmNarrativeAdjuster::new(Arc::new(DisabledGenerator::new("no key")), 5.0)
        .adjust(&base(), &context());
    assert!(out.is_degraded());
    assert!(out.adjustments.is_empty());
}

#[test]
fn empty_context_skips_generation() {
    let generator = Arc::new(ScriptedGenerator::replying(narrative_response("valid")));
    let out = LlmNarrativeAdjuster::new(generator.clone(), 5.0)
        .adjust(&base(), &RetrievedContext::empty());
    assert!(out.adjustments.is_empty());
    assert!(!out.is_degraded());
    assert_eq!(generator.calls(), 0);
}

#[test]
fn prompt_embeds_features_and_snippets() {
    let generator = Arc::new(ScriptedGenerator::replying(narrative_response("valid")));
    LlmNarrativeAdjuster::new(generator.clone(), 5.0).adjust(&base(), &context());
    let prompt = &generator.prompts()[0];
    assert!(prompt.contains("Thailand expands baby bonus"));
    assert!(prompt.contains("birthRate: 15.000"));
    assert!(prompt.contains("JSON"));
}

fn summary() -> ForecastSummary {
    ForecastSummary {
        growth_rate: 3.4,
        years: 10,
        final_population: 73_000_000.0,
    }
}

fn profile() -> CountryProfile {
    test_fixtures::sample_profile()
}

#[test]
fn insights_are_parsed_from_bullets() {
    let g = ScriptedGenerator::replying("Analysis:\n- Accuracy is high\n- Growth is slowing\n");
    let out = generate_insights(&g, None, &summary(), &profile(), 5);
    assert_eq!(out.insights, vec!["Accuracy is high", "Growth is slowing"]);
    assert!(out.degraded.is_none());
}

#[test]
fn insights_are_capped() {
    let reply: String = (1..=8).map(|i| format!("{i}. point {i}\n")).collect();
    let g = ScriptedGenerator::replying(reply);
    let out = generate_insights(&g, None, &summary(), &profile(), 5);
    assert_eq!(out.insights.len(), 5);
    assert_eq!(out.insights[4], "point 5");
}

#[test]
fn insights_fall_back_to_rules_when_generation_fails() {
    let g = ScriptedGenerator::new(vec![Script::Timeout]);
    let out = generate_insights(&g, None, &summary(), &profile(), 5);
    assert!(out.degraded.is_some());
    assert!(!out.insights.is_empty());
    assert!(out.insights.iter().any(|s| s.contains("grow 3.40%")));
}

#[test]
fn chat_passes_through_generated_reply() {
    let g = ScriptedGenerator::replying("  Growth is slowing because births fell.  ");
    let out = chat_reply(&g, "Why?", &ChatContext::default(), Some(0.9));
    assert_eq!(out.response, "Growth is slowing because births fell.");
    assert!(out.note.is_none());
    assert!(g.prompts()[0].contains("0.900"));
}

#[test]
fn chat_degrades_to_canned_reply() {
    let g = ScriptedGenerator::new(vec![Script::Status(503)]);
    let out = chat_reply(&g, "Tell me about the forecast", &ChatContext::default(), None);
    assert!(out.note.is_some());
    assert!(out.response.contains("gradient-boosted"));

    let out = chat_reply(&DisabledGenerator::new("no key"), "hi", &ChatContext::default(), None);
    assert!(out.note.as_deref().unwrap_or_default().contains("unavailable"));
}

proptest! {
    #[test]
    fn json_object_is_found_inside_brace_free_text(
        prefix in "[a-zA-Z .,:\n]{0,40}",
        suffix in "[a-zA-Z .,:\n]{0,40}",
        delta in -5.0f64..5.0,
    ) {
        let json = format!("{{\"adjustments\": {{\"birthRate\": {delta}}}, \"summary\": \"s\"}}");
        let text = format!("{prefix}{json}{suffix}");
        prop_assert_eq!(extract_json_object(&text), Some(json.as_str()));
    }
}

mod transport {
    use popcast_core::config::GenAiConfig;
    use popcast_core::errors::{PopcastError, UpstreamError};
    use popcast_core::traits::ITextGenerator;
    use popcast_genai::{GeminiGenerator, OpenAiGenerator};
    use test_fixtures::StubServer;

    fn config(server: &StubServer) -> GenAiConfig {
        GenAiConfig {
            base_url: server.url().to_string(),
            timeout_secs: 1,
            max_retries: 1,
            ..GenAiConfig::openai()
        }
    }

    fn openai(server: &StubServer) -> OpenAiGenerator {
        OpenAiGenerator::new(&config(server), "test-key".into()).unwrap()
    }

    #[test]
    fn silent_upstream_times_out_without_retry() {
        let server = StubServer::no_response();
        let err = openai(&server).generate("hello").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Timeout { timeout_ms: 1000, .. })
        ));
        assert_eq!(server.hits(), 1);
    }

    #[test]
    fn stalled_body_is_a_timeout_not_a_malformed_reply() {
        let server = StubServer::stalled_body();
        let err = openai(&server).generate("hello").unwrap_err();
        assert!(
            matches!(err, PopcastError::UpstreamError(UpstreamError::Timeout { .. })),
            "{err:?}"
        );
    }

    #[test]
    fn unavailable_upstream_is_retried_once() {
        let server = StubServer::status(503);
        let err = openai(&server).generate("hello").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Status { status: 503, .. })
        ));
        assert_eq!(server.hits(), 2);
    }

    #[test]
    fn client_errors_are_not_retried() {
        let server = StubServer::status(400);
        assert!(openai(&server).generate("hello").is_err());
        assert_eq!(server.hits(), 1);
    }

    #[test]
    fn retries_can_be_switched_off() {
        let server = StubServer::status(503);
        let generator = OpenAiGenerator::new(
            &GenAiConfig {
                max_retries: 0,
                ..config(&server)
            },
            "test-key".into(),
        )
        .unwrap();
        assert!(generator.generate("hello").is_err());
        assert_eq!(server.hits(), 1);
    }

    #[test]
    fn gemini_shares_the_retry_policy() {
        let server = StubServer::status(429);
        let generator = GeminiGenerator::new(
            &GenAiConfig {
                provider: "gemini".into(),
                model: "gemini-test".into(),
                ..config(&server)
            },
            "test-key".into(),
        )
        .unwrap();
        let err = generator.generate("hello").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Status { status: 429, .. })
        ));
        assert_eq!(server.hits(), 2);
    }

    #[test]
    fn empty_json_reply_is_malformed() {
        let server = StubServer::status(200);
        let err = openai(&server).generate("hello").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Response { .. })
        ));
        assert_eq!(server.hits(), 1);
    }
}
