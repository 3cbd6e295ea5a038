use popcast_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = PopcastConfig::from_toml("").unwrap();

    // Model defaults
    assert_eq!(config.model.n_estimators, 300);
    assert_eq!(config.model.learning_rate, 0.05);
    assert_eq!(config.model.max_depth, 4);
    assert_eq!(config.model.min_child_weight, 3.0);
    assert_eq!(config.model.subsample, 0.8);
    assert_eq!(config.model.colsample_bytree, 0.8);
    assert_eq!(config.model.gamma, 0.3);
    assert_eq!(config.model.reg_alpha, 0.5);
    assert_eq!(config.model.reg_lambda, 1.0);

    // Training defaults
    assert_eq!(config.training.min_rows, 10);
    assert_eq!(config.training.validation_fraction, 0.2);
    assert_eq!(config.training.seed, 42);
    assert!(config.training.augmentation.enabled);
    assert_eq!(config.training.augmentation.copies_per_row, 9);
    assert_eq!(config.training.augmentation.noise_scale, 0.08);

    // Forecast defaults
    assert_eq!(config.forecast.max_years, 75);
    assert_eq!(config.forecast.base_year, 2025);
    assert_eq!(config.forecast.drift.mode, DriftMode::Evolving);

    // Retrieval and embedding defaults
    assert_eq!(config.retrieval.top_k, 3);
    assert_eq!(config.embedding.provider, "hashing");
    assert_eq!(config.embedding.dimensions, 384);

    // GenAI defaults
    assert_eq!(config.genai.provider, "gemini");
    assert_eq!(config.genai.timeout_secs, 30);
    assert_eq!(config.genai.max_retries, 1);
    assert_eq!(config.genai.max_abs_delta, 5.0);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json);

    assert_eq!(config, PopcastConfig::default());
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[model]
n_estimators = 50
max_depth = 3

[forecast.drift]
mode = "fixed"

[genai]
provider = "disabled"
"#;
    let config = PopcastConfig::from_toml(toml).unwrap();
    assert_eq!(config.model.n_estimators, 50);
    assert_eq!(config.model.max_depth, 3);
    // Non-overridden fields keep defaults
    assert_eq!(config.model.learning_rate, 0.05);
    assert_eq!(config.forecast.drift.mode, DriftMode::Fixed);
    assert_eq!(config.forecast.drift.birth_rate_factor, 0.995);
    assert_eq!(config.genai.provider, "disabled");
}

#[test]
fn config_rejects_malformed_toml() {
    let err = PopcastConfig::from_toml("[model\nn_estimators = ").unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn config_rejects_more_than_one_retry() {
    let err = PopcastConfig::from_toml("[genai]\nmax_retries = 3\n").unwrap_err();
    assert!(err.to_string().contains("genai.max_retries"));
}

#[test]
fn config_rejects_zero_timeouts() {
    for (section, key) in [("genai", "genai.timeout_secs"), ("embedding", "embedding.timeout_secs")] {
        let toml = format!("[{section}]\ntimeout_secs = 0\n");
        let err = PopcastConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains(key), "{err}");
    }
}

#[test]
fn config_rejects_degenerate_validation_fraction() {
    for fraction in ["0.0", "1.0", "-0.5"] {
        let toml = format!("[training]\nvalidation_fraction = {fraction}\n");
        assert!(PopcastConfig::from_toml(&toml).is_err(), "{fraction}");
    }
}

#[test]
fn config_rejects_top_k_above_cap() {
    let err = PopcastConfig::from_toml("[retrieval]\ntop_k = 50\n").unwrap_err();
    assert!(err.to_string().contains("retrieval.top_k"));
}

#[test]
fn config_from_missing_file_is_read_error() {
    let err = PopcastConfig::from_file(std::path::Path::new("/nonexistent/popcast.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/popcast.toml"));
}

#[test]
fn embedding_identity_includes_model_for_api_provider() {
    let hashing = EmbeddingConfig::default();
    assert_eq!(hashing.index_identity(), "hashing:384");

    let api = EmbeddingConfig {
        provider: "api".into(),
        dimensions: 1536,
        ..Default::default()
    };
    assert_eq!(api.index_identity(), "api:text-embedding-3-small:1536");
}

#[test]
fn inline_api_key_takes_precedence_and_blank_is_absent() {
    let inline = GenAiConfig {
        api_key: Some("k-123".into()),
        api_key_env: "POPCAST_TEST_UNSET_KEY_VAR".into(),
        ..Default::default()
    };
    assert_eq!(inline.resolve_api_key().as_deref(), Some("k-123"));

    let blank = GenAiConfig {
        api_key: Some("   ".into()),
        api_key_env: "POPCAST_TEST_UNSET_KEY_VAR".into(),
        ..Default::default()
    };
    assert_eq!(blank.resolve_api_key(), None);
}

#[test]
fn openai_preset_switches_endpoint() {
    let cfg = GenAiConfig::openai();
    assert_eq!(cfg.provider, "openai");
    assert_eq!(cfg.model, "gpt-3.5-turbo");
    assert_eq!(cfg.api_key_env, "OPENAI_API_KEY");
}
