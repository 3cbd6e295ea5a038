//! Index and retriever behavior against the shared context fixtures.

use std::sync::Arc;

use popcast_core::config::{EmbeddingConfig, RetrievalConfig};
use popcast_core::errors::{PopcastError, StorageError};
use popcast_core::traits::IContextRetriever;
use popcast_retrieval::{
    open_retriever, ContextDocument, ContextIndex, HashingEmbedder, SqliteRetriever,
};
use test_fixtures::load_fixture;

const IDENTITY: &str = "hashing:256";

fn documents() -> Vec<ContextDocument> {
    load_fixture("context_documents.json")
}

fn retriever_with(config: RetrievalConfig) -> SqliteRetriever {
    let index = ContextIndex::open_in_memory(IDENTITY).unwrap();
    let retriever = SqliteRetriever::new(index, Arc::new(HashingEmbedder::new(256)), config);
    retriever.ingest_batch(&documents()).unwrap();
    retriever
}

fn query_for(country: &str) -> String {
    RetrievalConfig::default()
        .query_template
        .replace("{country}", country)
}

fn retriever() -> SqliteRetriever {
    retriever_with(RetrievalConfig::default())
}

#[test]
fn results_are_scoped_to_the_requested_country() {
    let r = retriever();
    let query = query_for("Thailand");
    let ctx = r.retrieve("TH", &query, 10).unwrap();
    assert!(!ctx.is_empty());
    assert!(ctx.len() <= 3);
    let thai_titles: Vec<String> = documents()
        .into_iter()
        .filter(|d| d.country == "TH")
        .map(|d| d.title)
        .collect();
    for s in ctx.iter() {
        assert!(thai_titles.contains(&s.title), "foreign snippet {}", s.title);
    }
}

#[test]
fn results_are_in_descending_relevance() {
    let r = retriever();
    let ctx = r.retrieve("TH", "birth rate baby bonus ageing", 3).unwrap();
    let scores: Vec<f64> = ctx.iter().map(|s| s.relevance_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert!(scores.iter().all(|s| *s > 0.0));
}

#[test]
fn country_code_is_case_insensitive() {
    let r = retriever();
    let upper = r.retrieve("VN", "population policy", 3).unwrap();
    let lower = r.retrieve("vn", "population policy", 3).unwrap();
    assert_eq!(upper, lower);
}

#[test]
fn country_without_documents_yields_empty_context() {
    let r = retriever();
    let ctx = r.retrieve("LA", "population birth policy", 3).unwrap();
    assert!(ctx.is_empty());
}

#[test]
fn top_k_bounds_result_count() {
    let r = retriever();
    assert_eq!(r.retrieve("TH", "Thailand population birth", 0).unwrap().len(), 0);
    assert!(r.retrieve("TH", "Thailand population birth", 1).unwrap().len() <= 1);
}

#[test]
fn top_k_is_capped_by_config() {
    let r = retriever_with(RetrievalConfig {
        max_top_k: 1,
        ..RetrievalConfig::default()
    });
    assert!(r.retrieve("TH", "Thailand population birth death", 50).unwrap().len() <= 1);
}

#[test]
fn snippets_are_truncated() {
    let r = retriever_with(RetrievalConfig {
        snippet_chars: 20,
        ..RetrievalConfig::default()
    });
    let ctx = r.retrieve("TH", "Thailand birth", 3).unwrap();
    assert!(!ctx.is_empty());
    for s in ctx.iter() {
        assert!(s.snippet.chars().count() <= 23, "{}", s.snippet);
    }
}

#[test]
fn reingesting_replaces_instead_of_duplicating() {
    let r = retriever();
    let before = r.index().count(None).unwrap();
    let report = r.ingest_batch(&documents()).unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.replaced, documents().len());
    assert_eq!(r.index().count(None).unwrap(), before);
    assert_eq!(r.index().count(Some("TH")).unwrap(), 3);
}

#[test]
fn ingest_invalidates_cached_results() {
    let r = retriever();
    let query = "manufacturing workforce migration";
    let before = r.retrieve("LA", query, 3).unwrap();
    assert!(before.is_empty());

    r.ingest(&ContextDocument {
        country: "la".to_string(),
        title: "Laos manufacturing workforce".to_string(),
        url: String::new(),
        content: "Migration of the young workforce into manufacturing hubs.".to_string(),
    })
    .unwrap();

    let after = r.retrieve("LA", query, 3).unwrap();
    assert_eq!(after.len(), 1);
}

#[test]
fn blank_content_is_rejected() {
    let r = retriever();
    let err = r
        .ingest(&ContextDocument {
            country: "TH".to_string(),
            title: "Empty".to_string(),
            url: String::new(),
            content: "   ".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, PopcastError::ValidationError(_)));
}

#[test]
fn reopening_with_different_embedding_is_a_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("context.db");
    {
        let index = ContextIndex::open(&path, "hashing:256").unwrap();
        let r = SqliteRetriever::new(
            index,
            Arc::new(HashingEmbedder::new(256)),
            RetrievalConfig::default(),
        );
        r.ingest_batch(&documents()).unwrap();
    }

    assert!(ContextIndex::open(&path, "hashing:256").is_ok());
    let err = ContextIndex::open(&path, "api:text-embedding-3-small:1536")
        .err()
        .unwrap();
    assert!(matches!(
        err,
        PopcastError::StorageError(StorageError::IndexMismatch { .. })
    ));
}

#[test]
fn open_retriever_persists_documents_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let retrieval = RetrievalConfig {
        index_path: dir.path().join("nested/context.db").display().to_string(),
        ..RetrievalConfig::default()
    };
    let embedding = EmbeddingConfig::default();
    {
        let r = open_retriever(&retrieval, &embedding).unwrap();
        r.ingest_batch(&documents()).unwrap();
    }
    let r = open_retriever(&retrieval, &embedding).unwrap();
    assert_eq!(r.index().count(None).unwrap(), documents().len());
    let query = query_for("Singapore");
    assert!(!r.retrieve("SG", &query, 3).unwrap().is_empty());
}

mod properties {
    use popcast_retrieval::{ContextDocument, ContextIndex};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn search_is_descending_bounded_and_above_floor(
            vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 8), 1..12),
            query in prop::collection::vec(-1.0f32..1.0, 8),
            limit in 0usize..6,
            min_score in -0.5f64..0.5,
        ) {
            let index = ContextIndex::open_in_memory("test:8").unwrap();
            for (i, v) in vectors.iter().enumerate() {
                let doc = ContextDocument {
                    country: if i % 3 == 0 { "VN".into() } else { "TH".into() },
                    title: format!("doc {i}"),
                    url: String::new(),
                    content: format!("content {i}"),
                };
                index.upsert(&doc.id(), &doc, v).unwrap();
            }

            let hits = index.search("TH", &query, limit, min_score).unwrap();
            prop_assert!(hits.len() <= limit);
            prop_assert!(hits.iter().all(|(d, s)| d.country == "TH" && *s > min_score));
            prop_assert!(hits.windows(2).all(|w| w[0].1 >= w[1].1));
        }
    }
}

mod api_embedder {
    use popcast_core::config::EmbeddingConfig;
    use popcast_core::errors::{PopcastError, UpstreamError};
    use popcast_core::traits::IEmbeddingProvider;
    use popcast_retrieval::ApiEmbedder;
    use test_fixtures::StubServer;

    fn embedder(server: &StubServer) -> ApiEmbedder {
        let config = EmbeddingConfig {
            provider: "api".into(),
            base_url: server.url().to_string(),
            timeout_secs: 1,
            ..EmbeddingConfig::default()
        };
        ApiEmbedder::new(&config, "test-key").unwrap()
    }

    #[test]
    fn silent_service_times_out() {
        let server = StubServer::no_response();
        let err = embedder(&server).embed("Thailand birth").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Timeout { timeout_ms: 1000, .. })
        ));
        assert_eq!(server.hits(), 1);
    }

    #[test]
    fn server_errors_are_retried_once() {
        let server = StubServer::status(502);
        let err = embedder(&server).embed("Thailand birth").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Status { status: 502, .. })
        ));
        assert_eq!(server.hits(), 2);
    }

    #[test]
    fn malformed_reply_is_not_retried() {
        let server = StubServer::status(200);
        let err = embedder(&server).embed("Thailand birth").unwrap_err();
        assert!(matches!(
            err,
            PopcastError::UpstreamError(UpstreamError::Response { .. })
        ));
        assert_eq!(server.hits(), 1);
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let server = StubServer::status(200);
        assert!(embedder(&server).embed_batch(&[]).unwrap().is_empty());
        assert_eq!(server.hits(), 0);
    }
}
