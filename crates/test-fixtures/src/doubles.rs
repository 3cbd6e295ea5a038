//! Test doubles for the retriever, generator, and adjuster seams.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use popcast_core::errors::{PopcastResult, StorageError, UpstreamError};
use popcast_core::models::{
    AdjustmentOutcome, AdjustmentSet, FeatureName, FeatureVector, RetrievedContext,
    RetrievedSnippet,
};
use popcast_core::traits::{IContextRetriever, INarrativeAdjuster, ITextGenerator};

/// Retriever returning a fixed context (or failing) and counting calls.
pub struct CountingRetriever {
    snippets: Vec<RetrievedSnippet>,
    fail: bool,
    calls: AtomicUsize,
}

impl CountingRetriever {
    pub fn empty() -> Self {
        Self::with_snippets(Vec::new())
    }

    pub fn with_snippets(snippets: Vec<RetrievedSnippet>) -> Self {
        Self {
            snippets,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// One snippet about birth incentives.
    pub fn with_policy_snippet() -> Self {
        Self::with_snippets(vec![RetrievedSnippet {
            title: "Baby bonus expanded".into(),
            url: "https://example.org/th/baby-bonus".into(),
            snippet: "The cabinet approved an expanded birth incentive policy.".into(),
            relevance_score: 0.82,
        }])
    }

    pub fn failing() -> Self {
        Self {
            snippets: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IContextRetriever for CountingRetriever {
    fn retrieve(
        &self,
        _country_code: &str,
        _query_text: &str,
        top_k: usize,
    ) -> PopcastResult<RetrievedContext> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StorageError::SqliteError {
                message: "index unavailable".into(),
            }
            .into());
        }
        Ok(RetrievedContext::from_ranked(self.snippets.clone(), top_k))
    }
}

/// One scripted generator step.
#[derive(Debug, Clone)]
pub enum Script {
    Reply(String),
    Timeout,
    Status(u16),
    Network,
    Unavailable,
}

/// Generator that plays back a script. The last step repeats once the
/// script is exhausted.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Script>>,
    last: Mutex<Option<Script>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Script>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Script::Reply(text.into())])
    }

    pub fn unavailable() -> Self {
        Self::new(vec![Script::Unavailable])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ITextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> PopcastResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let step = {
            let mut script = self.script.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match script.pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().unwrap_or(Script::Unavailable),
            }
        };

        let service = "scripted".to_string();
        match step {
            Script::Reply(text) => Ok(text),
            Script::Timeout => Err(UpstreamError::Timeout {
                service,
                timeout_ms: 30_000,
            }
            .into()),
            Script::Status(status) => Err(UpstreamError::Status {
                service,
                status,
                body: String::new(),
            }
            .into()),
            Script::Network => Err(UpstreamError::Network {
                service,
                reason: "connection reset".into(),
            }
            .into()),
            Script::Unavailable => Err(UpstreamError::Unavailable {
                service,
                reason: "no credentials".into(),
            }
            .into()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Adjuster returning a fixed birth-rate delta and counting calls.
pub struct CountingAdjuster {
    birth_rate_delta: f64,
    calls: AtomicUsize,
}

impl CountingAdjuster {
    pub fn new(birth_rate_delta: f64) -> Self {
        Self {
            birth_rate_delta,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl INarrativeAdjuster for CountingAdjuster {
    fn adjust(&self, _base: &FeatureVector, _context: &RetrievedContext) -> AdjustmentOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let adjustments: AdjustmentSet = if self.birth_rate_delta == 0.0 {
            AdjustmentSet::new()
        } else {
            [(FeatureName::BirthRate, self.birth_rate_delta)]
                .into_iter()
                .collect()
        };
        AdjustmentOutcome {
            adjustments,
            summary: "Scripted adjustment.".into(),
            insights: vec!["Scripted insight".into()],
            confidence: Some(0.5),
            ..Default::default()
        }
    }
}
