use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A retrieved document excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RetrievedSnippet {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub relevance_score: f64,
}

/// Snippets ordered by descending relevance, bounded to `top_k`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RetrievedContext(Vec<RetrievedSnippet>);

impl RetrievedContext {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Sort descending by score and keep the first `top_k`.
    pub fn from_ranked(mut snippets: Vec<RetrievedSnippet>, top_k: usize) -> Self {
        snippets.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        snippets.truncate(top_k);
        Self(snippets)
    }

    pub fn snippets(&self) -> &[RetrievedSnippet] {
        &self.0
    }

    pub fn into_snippets(self) -> Vec<RetrievedSnippet> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RetrievedSnippet> {
        self.0.iter()
    }
}
