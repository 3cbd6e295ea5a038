use popcast_core::constants::components;
use popcast_core::errors::{PopcastResult, UpstreamError};
use popcast_core::models::RetrievedContext;
use popcast_core::traits::IContextRetriever;

/// Stands in for the index when it cannot be opened for a recoverable
/// reason, such as missing embedding credentials. Every call fails, so
/// RAG predictions degrade to the baseline.
pub struct OfflineRetriever {
    reason: String,
}

impl OfflineRetriever {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl IContextRetriever for OfflineRetriever {
    fn retrieve(&self, _country_code: &str, _query_text: &str, _top_k: usize) -> PopcastResult<RetrievedContext> {
        Err(UpstreamError::Unavailable {
            service: components::RETRIEVER.to_string(),
            reason: self.reason.clone(),
        }
        .into())
    }
}
