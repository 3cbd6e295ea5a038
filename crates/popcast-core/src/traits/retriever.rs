use crate::errors::PopcastResult;
use crate::models::RetrievedContext;

/// Country-scoped document retrieval.
pub trait IContextRetriever: Send + Sync {
    /// Up to `top_k` snippets for `country_code`, most relevant first.
    ///
    /// An index with no documents for the country yields an empty context.
    fn retrieve(
        &self,
        country_code: &str,
        query_text: &str,
        top_k: usize,
    ) -> PopcastResult<RetrievedContext>;
}
