/// Failures of external services: text generation, embeddings.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    #[error("{service} returned a malformed response: {reason}")]
    Response { service: String, reason: String },

    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} network failure: {reason}")]
    Network { service: String, reason: String },

    #[error("{service} unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}

impl UpstreamError {
    /// Whether one immediate retry may succeed.
    ///
    /// Connection failures and HTTP 429/5xx qualify. Malformed responses,
    /// timeouts, and missing credentials do not.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Network { .. } => true,
            UpstreamError::Status { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::Timeout { .. }
            | UpstreamError::Response { .. }
            | UpstreamError::Unavailable { .. } => false,
        }
    }

    pub fn service(&self) -> &str {
        match self {
            UpstreamError::Timeout { service, .. }
            | UpstreamError::Response { service, .. }
            | UpstreamError::Status { service, .. }
            | UpstreamError::Network { service, .. }
            | UpstreamError::Unavailable { service, .. } => service,
        }
    }
}
