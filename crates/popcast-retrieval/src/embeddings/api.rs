//! OpenAI-compatible `/embeddings` client.

use std::time::Duration;

use popcast_core::config::EmbeddingConfig;
use popcast_core::errors::{PopcastResult, UpstreamError};
use popcast_core::traits::IEmbeddingProvider;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::warn;

const SERVICE: &str = "embeddings";

/// Blocking embeddings client. One immediate retry on connection failures
/// and HTTP 429/5xx; none on malformed responses or timeouts.
pub struct ApiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    timeout: Duration,
}

impl ApiEmbedder {
    pub fn new(config: &EmbeddingConfig, api_key: &str) -> PopcastResult<Self> {
        let unavailable = |reason: String| UpstreamError::Unavailable {
            service: SERVICE.to_string(),
            reason,
        };
        if api_key.trim().is_empty() {
            return Err(unavailable(format!("{} is not set", config.api_key_env)).into());
        }

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| unavailable(format!("invalid API key: {e}")))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            dimensions: config.dimensions,
            timeout,
        })
    }

    fn request(&self, inputs: &[&str]) -> Result<Vec<Vec<f32>>, UpstreamError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: inputs,
            dimensions: self.dimensions,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(UpstreamError::Status {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let mut parsed: EmbeddingResponse = resp.json().map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                UpstreamError::Response {
                    service: SERVICE.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;
        parsed.data.sort_by_key(|d| d.index);
        if parsed.data.len() != inputs.len() {
            return Err(UpstreamError::Response {
                service: SERVICE.to_string(),
                reason: format!(
                    "{} embeddings for {} inputs",
                    parsed.data.len(),
                    inputs.len()
                ),
            });
        }
        if let Some(bad) = parsed.data.iter().find(|d| d.embedding.len() != self.dimensions) {
            return Err(UpstreamError::Response {
                service: SERVICE.to_string(),
                reason: format!(
                    "embedding has {} dimensions, expected {}",
                    bad.embedding.len(),
                    self.dimensions
                ),
            });
        }
        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }

    fn transport_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout {
                service: SERVICE.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            UpstreamError::Network {
                service: SERVICE.to_string(),
                reason: err.to_string(),
            }
        }
    }

    fn request_with_retry(&self, inputs: &[&str]) -> PopcastResult<Vec<Vec<f32>>> {
        match self.request(inputs) {
            Ok(v) => Ok(v),
            Err(e) if e.is_transient() => {
                warn!(error = %e, "embedding request failed; retrying once");
                Ok(self.request(inputs)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl IEmbeddingProvider for ApiEmbedder {
    fn embed(&self, text: &str) -> PopcastResult<Vec<f32>> {
        let mut out = self.request_with_retry(&[text])?;
        Ok(out.pop().unwrap_or_default())
    }

    fn embed_batch(&self, texts: &[String]) -> PopcastResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        self.request_with_retry(&inputs)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [&'a str],
    dimensions: usize,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}
