//! Gemini `generateContent` generator.

use std::time::Duration;

use popcast_core::config::GenAiConfig;
use popcast_core::errors::{PopcastResult, UpstreamError};
use popcast_core::traits::ITextGenerator;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::http::{
    build_client, check_status, decode_error, malformed, transport_error, with_retry,
};

const SERVICE: &str = "gemini";

pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
    temperature: f64,
    max_retries: u32,
    timeout: Duration,
}

impl GeminiGenerator {
    pub fn new(config: &GenAiConfig, api_key: String) -> PopcastResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let model = config.model.trim_start_matches('/');
        let model = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        Ok(Self {
            client: build_client(SERVICE, timeout)?,
            endpoint: format!(
                "{}/{model}:generateContent",
                config.base_url.trim_end_matches('/')
            ),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_retries: config.max_retries,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn call(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.trim())
            .json(&body)
            .send()
            .map_err(|e| transport_error(SERVICE, self.timeout, e))?;
        let parsed: GenerateResponse = check_status(SERVICE, resp)?
            .json()
            .map_err(|e| decode_error(SERVICE, self.timeout, e))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(malformed(SERVICE, "no candidate text in response"));
        }
        Ok(text)
    }
}

impl ITextGenerator for GeminiGenerator {
    fn generate(&self, prompt: &str) -> PopcastResult<String> {
        with_retry(self.max_retries, || self.call(prompt))
    }

    fn name(&self) -> &str {
        SERVICE
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}
