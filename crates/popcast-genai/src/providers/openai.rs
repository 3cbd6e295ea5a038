//! OpenAI-compatible `chat/completions` generator.

use std::time::Duration;

use popcast_core::config::GenAiConfig;
use popcast_core::errors::{PopcastResult, UpstreamError};
use popcast_core::traits::ITextGenerator;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::http::{
    build_client, check_status, decode_error, malformed, transport_error, with_retry,
};

const SERVICE: &str = "openai";
const SYSTEM_PROMPT: &str =
    "You are a demographic analyst. Answer precisely and follow the requested output format.";

pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    max_retries: u32,
    timeout: Duration,
}

impl OpenAiGenerator {
    pub fn new(config: &GenAiConfig, api_key: String) -> PopcastResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Ok(Self {
            client: build_client(SERVICE, timeout)?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
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
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key.trim())).map_err(|e| {
            UpstreamError::Unavailable {
                service: SERVICE.to_string(),
                reason: format!("invalid API key: {e}"),
            }
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .map_err(|e| transport_error(SERVICE, self.timeout, e))?;
        let parsed: ChatResponse = check_status(SERVICE, resp)?
            .json()
            .map_err(|e| decode_error(SERVICE, self.timeout, e))?;
        parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| malformed(SERVICE, "no completion text in response"))
    }
}

impl ITextGenerator for OpenAiGenerator {
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
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}
