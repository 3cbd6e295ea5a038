//! Shared plumbing for the blocking HTTP generators.

use std::time::Duration;

use popcast_core::errors::{PopcastResult, UpstreamError};
use reqwest::blocking::{Client, Response};
use tracing::warn;

/// Most retries any caller may ask for.
pub const MAX_RETRIES: u32 = 1;

pub(crate) fn build_client(service: &str, timeout: Duration) -> Result<Client, UpstreamError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| UpstreamError::Unavailable {
            service: service.to_string(),
            reason: format!("failed to build HTTP client: {e}"),
        })
}

pub(crate) fn transport_error(service: &str, timeout: Duration, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout {
            service: service.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        UpstreamError::Network {
            service: service.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Pass successful responses through; turn anything else into `Status`.
pub(crate) fn check_status(service: &str, resp: Response) -> Result<Response, UpstreamError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp
        .text()
        .unwrap_or_else(|_| "<body unavailable>".to_string());
    Err(UpstreamError::Status {
        service: service.to_string(),
        status: status.as_u16(),
        body: body.chars().take(500).collect(),
    })
}

/// A body that fails to decode. Timeouts while reading it stay timeouts.
pub(crate) fn decode_error(service: &str, timeout: Duration, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        transport_error(service, timeout, err)
    } else {
        malformed(service, err.to_string())
    }
}

pub(crate) fn malformed(service: &str, reason: impl Into<String>) -> UpstreamError {
    UpstreamError::Response {
        service: service.to_string(),
        reason: reason.into(),
    }
}

/// Run `call`, retrying immediately up to `max_retries` times (capped at
/// [`MAX_RETRIES`]) while the failure is transient.
pub fn with_retry<T>(
    max_retries: u32,
    mut call: impl FnMut() -> Result<T, UpstreamError>,
) -> PopcastResult<T> {
    let mut attempt = 0;
    loop {
        match call() {
            Ok(v) => return Ok(v),
            Err(e) if e.is_transient() && attempt < max_retries.min(MAX_RETRIES) => {
                attempt += 1;
                warn!(service = e.service(), error = %e, attempt, "transient upstream failure; retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
}
