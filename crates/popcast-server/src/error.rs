//! Error to HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use popcast_core::errors::{ModelError, PopcastError};
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    Pipeline(PopcastError),
    /// The blocking task panicked or was cancelled.
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
    kind: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(PopcastError::ModelError(ModelError::NotTrained)) => {
                StatusCode::CONFLICT
            }
            ApiError::Pipeline(e) if e.is_caller_error() => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Pipeline(PopcastError::ValidationError(_)) => "validation",
            ApiError::Pipeline(PopcastError::ModelError(ModelError::NotTrained)) => "not_trained",
            ApiError::Pipeline(PopcastError::ModelError(ModelError::InsufficientData { .. })) => {
                "insufficient_data"
            }
            ApiError::Pipeline(PopcastError::UpstreamError(_)) => "upstream",
            _ => "internal",
        }
    }
}

impl From<PopcastError> for ApiError {
    fn from(e: PopcastError) -> Self {
        ApiError::Pipeline(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Pipeline(e) => e.to_string(),
            ApiError::Internal(msg) => msg.clone(),
        };
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %detail, "request failed");
        }
        let body = ErrorBody {
            detail,
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}
