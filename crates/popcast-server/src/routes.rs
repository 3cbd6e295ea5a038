//! HTTP routes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use popcast_core::constants::{ASEAN_COUNTRIES, VERSION};
use popcast_core::errors::PopcastResult;
use popcast_core::models::{
    ChatReply, ChatRequest, InsightsRequest, InsightsResponse, ModelStatus, PredictionRequest,
    PredictionResponse, TrainingRequest, TrainingResponse,
};
use popcast_service::ForecastService;
use serde::Serialize;

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ForecastService>,
}

impl AppState {
    pub fn new(service: ForecastService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/train", post(train))
        .route("/api/model/status", get(model_status))
        .route("/api/chat", post(chat))
        .route("/api/ai-insights", post(ai_insights))
        .route("/api/countries", get(countries))
        .with_state(state)
}

/// Run a pipeline call on the blocking pool.
async fn blocking<T, F>(state: &AppState, call: F) -> Result<Json<T>, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ForecastService) -> PopcastResult<T> + Send + 'static,
{
    let service = state.service.clone();
    let out = tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|e| ApiError::Internal(format!("worker failed: {e}")))?;
    Ok(Json(out?))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
    model_trained: bool,
}

async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: VERSION,
        model_trained: state.service.model().is_trained(),
    })
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    blocking(&state, move |s| s.predict(&request)).await
}

async fn train(
    State(state): State<AppState>,
    Json(request): Json<TrainingRequest>,
) -> Result<Json<TrainingResponse>, ApiError> {
    blocking(&state, move |s| s.train(&request)).await
}

async fn model_status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.service.status())
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    blocking(&state, move |s| s.chat(&request)).await
}

async fn ai_insights(
    State(state): State<AppState>,
    Json(request): Json<InsightsRequest>,
) -> Result<Json<InsightsResponse>, ApiError> {
    blocking(&state, move |s| s.insights(&request)).await
}

#[derive(Debug, Serialize)]
struct Country {
    code: &'static str,
    name: &'static str,
}

async fn countries() -> Json<Vec<Country>> {
    Json(
        ASEAN_COUNTRIES
            .iter()
            .map(|&(code, name)| Country { code, name })
            .collect(),
    )
}
