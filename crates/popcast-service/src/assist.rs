//! Chat and insight operations.

use chrono::Utc;
use popcast_core::constants::components;
use popcast_core::errors::{PopcastResult, ValidationError};
use popcast_core::models::{ChatReply, ChatRequest, InsightsRequest, InsightsResponse};
use popcast_genai::{chat_reply, generate_insights};
use popcast_observability::generation_span;

use crate::engine::ForecastService;

impl ForecastService {
    /// Stateless chat. Generation failures produce a canned reply with a note.
    pub fn chat(&self, request: &ChatRequest) -> PopcastResult<ChatReply> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ValidationError::missing("message").into());
        }
        let span = generation_span!("chat", self.generator.name());
        let _enter = span.enter();

        let model_r2 = self.model.metrics().map(|m| m.val_r2);
        let outcome = chat_reply(self.generator.as_ref(), message, &request.context, model_r2);
        match &outcome.note {
            Some(note) => self.record_degradation(components::CHAT, note, "canned reply"),
            None => self.mark_recovered(components::CHAT),
        }
        Ok(ChatReply {
            response: outcome.response,
            timestamp: Utc::now(),
            note: outcome.note,
        })
    }

    /// Analyst bullets for a forecast. Uses the current model's metrics when
    /// the request carries none.
    pub fn insights(&self, request: &InsightsRequest) -> PopcastResult<InsightsResponse> {
        let span = generation_span!("insights", self.generator.name());
        let _enter = span.enter();

        let metrics = request.model_metrics.clone().or_else(|| self.model.metrics());
        let outcome = generate_insights(
            self.generator.as_ref(),
            metrics.as_ref(),
            &request.forecast_data,
            &request.country_data,
            self.config.genai.max_insights,
        );
        match &outcome.degraded {
            Some(reason) => self.record_degradation(components::INSIGHTS, reason, "rule-based insights"),
            None => self.mark_recovered(components::INSIGHTS),
        }
        Ok(InsightsResponse {
            insights: outcome.insights,
            timestamp: Utc::now(),
        })
    }
}
