use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Dashboard state sent alongside a chat message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ChatContext {
    pub country: Option<String>,
    pub use_rag: bool,
    pub population: Option<f64>,
    pub forecast_years: Option<u32>,
    /// Deltas currently applied in the dashboard, keyed as the user sees them.
    pub adjustments: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: ChatContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatReply {
    pub response: String,
    pub timestamp: DateTime<Utc>,
    /// Set when the reply is a canned fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
