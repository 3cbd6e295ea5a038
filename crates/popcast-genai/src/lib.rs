//! # popcast-genai
//!
//! Text generation for the forecasting pipeline:
//!
//! - [`providers`]: Gemini, OpenAI-compatible and disabled generators
//!   behind `ITextGenerator`.
//! - [`LlmNarrativeAdjuster`]: retrieved context to bounded feature deltas.
//!   Never fails; every problem becomes a degraded outcome.
//! - [`generate_insights`] and [`chat_reply`]: analyst bullets and chat,
//!   each with an offline fallback.

pub mod adjuster;
pub mod chat;
pub mod http;
pub mod insights;
pub mod prompts;
pub mod providers;
pub mod response;

pub use adjuster::LlmNarrativeAdjuster;
pub use chat::{chat_reply, offline_reply, ChatOutcome};
pub use insights::{generate_insights, parse_bullets, rule_based_insights, InsightsOutcome};
pub use providers::{create_generator, DisabledGenerator, GeminiGenerator, OpenAiGenerator};
pub use response::{extract_json_object, parse_narrative, ParsedNarrative};
