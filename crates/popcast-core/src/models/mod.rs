mod adjustment;
mod chat;
mod context;
mod country;
mod degradation_event;
mod features;
mod forecast;
mod insights;
mod metrics;
mod prediction;
mod status;
mod training;

pub use adjustment::{AdjustmentOutcome, AdjustmentSet, NarrativeStatus, RagAdjustment, RagNarrative};
pub use chat::{ChatContext, ChatReply, ChatRequest};
pub use context::{RetrievedContext, RetrievedSnippet};
pub use country::{CountryHistory, CountryProfile, YearRecord};
pub use degradation_event::DegradationEvent;
pub use features::{FeatureName, FeatureVector};
pub use forecast::{ForecastPoint, ForecastSummary};
pub use insights::{InsightsRequest, InsightsResponse};
pub use metrics::ModelMetrics;
pub use prediction::{PredictionRequest, PredictionResponse};
pub use status::ModelStatus;
pub use training::{TrainingRequest, TrainingResponse, TrainingRow};
