//! # popcast-core
//!
//! Foundation crate for the popcast forecasting pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PopcastConfig;
pub use errors::{PopcastError, PopcastResult};
pub use models::{
    AdjustmentSet, CountryProfile, FeatureName, FeatureVector, ForecastPoint, ModelMetrics,
    RagAdjustment, RetrievedContext,
};
