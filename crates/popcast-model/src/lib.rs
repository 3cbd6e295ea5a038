//! # popcast-model
//!
//! Population growth regressor and the shared model slot.
//!
//! - [`booster`]: second-order gradient boosting over regression trees.
//! - [`training`]: organic split, declared augmentation, fit, metrics.
//! - [`rollout`]: compounding multi-year forecast with feature drift.
//! - [`artifact`]: atomic JSON persistence.
//! - [`ForecastModel`]: `Untrained → Trained` snapshot published via `ArcSwapOption`.

pub mod artifact;
pub mod booster;
pub mod metrics;
mod registry;
pub mod rollout;
mod trained;
pub mod training;

pub use registry::ForecastModel;
pub use trained::TrainedModel;
