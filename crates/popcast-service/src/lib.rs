//! # popcast-service
//!
//! [`ForecastService`] wires the feature builder, the shared forecast model,
//! the context retriever and the text generator into the request-level
//! operations the HTTP layer exposes. Upstream failures degrade to the
//! baseline; validation and precondition failures surface to the caller.

mod assist;
mod engine;
mod offline;
mod predict;

pub use engine::ForecastService;
pub use offline::OfflineRetriever;
