//! # popcast-observability
//!
//! Tracing subscriber setup, span macros per pipeline operation, structured
//! events, and degradation tracking.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use tracing_setup::{init_tracing, init_tracing_with_filter, LOG_ENV};
