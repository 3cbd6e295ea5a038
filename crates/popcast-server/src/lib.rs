//! # popcast-server
//!
//! Axum routes over [`popcast_service::ForecastService`]. Every pipeline
//! call is blocking and runs on `spawn_blocking`.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{router, AppState};
