//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use popcast_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted before `observability.log_level`.
pub const LOG_ENV: &str = "POPCAST_LOG";

/// Initialize the global subscriber.
///
/// `POPCAST_LOG` wins over the configured level. Safe to call more than
/// once; later calls are ignored.
pub fn init_tracing(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = if config.json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

/// Initialize tracing with a custom filter string (for tests or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init();
}
