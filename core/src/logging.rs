//! Logging setup for the todo service.
//!
//! A plain stderr fmt layer; the filter comes from `RUST_LOG` when set,
//! otherwise from the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber. Call once, from `main`.
pub fn init(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
