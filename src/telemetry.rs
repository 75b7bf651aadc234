//! Tracing subscriber setup for hosts embedding the synchronizer.
//!
//! The library itself only emits `tracing` events; hosts decide whether and
//! how to collect them.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV_VAR: &str = "TASKBOARD_LOG";

/// Error returned when the global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to initialize tracing subscriber: {0}")]
pub struct TelemetryError(String);

/// Builds the filter from `TASKBOARD_LOG`, falling back to `default_level`.
#[must_use]
pub fn env_filter(default_level: &str) -> EnvFilter {
    let directive = std::env::var(LOG_ENV_VAR).ok();
    filter_from(directive.as_deref(), default_level)
}

/// Parses `directive`, falling back to `default_level` when it is absent or
/// invalid.
fn filter_from(directive: Option<&str>, default_level: &str) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber is already set.
pub fn init_tracing(default_level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .try_init()
        .map_err(|err| TelemetryError(err.to_string()))
}
