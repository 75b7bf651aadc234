//! Logging settings.

use serde::{Deserialize, Serialize};

fn default_level() -> String {
    "warn".to_owned()
}

/// Default tracing filter used when `TASKBOARD_LOG` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive such as `warn` or `taskboard=debug`.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}
