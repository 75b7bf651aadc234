//! Layered configuration for hosts embedding the board synchronizer.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKBOARD_*` prefix, `__` as separator)
//! 2. Project-level `taskboard.toml`
//! 3. User-level `~/.config/taskboard/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `TASKBOARD_API__BASE_URL` to `api.base_url` and
//! `TASKBOARD_LOGGING__LEVEL` to `logging.level`.

mod api;
mod error;
mod logging;

pub use api::{ApiConfig, DEFAULT_BASE_URL};
pub use error::ConfigError;
pub use logging::LoggingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = "taskboard.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Complete taskboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskboardConfig {
    /// Board service connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TaskboardConfig {
    /// Loads configuration from all sources and validates it.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `.env` from the working directory, then loads configuration.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is
    /// invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            tracing::warn!(error = %err, "ignoring unreadable .env file");
        }
        Self::load()
    }

    /// Builds the figment provider chain.
    ///
    /// Public so tests and hosts can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        figment
            .merge(Toml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.toml"))
    }
}
