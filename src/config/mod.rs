//! Runtime configuration for the task store and its simulated backend.
//!
//! Sources, highest priority first:
//! 1. Environment variables prefixed with `TASKBOARD_`
//!    (`TASKBOARD_NOTIFICATION_DELAY_MS` maps to `notification_delay_ms`)
//! 2. A TOML file, `taskboard.toml` in the working directory by default
//! 3. Built-in defaults

mod error;

pub use error::ConfigError;

use crate::board::{BoardQuery, SortDirection, SortKey};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "taskboard.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Store and backend simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Simulated latency of every remote call, in milliseconds.
    pub remote_latency_ms: u64,
    /// Delay before an activity notification is shown, in milliseconds.
    pub notification_delay_ms: u64,
    /// Sort key of the initial board view.
    pub default_sort_key: SortKey,
    /// Sort direction of the initial board view.
    pub default_sort_direction: SortDirection,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            remote_latency_ms: 400,
            notification_delay_ms: 500,
            default_sort_key: SortKey::CreatedAt,
            default_sort_direction: SortDirection::Desc,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with no artificial delays.
    ///
    /// Notifications are then delivered inline, which keeps tests
    /// deterministic.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            remote_latency_ms: 0,
            notification_delay_ms: 0,
            default_sort_key: SortKey::CreatedAt,
            default_sort_direction: SortDirection::Desc,
        }
    }

    /// Returns the simulated remote latency.
    #[must_use]
    pub const fn remote_latency(&self) -> Duration {
        Duration::from_millis(self.remote_latency_ms)
    }

    /// Returns the activity notification delay.
    #[must_use]
    pub const fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }

    /// Returns the initial board view.
    #[must_use]
    pub fn default_query(&self) -> BoardQuery {
        BoardQuery::new()
            .with_sort_key(self.default_sort_key)
            .with_direction(self.default_sort_direction)
    }

    /// Builds the provider chain reading `file` (when it exists) and the
    /// environment on top of the defaults.
    #[must_use]
    pub fn figment(file: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Loads configuration from [`DEFAULT_CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source holds malformed values.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads configuration from `file` and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source holds malformed values.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(file)
            .extract()
            .map_err(|err| ConfigError::Figment(Box::new(err)))?;
        tracing::debug!(
            remote_latency_ms = config.remote_latency_ms,
            notification_delay_ms = config.notification_delay_ms,
            "loaded store configuration"
        );
        Ok(config)
    }
}
