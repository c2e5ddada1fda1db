//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `DESKFLOW`
//! prefix and nested fields use `__` as separator.
//!
//! # Example
//!
//! ```no_run
//! use deskflow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod engine;
mod error;
mod queueing;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use queueing::QueueingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Queue-priority baselines
    #[serde(default)]
    pub queueing: QueueingConfig,

    /// Update-coordinator tuning
    #[serde(default)]
    pub engine: EngineConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads variables with the
    /// `DESKFLOW` prefix:
    ///
    /// - `DESKFLOW__QUEUEING__LOW_PRIORITY_BASELINE=9000000000000`
    /// - `DESKFLOW__ENGINE__MAX_CONFLICT_RETRIES=3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DESKFLOW")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.queueing.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}
