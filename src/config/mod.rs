//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CASHBACK` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use cashback_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Expiration sweep at {}", config.scheduler.expiration_time);
//! ```

mod database;
mod error;
mod runtime;
mod scheduler;
mod sms;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use runtime::Environment;
pub use scheduler::SchedulerConfig;
pub use sms::{SmsConfig, SmsProvider};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    /// `tracing` filter directive
    #[serde(default = "runtime::default_log_level")]
    pub log_level: String,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// SMS transport
    #[serde(default)]
    pub sms: SmsConfig,

    /// Daily coupon lifecycle runs
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CASHBACK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CASHBACK__LOG_LEVEL=debug` -> `log_level = "debug"`
    /// - `CASHBACK__DATABASE__URL=...` -> `database.url = ...`
    /// - `CASHBACK__SCHEDULER__ACTIVATION_TIME=09:30` -> `scheduler.activation_time`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CASHBACK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        runtime::validate_log_level(&self.log_level)?;
        self.database.validate()?;
        self.sms.validate(&self.environment)?;
        self.scheduler.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
