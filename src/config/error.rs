//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool max_connections must be at least 1")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (20)")]
    PoolSizeTooLarge,

    #[error("Statement timeout must be between 1 and 3600 seconds")]
    InvalidStatementTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("SMS gateway URL must use http or https")]
    InvalidSmsUrl,

    #[error("SMS gateway URL must use HTTPS in production")]
    SmsUrlMustBeHttps,

    #[error("SMS sender id must be 1 to 11 characters")]
    InvalidSenderId,

    #[error("SMS timeout must be between 1 and 60 seconds")]
    InvalidSmsTimeout,

    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTimeOfDay(String),

    #[error("Scheduler poll interval must be between 1 and 3600 seconds")]
    InvalidPollInterval,
}
