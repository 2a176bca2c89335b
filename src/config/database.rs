//! Database configuration for the lifecycle worker.
//!
//! The worker is the pool's only client and runs one procedure at a time, so
//! the pool stays small and opens no connections until the first sweep.

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `max_connections`.
const MAX_POOL_SIZE: u32 = 20;

/// Upper bound on `statement_timeout_secs`.
const MAX_STATEMENT_TIMEOUT_SECS: u64 = 3600;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Server-side limit for a single statement, so a stuck sweep query fails
    /// and the next tick retries instead of holding the run lock
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_secs: u64,

    /// Apply `migrations/` on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn statement_timeout(&self) -> Duration {
        Duration::from_secs(self.statement_timeout_secs)
    }

    /// Pool sizing for the worker.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .min_connections(0)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout())
    }

    /// Connection settings parsed from `url`, with the statement timeout
    /// sent as a startup option (milliseconds).
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options: PgConnectOptions = self.url.parse()?;
        let timeout_ms = self.statement_timeout().as_millis().to_string();
        Ok(options.options([("statement_timeout", timeout_ms)]))
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.url.parse::<PgConnectOptions>().is_err() {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        if !(1..=MAX_STATEMENT_TIMEOUT_SECS).contains(&self.statement_timeout_secs) {
            return Err(ValidationError::InvalidStatementTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            statement_timeout_secs: default_statement_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_statement_timeout() -> u64 {
    60
}
