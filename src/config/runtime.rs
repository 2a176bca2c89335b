//! Process-wide settings

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::error::ValidationError;

/// Application environment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

pub(super) fn default_log_level() -> String {
    "info,sqlx=warn".to_string()
}

/// Checks `filter` parses as a tracing filter directive.
pub(super) fn validate_log_level(filter: &str) -> Result<(), ValidationError> {
    EnvFilter::try_new(filter)
        .map(|_| ())
        .map_err(|e| ValidationError::InvalidLogLevel(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        assert!(validate_log_level(&default_log_level()).is_ok());
    }

    #[test]
    fn rejects_malformed_filter() {
        assert!(validate_log_level("info,sqlx=loud").is_err());
    }

    #[test]
    fn environment_defaults_to_development() {
        assert_eq!(Environment::default(), Environment::Development);
    }
}
