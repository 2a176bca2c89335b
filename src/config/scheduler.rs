//! Lifecycle scheduler configuration

use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Scheduler configuration. Times are `HH:MM` in UTC.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_expiration_time")]
    pub expiration_time: String,

    #[serde(default = "default_activation_time")]
    pub activation_time: String,

    /// How often the loop checks for due procedures
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl SchedulerConfig {
    pub fn expiration_time(&self) -> Result<NaiveTime, ValidationError> {
        parse_time_of_day(&self.expiration_time)
    }

    pub fn activation_time(&self) -> Result<NaiveTime, ValidationError> {
        parse_time_of_day(&self.activation_time)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Validate scheduler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.expiration_time()?;
        self.activation_time()?;
        if self.poll_interval_secs == 0 || self.poll_interval_secs > 3600 {
            return Err(ValidationError::InvalidPollInterval);
        }
        Ok(())
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            expiration_time: default_expiration_time(),
            activation_time: default_activation_time(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTimeOfDay(value.to_string()))
}

fn default_enabled() -> bool {
    true
}

fn default_expiration_time() -> String {
    "03:00".to_string()
}

fn default_activation_time() -> String {
    "08:00".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let config = SchedulerConfig::default();
        assert!(config.enabled);
        assert_eq!(config.expiration_time(), Ok(NaiveTime::from_hms_opt(3, 0, 0).unwrap()));
        assert_eq!(config.activation_time(), Ok(NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["8am", "25:00", "08:60", ""] {
            let config = SchedulerConfig {
                activation_time: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(
                config.validate(),
                Err(ValidationError::InvalidTimeOfDay(bad.to_string())),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn rejects_zero_poll_interval() {
        let config = SchedulerConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidPollInterval));
    }
}
