//! SMS gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::runtime::Environment;

/// Longest alphanumeric sender id carriers accept.
const SENDER_ID_MAX_CHARS: usize = 11;

/// Which SMS transport to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Log messages instead of sending them
    #[default]
    Log,
    /// JSON gateway over HTTP
    Http,
}

/// SMS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    #[serde(default)]
    pub provider: SmsProvider,

    /// Gateway endpoint, required for `http`
    pub api_url: Option<String>,

    /// Gateway bearer key, required for `http`
    pub api_key: Option<SecretString>,

    /// Sender shown on the handset
    #[serde(default = "default_sender_id")]
    pub sender_id: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SmsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate SMS configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let sender_len = self.sender_id.chars().count();
        if sender_len == 0 || sender_len > SENDER_ID_MAX_CHARS {
            return Err(ValidationError::InvalidSenderId);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 60 {
            return Err(ValidationError::InvalidSmsTimeout);
        }
        if self.provider == SmsProvider::Log {
            return Ok(());
        }

        let url = self
            .api_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::MissingRequired("SMS__API_URL"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidSmsUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::SmsUrlMustBeHttps);
        }
        let has_key = self
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty());
        if !has_key {
            return Err(ValidationError::MissingRequired("SMS__API_KEY"));
        }
        Ok(())
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            api_url: None,
            api_key: None,
            sender_id: default_sender_id(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_sender_id() -> String {
    "Cashback".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> SmsConfig {
        SmsConfig {
            provider: SmsProvider::Http,
            api_url: Some("https://sms.example.com/v1/messages".to_string()),
            api_key: Some(SecretString::new("key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn log_provider_needs_no_credentials() {
        assert!(SmsConfig::default().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn http_provider_requires_url_and_key() {
        assert!(http().validate(&Environment::Development).is_ok());

        let no_url = SmsConfig {
            api_url: None,
            ..http()
        };
        assert_eq!(
            no_url.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("SMS__API_URL"))
        );

        let no_key = SmsConfig {
            api_key: Some(SecretString::new(String::new())),
            ..http()
        };
        assert_eq!(
            no_key.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("SMS__API_KEY"))
        );
    }

    #[test]
    fn production_requires_https() {
        let plain = SmsConfig {
            api_url: Some("http://sms.internal/send".to_string()),
            ..http()
        };
        assert!(plain.validate(&Environment::Staging).is_ok());
        assert_eq!(
            plain.validate(&Environment::Production),
            Err(ValidationError::SmsUrlMustBeHttps)
        );
    }

    #[test]
    fn sender_id_and_timeout_bounds() {
        let long_sender = SmsConfig {
            sender_id: "LojaCashback1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            long_sender.validate(&Environment::Development),
            Err(ValidationError::InvalidSenderId)
        );

        let slow = SmsConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            slow.validate(&Environment::Development),
            Err(ValidationError::InvalidSmsTimeout)
        );
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let rendered = format!("{:?}", http());
        assert!(!rendered.contains("\"key\""));
    }
}
