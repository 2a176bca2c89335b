//! SMS transport port.

use crate::domain::cashback::SmsBody;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;
use std::fmt;

/// Provider-assigned identifier of a sent message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeliveryId(String);

impl DeliveryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sends a single SMS.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send `body` to `recipient` (`+` followed by the international number).
    ///
    /// # Errors
    ///
    /// - `DeliveryFailed` if the provider rejected or did not accept the message
    async fn send(&self, recipient: &str, body: &SmsBody) -> Result<DeliveryId, DomainError>;
}
