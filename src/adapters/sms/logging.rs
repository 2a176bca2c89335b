//! SMS sender that only logs.
//!
//! Used for local runs and environments without a gateway.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cashback::SmsBody;
use crate::domain::foundation::DomainError;
use crate::ports::{DeliveryId, SmsSender};

/// Logs every message at `info` level instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct LoggingSmsSender;

impl LoggingSmsSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SmsSender for LoggingSmsSender {
    async fn send(&self, recipient: &str, body: &SmsBody) -> Result<DeliveryId, DomainError> {
        let delivery_id = DeliveryId::new(format!("log-{}", Uuid::new_v4()));
        tracing::info!(
            delivery_id = %delivery_id,
            recipient = %recipient,
            chars = body.char_count(),
            body = %body,
            "SMS not sent (logging transport)"
        );
        Ok(delivery_id)
    }
}
