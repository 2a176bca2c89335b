//! In-memory SMS sender for tests.
//!
//! Records every message and can be told to fail for given recipients.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::Mutex;

use crate::domain::cashback::SmsBody;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{DeliveryId, SmsSender};

/// A message handed to the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub recipient: String,
    pub body: String,
}

/// Records sent messages for assertions.
#[derive(Default)]
pub struct RecordingSmsSender {
    sent: Mutex<Vec<SentSms>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to `recipient` fail.
    pub async fn fail_for(&self, recipient: impl Into<String>) {
        self.failing.lock().await.insert(recipient.into());
    }

    /// Messages sent successfully, in order.
    pub async fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().await.clone()
    }

    /// Messages sent to one recipient.
    pub async fn sent_to(&self, recipient: &str) -> Vec<SentSms> {
        self.sent()
            .await
            .into_iter()
            .filter(|m| m.recipient == recipient)
            .collect()
    }

    /// Forgets recorded messages.
    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send(&self, recipient: &str, body: &SmsBody) -> Result<DeliveryId, DomainError> {
        if self.failing.lock().await.contains(recipient) {
            return Err(DomainError::new(
                ErrorCode::DeliveryFailed,
                format!("Delivery to {} refused", recipient),
            ));
        }
        let mut sent = self.sent.lock().await;
        sent.push(SentSms {
            recipient: recipient.to_string(),
            body: body.as_str().to_string(),
        });
        Ok(DeliveryId::new(format!("mem-{}", sent.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_and_fails_on_demand() {
        let sender = RecordingSmsSender::new();
        sender.fail_for("+5511000000000").await;
        let body = SmsBody::new("hi").unwrap();

        assert_eq!(sender.send("+5511999990000", &body).await.unwrap().as_str(), "mem-1");
        assert!(sender.send("+5511000000000", &body).await.is_err());
        assert_eq!(sender.sent().await.len(), 1);
        assert_eq!(sender.sent_to("+5511999990000").await[0].body, "hi");
    }
}
