//! HTTP SMS gateway adapter.
//!
//! Posts each message as JSON to a provider endpoint authenticated with a
//! bearer key:
//!
//! ```text
//! POST {api_url}
//! Authorization: Bearer {api_key}
//! {"from": "...", "to": "+5511...", "body": "..."}
//! ```
//!
//! The provider answers with `{"id": "..."}`, the delivery id.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpSmsConfig::new("https://sms.example.com/v1/messages", api_key, "CASHBACK");
//! let sender = HttpSmsSender::new(config)?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::cashback::SmsBody;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{DeliveryId, SmsSender};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// SMS gateway configuration.
#[derive(Clone)]
pub struct HttpSmsConfig {
    api_url: String,
    api_key: SecretString,
    sender_id: String,
    timeout: Duration,
}

impl HttpSmsConfig {
    pub fn new(
        api_url: impl Into<String>,
        api_key: SecretString,
        sender_id: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            sender_id: sender_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

fn delivery_failed(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::DeliveryFailed, message)
}

/// SMS sender backed by an HTTP gateway.
pub struct HttpSmsSender {
    config: HttpSmsConfig,
    http_client: reqwest::Client,
}

impl HttpSmsSender {
    /// Create a sender with the given configuration.
    pub fn new(config: HttpSmsConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send(&self, recipient: &str, body: &SmsBody) -> Result<DeliveryId, DomainError> {
        let request = SendRequest {
            from: &self.config.sender_id,
            to: recipient,
            body: body.as_str(),
        };

        let response = self
            .http_client
            .post(&self.config.api_url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "SMS gateway request failed");
                delivery_failed(format!("SMS gateway unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "SMS gateway rejected message");
            return Err(delivery_failed(format!("SMS gateway error {}: {}", status, error_text)));
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| delivery_failed(format!("Failed to parse SMS gateway response: {}", e)))?;

        tracing::debug!(delivery_id = %sent.id, "SMS accepted by gateway");
        Ok(DeliveryId::new(sent.id))
    }
}
