//! RequestVerificationHandler - Sends a verification code to a new customer.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::cashback::{
    new_verification_code, verification_message, CashbackError, VerificationCode,
};
use crate::domain::foundation::{Cellphone, StoreId};
use crate::ports::{DeliveryId, SmsSender};

/// Command to send a verification code.
#[derive(Debug, Clone)]
pub struct RequestVerificationCommand {
    pub store_id: StoreId,
    /// Cellphone as typed at the counter.
    pub cellphone: String,
}

/// Result of a verification request.
///
/// The seller compares `code` with what the customer reads back.
#[derive(Debug, Clone)]
pub struct RequestVerificationResult {
    pub cellphone: Cellphone,
    pub code: VerificationCode,
    pub delivery_id: DeliveryId,
}

pub struct RequestVerificationHandler {
    sms: Arc<dyn SmsSender>,
}

impl RequestVerificationHandler {
    pub fn new(sms: Arc<dyn SmsSender>) -> Self {
        Self { sms }
    }

    pub async fn handle(
        &self,
        cmd: RequestVerificationCommand,
    ) -> Result<RequestVerificationResult, CashbackError> {
        let cellphone = Cellphone::parse(&cmd.cellphone)?;
        let code = new_verification_code();
        let body = verification_message(&code)?;

        let delivery_id = self
            .sms
            .send(&cellphone.recipient(), &body)
            .await
            .map_err(|e| {
                warn!(store_id = %cmd.store_id, error = %e, "Verification SMS failed");
                CashbackError::delivery(e.message)
            })?;

        info!(
            store_id = %cmd.store_id,
            delivery_id = %delivery_id,
            "Verification code sent"
        );

        Ok(RequestVerificationResult {
            cellphone,
            code,
            delivery_id,
        })
    }
}
