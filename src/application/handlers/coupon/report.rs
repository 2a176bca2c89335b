//! Outcome of a scheduled lifecycle run.

use serde::Serialize;

use crate::domain::cashback::ActivationStage;
use crate::domain::foundation::CouponId;

/// A coupon the run could not fully process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifecycleFailure {
    pub coupon_id: CouponId,
    /// Stage being processed, for activation runs.
    pub stage: Option<ActivationStage>,
    pub error: String,
}

/// Counters and failures of one run over all stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LifecycleRunReport {
    /// Candidates read from storage.
    pub examined: usize,
    /// Coupons whose stored state changed.
    pub changed: usize,
    pub messages_sent: usize,
    pub failures: Vec<LifecycleFailure>,
}

impl LifecycleRunReport {
    pub(crate) fn fail(
        &mut self,
        coupon_id: CouponId,
        stage: Option<ActivationStage>,
        error: impl ToString,
    ) {
        self.failures.push(LifecycleFailure {
            coupon_id,
            stage,
            error: error.to_string(),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
