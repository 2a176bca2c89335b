//! ActivationCycleHandler - Daily activation messaging.
//!
//! For each coupon still in the cycle, fires at most one stage per day:
//! the first activation makes the coupon usable, two reminders follow, and
//! a final warning three days before expiration closes the cycle.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::domain::cashback::{activation_message, ActivationStage, CashbackError, StoreSettings};
use crate::domain::foundation::{DomainError, StoreId};
use crate::ports::{ActivationCandidate, CouponRepository, SmsSender, StoreSettingsRepository};

use super::report::LifecycleRunReport;

#[derive(Debug, Clone, Copy)]
pub struct RunActivationCycleCommand {
    /// UTC calendar day of the run.
    pub today: NaiveDate,
}

pub struct ActivationCycleHandler {
    coupons: Arc<dyn CouponRepository>,
    settings: Arc<dyn StoreSettingsRepository>,
    sms: Arc<dyn SmsSender>,
}

impl ActivationCycleHandler {
    pub fn new(
        coupons: Arc<dyn CouponRepository>,
        settings: Arc<dyn StoreSettingsRepository>,
        sms: Arc<dyn SmsSender>,
    ) -> Self {
        Self {
            coupons,
            settings,
            sms,
        }
    }

    /// Processes every activation candidate.
    ///
    /// A stage's flag change is stored even when its message could not be
    /// sent; the failure is reported. Fails only if the candidates cannot be
    /// read.
    pub async fn handle(
        &self,
        cmd: RunActivationCycleCommand,
    ) -> Result<LifecycleRunReport, CashbackError> {
        let candidates = self.coupons.list_activation_candidates().await?;
        let mut report = LifecycleRunReport {
            examined: candidates.len(),
            ..Default::default()
        };
        let mut settings_by_store: HashMap<StoreId, StoreSettings> = HashMap::new();

        for candidate in candidates {
            let coupon = &candidate.coupon;
            if coupon.was_notified_on(cmd.today) {
                continue;
            }
            let Some(stage) = ActivationStage::due(
                coupon.trigger_date(),
                coupon.expiration_date,
                candidate.campaign_lifetime,
                cmd.today,
            ) else {
                continue;
            };

            let settings = match self
                .store_settings(&mut settings_by_store, coupon.store_id)
                .await
            {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(coupon_id = %coupon.id, error = %e, "Failed to load store settings");
                    report.fail(coupon.id, Some(stage), e);
                    continue;
                }
            };

            self.process(candidate, stage, &settings, cmd.today, &mut report)
                .await;
        }

        info!(
            today = %cmd.today,
            examined = report.examined,
            changed = report.changed,
            messages_sent = report.messages_sent,
            failures = report.failures.len(),
            "Activation cycle finished"
        );
        Ok(report)
    }

    /// Settings of `store_id`, looked up once per run.
    async fn store_settings(
        &self,
        cache: &mut HashMap<StoreId, StoreSettings>,
        store_id: StoreId,
    ) -> Result<StoreSettings, DomainError> {
        if let Some(settings) = cache.get(&store_id) {
            return Ok(settings.clone());
        }
        let settings = self
            .settings
            .find(&store_id)
            .await?
            .unwrap_or_else(|| StoreSettings::defaults_for(store_id));
        cache.insert(store_id, settings.clone());
        Ok(settings)
    }

    async fn process(
        &self,
        candidate: ActivationCandidate,
        stage: ActivationStage,
        settings: &StoreSettings,
        today: NaiveDate,
        report: &mut LifecycleRunReport,
    ) {
        let ActivationCandidate {
            mut coupon,
            cellphone,
            campaign_url,
            ..
        } = candidate;

        match activation_message(stage, &coupon, settings, campaign_url.as_deref()) {
            Ok(body) => match self.sms.send(&cellphone.recipient(), &body).await {
                Ok(delivery_id) => {
                    report.messages_sent += 1;
                    debug!(
                        coupon_id = %coupon.id,
                        stage = %stage,
                        delivery_id = %delivery_id,
                        "Activation message sent"
                    );
                }
                Err(e) => {
                    warn!(coupon_id = %coupon.id, stage = %stage, error = %e, "Activation message failed");
                    report.fail(coupon.id, Some(stage), e);
                }
            },
            Err(e) => {
                warn!(coupon_id = %coupon.id, stage = %stage, error = %e, "Activation message rejected");
                report.fail(coupon.id, Some(stage), e);
            }
        }

        coupon.apply_stage(stage, today);
        match self.coupons.update_lifecycle(&coupon).await {
            Ok(()) => report.changed += 1,
            Err(e) => {
                warn!(coupon_id = %coupon.id, stage = %stage, error = %e, "Failed to store activation stage");
                report.fail(coupon.id, Some(stage), e);
            }
        }
    }
}
