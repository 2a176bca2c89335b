//! Activation message stages.
//!
//! Stages one to three are counted from the day the coupon was issued; the
//! final warning is counted back from the expiration date and only applies
//! to campaigns longer than [`FINAL_WARNING_MIN_LIFETIME_DAYS`]. Coupons from
//! shorter campaigns therefore never complete the cycle and stay candidates
//! until they expire or are redeemed.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIRST_ACTIVATION_AFTER_DAYS: i64 = 2;
pub const REMINDER_AFTER_DAYS: i64 = 7;
pub const SECOND_REMINDER_AFTER_DAYS: i64 = 27;
pub const FINAL_WARNING_DAYS_BEFORE_EXPIRATION: i64 = 3;

/// Campaign lifetime a coupon must exceed to receive the final warning.
pub const FINAL_WARNING_MIN_LIFETIME_DAYS: u16 = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationStage {
    /// Coupon becomes usable.
    FirstActivation,
    Reminder,
    SecondReminder,
    /// Cycle complete.
    FinalWarning,
}

impl ActivationStage {
    /// The stage due on `today`, if any. At most one stage fires per day;
    /// earlier stages take precedence.
    pub fn due(
        trigger_date: NaiveDate,
        expiration_date: NaiveDate,
        campaign_lifetime: u16,
        today: NaiveDate,
    ) -> Option<Self> {
        let after = |days: i64| trigger_date + Duration::days(days);

        if today == after(FIRST_ACTIVATION_AFTER_DAYS) {
            Some(ActivationStage::FirstActivation)
        } else if today == after(REMINDER_AFTER_DAYS) {
            Some(ActivationStage::Reminder)
        } else if today == after(SECOND_REMINDER_AFTER_DAYS) {
            Some(ActivationStage::SecondReminder)
        } else if campaign_lifetime > FINAL_WARNING_MIN_LIFETIME_DAYS
            && today == expiration_date - Duration::days(FINAL_WARNING_DAYS_BEFORE_EXPIRATION)
        {
            Some(ActivationStage::FinalWarning)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationStage::FirstActivation => "first_activation",
            ActivationStage::Reminder => "reminder",
            ActivationStage::SecondReminder => "second_reminder",
            ActivationStage::FinalWarning => "final_warning",
        }
    }
}

impl fmt::Display for ActivationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(days_after_trigger: i64) -> NaiveDate {
        trigger() + Duration::days(days_after_trigger)
    }

    fn trigger() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn due(lifetime: u16, day: i64) -> Option<ActivationStage> {
        ActivationStage::due(trigger(), d(i64::from(lifetime)), lifetime, d(day))
    }

    #[test]
    fn stages_follow_issuance_calendar() {
        assert_eq!(due(45, 2), Some(ActivationStage::FirstActivation));
        assert_eq!(due(45, 7), Some(ActivationStage::Reminder));
        assert_eq!(due(45, 27), Some(ActivationStage::SecondReminder));
        assert_eq!(due(45, 42), Some(ActivationStage::FinalWarning));
    }

    #[test]
    fn nothing_due_between_stages() {
        for day in [0, 1, 3, 6, 8, 26, 28, 41, 43, 45] {
            assert_eq!(due(45, day), None, "day {}", day);
        }
    }

    #[test]
    fn short_campaigns_never_get_final_warning() {
        assert_eq!(due(35, 32), None);
        assert_eq!(due(20, 17), None);
        assert_eq!(due(36, 33), Some(ActivationStage::FinalWarning));
    }

    #[test]
    fn earlier_stage_wins_when_two_coincide() {
        // expiration - 3 lands on trigger + 7 for a 10 day window
        let stage = ActivationStage::due(trigger(), d(10), 40, d(7));
        assert_eq!(stage, Some(ActivationStage::Reminder));

        let stage = ActivationStage::due(trigger(), d(5), 40, d(2));
        assert_eq!(stage, Some(ActivationStage::FirstActivation));
    }
}
