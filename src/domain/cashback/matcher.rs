//! Campaign selection for a newly recorded sale.

use std::cmp::Ordering;

use crate::domain::foundation::Money;

use super::campaign::Campaign;

/// Picks the campaign that issues a coupon for a sale with `sale_final_value`.
///
/// Only active campaigns whose `[min_sale_value, max_sale_value]` range holds
/// the value are eligible. The highest `bonus_rate` wins; ties go to the
/// campaign created first, then to the lowest id.
pub fn select_campaign(campaigns: &[Campaign], sale_final_value: Money) -> Option<&Campaign> {
    campaigns
        .iter()
        .filter(|c| c.is_active && c.accepts(sale_final_value))
        .min_by(|a, b| precedence(a, b))
}

fn precedence(a: &Campaign, b: &Campaign) -> Ordering {
    b.bonus_rate
        .cmp(&a.bonus_rate)
        .then_with(|| a.date_added.cmp(&b.date_added))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cashback::campaign::CampaignDraft;
    use crate::domain::foundation::{CampaignId, StoreId, Timestamp};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn at(day: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap())
    }

    fn campaign(min: u32, max: u32, bonus: i64, added: Timestamp) -> Campaign {
        let draft = CampaignDraft {
            title: format!("{}% back", bonus),
            min_sale_value: Money::from_units(min),
            max_sale_value: Money::from_units(max),
            url: None,
            bonus_rate: bonus,
            discount_limit_rate: 30,
            coupon_lifetime: 45,
            is_active: true,
        };
        Campaign::create(StoreId::new(), draft, added).unwrap()
    }

    #[test]
    fn returns_none_without_campaigns() {
        assert!(select_campaign(&[], Money::from_units(100)).is_none());
    }

    #[test]
    fn returns_none_when_value_outside_every_range() {
        let campaigns = vec![campaign(0, 50, 10, at(1)), campaign(200, 300, 20, at(1))];
        assert!(select_campaign(&campaigns, Money::from_units(100)).is_none());
    }

    #[test]
    fn picks_highest_bonus_among_eligible() {
        let campaigns = vec![
            campaign(0, 1000, 10, at(1)),
            campaign(0, 1000, 25, at(2)),
            campaign(500, 1000, 40, at(3)),
        ];
        let chosen = select_campaign(&campaigns, Money::from_units(100)).unwrap();
        assert_eq!(chosen.bonus_rate.value(), 25);
    }

    #[test]
    fn skips_inactive_campaigns() {
        let mut best = campaign(0, 1000, 50, at(1));
        best.is_active = false;
        let campaigns = vec![best, campaign(0, 1000, 10, at(1))];
        let chosen = select_campaign(&campaigns, Money::from_units(100)).unwrap();
        assert_eq!(chosen.bonus_rate.value(), 10);
    }

    #[test]
    fn tie_goes_to_earliest_campaign() {
        let newer = campaign(0, 1000, 20, at(5));
        let older = campaign(0, 1000, 20, at(2));
        let older_id = older.id;
        let campaigns = vec![newer, older];
        assert_eq!(select_campaign(&campaigns, Money::from_units(10)).unwrap().id, older_id);
    }

    #[test]
    fn full_tie_goes_to_lowest_id() {
        let mut a = campaign(0, 1000, 20, at(2));
        let mut b = campaign(0, 1000, 20, at(2));
        a.id = CampaignId::from_uuid(Uuid::from_u128(2));
        b.id = CampaignId::from_uuid(Uuid::from_u128(1));
        let campaigns = vec![a, b];
        assert_eq!(
            select_campaign(&campaigns, Money::from_units(10)).unwrap().id,
            CampaignId::from_uuid(Uuid::from_u128(1))
        );
    }
}
