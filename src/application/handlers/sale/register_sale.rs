//! RegisterSaleHandler - Records a sale at the counter.
//!
//! Finds or registers the customer, applies the chosen coupon, stores the
//! sale and runs coupon issuance once.

use std::sync::Arc;

use tracing::info;

use crate::domain::cashback::{CashbackError, Coupon, Customer, Sale, SaleDraft};
use crate::domain::foundation::{Cellphone, CouponId, ErrorCode, Money, StoreId, Timestamp};
use crate::ports::{CampaignRepository, CouponRepository, CustomerRepository, SaleRepository};

use super::evaluate_sale::{EvaluateSaleCommand, EvaluateSaleHandler};

/// Command to register a sale.
#[derive(Debug, Clone)]
pub struct RegisterSaleCommand {
    pub store_id: StoreId,
    pub cellphone: String,
    /// Set once the seller confirmed the verification code.
    pub customer_verified: bool,
    pub initial_value: Money,
    pub identifier: Option<String>,
    pub date: chrono::NaiveDate,
    pub coupon_id: Option<CouponId>,
}

/// Result of a registered sale.
#[derive(Debug, Clone)]
pub struct RegisterSaleResult {
    pub sale: Sale,
    pub customer: Customer,
    pub customer_created: bool,
    pub issued_coupon: Option<Coupon>,
}

pub struct RegisterSaleHandler {
    customers: Arc<dyn CustomerRepository>,
    sales: Arc<dyn SaleRepository>,
    coupons: Arc<dyn CouponRepository>,
    evaluator: EvaluateSaleHandler,
}

impl RegisterSaleHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        sales: Arc<dyn SaleRepository>,
        coupons: Arc<dyn CouponRepository>,
        campaigns: Arc<dyn CampaignRepository>,
    ) -> Self {
        Self {
            evaluator: EvaluateSaleHandler::new(sales.clone(), campaigns),
            customers,
            sales,
            coupons,
        }
    }

    pub async fn handle(
        &self,
        cmd: RegisterSaleCommand,
    ) -> Result<RegisterSaleResult, CashbackError> {
        let now = Timestamp::now();

        // 1. Find or register the customer
        let cellphone = Cellphone::parse(&cmd.cellphone)?;
        let (customer, customer_created) = self
            .resolve_customer(cmd.store_id, cellphone, cmd.customer_verified, now)
            .await?;

        // 2. Check the chosen coupon
        let coupon = match cmd.coupon_id {
            Some(id) => Some(self.redeemable_coupon(&cmd.store_id, &customer, id).await?),
            None => None,
        };

        // 3. Record the sale; the coupon is flipped in the same transaction
        let sale = Sale::record(
            cmd.store_id,
            customer.id,
            SaleDraft {
                initial_value: cmd.initial_value,
                identifier: cmd.identifier,
                date: cmd.date,
            },
            coupon.as_ref(),
            now,
        )?;
        self.sales.insert(&sale).await?;

        info!(
            store_id = %sale.store_id,
            sale_id = %sale.id,
            final_value = %sale.final_value,
            redeemed_coupon = ?sale.redeemed_coupon,
            "Sale registered"
        );

        // 4. Issuance
        let evaluated = self
            .evaluator
            .handle(EvaluateSaleCommand {
                store_id: cmd.store_id,
                sale_id: sale.id,
            })
            .await?;

        Ok(RegisterSaleResult {
            sale: evaluated.sale,
            customer,
            customer_created,
            issued_coupon: evaluated.issued_coupon,
        })
    }

    async fn resolve_customer(
        &self,
        store_id: StoreId,
        cellphone: Cellphone,
        verified: bool,
        now: Timestamp,
    ) -> Result<(Customer, bool), CashbackError> {
        if let Some(existing) = self.customers.find_by_cellphone(&store_id, &cellphone).await? {
            return Ok((existing, false));
        }
        if !verified {
            return Err(CashbackError::verification_required(cellphone.as_str()));
        }

        let customer = Customer::register_verified(store_id, cellphone, now);
        match self.customers.save(&customer).await {
            Ok(()) => {
                info!(store_id = %store_id, customer_id = %customer.id, "Customer registered");
                Ok((customer, true))
            }
            // Registered concurrently by another sale
            Err(e) if e.code == ErrorCode::Conflict => {
                let existing = self
                    .customers
                    .find_by_cellphone(&store_id, &customer.cellphone)
                    .await?
                    .ok_or_else(|| CashbackError::conflict(e.message))?;
                Ok((existing, false))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn redeemable_coupon(
        &self,
        store_id: &StoreId,
        customer: &Customer,
        coupon_id: CouponId,
    ) -> Result<Coupon, CashbackError> {
        let coupon = self
            .coupons
            .find_by_id(&coupon_id)
            .await?
            .filter(|c| c.is_owned_by(store_id) && c.customer_id == customer.id)
            .ok_or_else(|| CashbackError::not_found("coupon", coupon_id))?;

        if !coupon.is_redeemable() {
            return Err(CashbackError::conflict(format!(
                "coupon {} is {}",
                coupon.id,
                coupon.status()
            )));
        }
        Ok(coupon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{draft, Fixture, PHONE};
    use chrono::Duration;

    fn handler(fx: &Fixture) -> RegisterSaleHandler {
        RegisterSaleHandler::new(
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
            fx.store.clone(),
        )
    }

    fn command(fx: &Fixture, initial: u32) -> RegisterSaleCommand {
        RegisterSaleCommand {
            store_id: fx.store_id,
            cellphone: PHONE.to_string(),
            customer_verified: true,
            initial_value: Money::from_units(initial),
            identifier: Some("NF-1001".to_string()),
            date: Timestamp::now().date(),
            coupon_id: None,
        }
    }

    async fn valid_coupon(fx: &Fixture, customer: &Customer, value: u32) -> Coupon {
        let campaign = fx.campaign(draft(20, 30, 45)).await;
        let mut coupon = fx
            .coupon(customer, &campaign, value, Timestamp::now().minus_days(3))
            .await;
        coupon.is_valid = true;
        fx.store.seed_coupon(coupon.clone()).await;
        coupon
    }

    #[tokio::test]
    async fn registers_customer_and_issues_coupon() {
        let fx = Fixture::new();
        fx.campaign(draft(20, 30, 45)).await;

        let result = handler(&fx).handle(command(&fx, 1000)).await.unwrap();

        assert!(result.customer_created);
        assert_eq!(result.customer.cellphone.as_str(), PHONE);
        assert_eq!(result.sale.final_value, Money::from_units(1000));
        assert!(result.sale.is_evaluated);
        let coupon = result.issued_coupon.unwrap();
        assert_eq!(coupon.discount_value, Money::from_units(200));
        assert_eq!(coupon.customer_id, result.customer.id);
        assert_eq!(
            coupon.expiration_date,
            result.sale.date_added.date() + Duration::days(45)
        );
    }

    #[tokio::test]
    async fn unknown_unverified_customer_is_rejected() {
        let fx = Fixture::new();
        let mut cmd = command(&fx, 1000);
        cmd.customer_verified = false;

        let err = handler(&fx).handle(cmd).await.unwrap_err();

        assert!(matches!(err, CashbackError::VerificationRequired(_)));
    }

    #[tokio::test]
    async fn known_customer_needs_no_verification() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let mut cmd = command(&fx, 100);
        cmd.customer_verified = false;

        let result = handler(&fx).handle(cmd).await.unwrap();

        assert!(!result.customer_created);
        assert_eq!(result.customer.id, customer.id);
    }

    #[tokio::test]
    async fn redeems_coupon_with_capped_discount() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let coupon = valid_coupon(&fx, &customer, 200).await;
        let mut cmd = command(&fx, 500);
        cmd.coupon_id = Some(coupon.id);

        let result = handler(&fx).handle(cmd).await.unwrap();

        assert_eq!(result.sale.effective_discount, Money::from_units(150));
        assert_eq!(result.sale.final_value, Money::from_units(350));
        assert_eq!(result.sale.redeemed_coupon, Some(coupon.id));
        let stored = CouponRepository::find_by_id(fx.store.as_ref(), &coupon.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.is_redeemed);
    }

    #[tokio::test]
    async fn redeemed_coupon_cannot_be_used_twice() {
        let fx = Fixture::new();
        let customer = fx.customer(PHONE).await;
        let coupon = valid_coupon(&fx, &customer, 200).await;
        let mut cmd = command(&fx, 500);
        cmd.coupon_id = Some(coupon.id);

        handler(&fx).handle(cmd.clone()).await.unwrap();
        let err = handler(&fx).handle(cmd).await.unwrap_err();

        assert!(matches!(err, CashbackError::Conflict(_)));
    }

    #[tokio::test]
    async fn another_customers_coupon_is_not_found() {
        let fx = Fixture::new();
        let owner = fx.customer("5511911112222").await;
        let coupon = valid_coupon(&fx, &owner, 200).await;
        fx.customer(PHONE).await;
        let mut cmd = command(&fx, 500);
        cmd.coupon_id = Some(coupon.id);

        let err = handler(&fx).handle(cmd).await.unwrap_err();

        assert!(matches!(err, CashbackError::NotFound { entity: "coupon", .. }));
    }

    #[tokio::test]
    async fn sale_date_outside_window_is_rejected() {
        let fx = Fixture::new();
        let mut cmd = command(&fx, 500);
        cmd.date = Timestamp::now().date() - Duration::days(16);

        let err = handler(&fx).handle(cmd).await.unwrap_err();

        assert!(matches!(
            err,
            CashbackError::ValidationFailed { ref field, .. } if field == "date"
        ));
    }
}
