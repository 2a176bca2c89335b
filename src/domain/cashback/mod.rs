//! Cashback domain module.
//!
//! Coupon issuance, redemption and the time-driven coupon lifecycle.
//!
//! # Module Structure
//!
//! - `monetary` - Coupon face value and capped discount
//! - `codes` - Coupon and verification codes
//! - `campaign` - Campaign entity and validation
//! - `matcher` - Campaign selection for a sale
//! - `sale` / `customer` / `coupon` - Entities
//! - `issuance` - Coupon issuance for a new sale
//! - `redemption` - Applying a coupon to a sale
//! - `activation` - Activation message stages
//! - `messages` - SMS bodies
//! - `settings` - Per-store settings
//! - `summary` - Store and campaign figures

mod activation;
mod campaign;
mod codes;
mod coupon;
mod customer;
mod errors;
mod issuance;
mod matcher;
mod messages;
mod monetary;
mod redemption;
mod sale;
mod settings;
mod summary;

pub use activation::{
    ActivationStage, FINAL_WARNING_DAYS_BEFORE_EXPIRATION, FINAL_WARNING_MIN_LIFETIME_DAYS,
    FIRST_ACTIVATION_AFTER_DAYS, REMINDER_AFTER_DAYS, SECOND_REMINDER_AFTER_DAYS,
};
pub use campaign::{
    validate_coupon_lifetime, validate_url, Campaign, CampaignDraft, CAMPAIGN_TITLE_MAX_CHARS,
    DEFAULT_MAX_SALE_UNITS, MIN_COUPON_LIFETIME_DAYS, URL_MAX_CHARS,
};
pub use codes::{
    new_coupon_code, new_verification_code, CouponCode, VerificationCode, CODE_ALPHABET,
    COUPON_CODE_LEN, VERIFICATION_CODE_LEN,
};
pub use coupon::{Coupon, CouponStatus};
pub use customer::Customer;
pub use errors::CashbackError;
pub use issuance::evaluate_sale_for_coupon;
pub use matcher::select_campaign;
pub use messages::{activation_message, verification_message, SmsBody, SMS_MAX_CHARS};
pub use monetary::{coupon_face_value, effective_discount};
pub use redemption::{apply_redemption, Redemption};
pub use sale::{
    validate_sale_date, Sale, SaleDraft, SALE_DATE_MAX_DAYS_AFTER, SALE_DATE_MAX_DAYS_BEFORE,
    SALE_IDENTIFIER_MAX_CHARS,
};
pub use settings::{StoreSettings, StoreSettingsInput, CURRENCY_MAX_CHARS, STORE_TITLE_MAX_CHARS};
pub use summary::CashbackSummary;
