//! Cashback Engine - Store loyalty coupons
//!
//! Issues a coupon worth a share of each qualifying sale, redeems it on a
//! later sale, and drives the coupon lifecycle (activation messages and
//! expiration) with a daily scheduler.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
