//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Repository ports over PostgreSQL (sqlx)
//! - `memory` - Repository and SMS ports in memory, for tests and local runs
//! - `sms` - SMS gateway over HTTP, or logging only
//! - `scheduler` - Daily coupon lifecycle runs

pub mod memory;
pub mod postgres;
pub mod scheduler;
pub mod sms;

pub use memory::{InMemoryCashbackStore, RecordingSmsSender};
pub use scheduler::{LifecycleScheduler, LifecycleSchedulerConfig};
pub use sms::{HttpSmsConfig, HttpSmsSender, LoggingSmsSender};
