//! Scheduled background services.

mod lifecycle_scheduler;

pub use lifecycle_scheduler::{
    LifecycleScheduler, LifecycleSchedulerConfig, Procedure, RunOutcome,
};
