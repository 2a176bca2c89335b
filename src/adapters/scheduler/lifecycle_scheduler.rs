//! LifecycleScheduler - Background service driving the daily coupon runs.
//!
//! Two procedures run once per UTC day:
//!
//! | Procedure | Default time (UTC) | Handler |
//! |-----------|--------------------|---------|
//! | expiration | 03:00 | `ExpireCouponsHandler` |
//! | activation | 08:00 | `ActivationCycleHandler` |
//!
//! The loop wakes every `poll_interval` and starts a procedure once its time
//! of day has passed and it has not completed for the current date. A
//! procedure that fails to read its candidates is retried on the next tick.
//!
//! Each procedure has a run lock. A tick that finds the lock held skips
//! the procedure and logs it.
//!
//! ## Graceful Shutdown
//!
//! The service listens for a shutdown signal and returns once the current
//! tick has finished.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tokio::sync::{watch, Mutex};
use tokio::time;
use tracing::{error, info, warn};

use crate::application::handlers::{
    ActivationCycleHandler, ExpireCouponsCommand, ExpireCouponsHandler, LifecycleRunReport,
    RunActivationCycleCommand,
};
use crate::domain::cashback::CashbackError;

/// Configuration for the LifecycleScheduler service.
#[derive(Debug, Clone)]
pub struct LifecycleSchedulerConfig {
    /// UTC time of day of the expiration sweep.
    pub expiration_time: NaiveTime,

    /// UTC time of day of the activation cycle.
    pub activation_time: NaiveTime,

    /// How often the loop checks whether a procedure is due.
    pub poll_interval: Duration,
}

impl Default for LifecycleSchedulerConfig {
    fn default() -> Self {
        Self {
            expiration_time: NaiveTime::from_hms_opt(3, 0, 0).unwrap_or_default(),
            activation_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            poll_interval: Duration::from_secs(30),
        }
    }
}

impl LifecycleSchedulerConfig {
    pub fn with_times(mut self, expiration: NaiveTime, activation: NaiveTime) -> Self {
        self.expiration_time = expiration;
        self.activation_time = activation;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Which scheduled procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    Expiration,
    Activation,
}

impl Procedure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Procedure::Expiration => "expiration",
            Procedure::Activation => "activation",
        }
    }
}

/// Outcome of asking a procedure to run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(LifecycleRunReport),
    /// Not due yet, or already completed for the day.
    NotDue,
    /// Another run of the same procedure holds the lock.
    Skipped,
    Failed(CashbackError),
}

/// A procedure's run lock, holding the last date it completed.
#[derive(Default)]
struct RunLock {
    last_completed: Mutex<Option<NaiveDate>>,
}

/// Background service that runs the coupon lifecycle every day.
pub struct LifecycleScheduler {
    expire: ExpireCouponsHandler,
    activate: ActivationCycleHandler,
    config: LifecycleSchedulerConfig,
    expiration_lock: RunLock,
    activation_lock: RunLock,
}

impl LifecycleScheduler {
    /// Create a scheduler with default times.
    pub fn new(expire: ExpireCouponsHandler, activate: ActivationCycleHandler) -> Self {
        Self::with_config(expire, activate, LifecycleSchedulerConfig::default())
    }

    pub fn with_config(
        expire: ExpireCouponsHandler,
        activate: ActivationCycleHandler,
        config: LifecycleSchedulerConfig,
    ) -> Self {
        Self {
            expire,
            activate,
            config,
            expiration_lock: RunLock::default(),
            activation_lock: RunLock::default(),
        }
    }

    /// Run the scheduler loop until shutdown signal is received.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.poll_interval);
        info!(
            expiration_time = %self.config.expiration_time,
            activation_time = %self.config.activation_time,
            "Lifecycle scheduler started"
        );

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Lifecycle scheduler stopped");
                        return;
                    }
                }

                _ = interval.tick() => {
                    self.tick(Utc::now()).await;
                }
            }
        }
    }

    /// Starts every procedure due at `now`.
    pub async fn tick(&self, now: DateTime<Utc>) -> Vec<(Procedure, RunOutcome)> {
        let mut outcomes = Vec::with_capacity(2);
        for procedure in [Procedure::Expiration, Procedure::Activation] {
            let outcome = self.run_if_due(procedure, now).await;
            outcomes.push((procedure, outcome));
        }
        outcomes
    }

    /// Runs `procedure` if its time has passed and it has not completed on
    /// `now`'s date.
    pub async fn run_if_due(&self, procedure: Procedure, now: DateTime<Utc>) -> RunOutcome {
        let today = now.date_naive();
        let lock = self.lock_for(procedure);

        let Ok(mut last_completed) = lock.last_completed.try_lock() else {
            warn!(procedure = procedure.as_str(), "Previous run still in progress, skipping");
            return RunOutcome::Skipped;
        };
        if now.time() < self.time_for(procedure) || *last_completed == Some(today) {
            return RunOutcome::NotDue;
        }

        match self.execute(procedure, today).await {
            Ok(report) => {
                *last_completed = Some(today);
                if !report.is_clean() {
                    warn!(
                        procedure = procedure.as_str(),
                        failures = report.failures.len(),
                        "Run finished with failures"
                    );
                }
                RunOutcome::Completed(report)
            }
            Err(e) => {
                error!(procedure = procedure.as_str(), error = %e, "Run failed, retrying next tick");
                RunOutcome::Failed(e)
            }
        }
    }

    async fn execute(
        &self,
        procedure: Procedure,
        today: NaiveDate,
    ) -> Result<LifecycleRunReport, CashbackError> {
        match procedure {
            Procedure::Expiration => self.expire.handle(ExpireCouponsCommand { today }).await,
            Procedure::Activation => {
                self.activate
                    .handle(RunActivationCycleCommand { today })
                    .await
            }
        }
    }

    fn lock_for(&self, procedure: Procedure) -> &RunLock {
        match procedure {
            Procedure::Expiration => &self.expiration_lock,
            Procedure::Activation => &self.activation_lock,
        }
    }

    fn time_for(&self, procedure: Procedure) -> NaiveTime {
        match procedure {
            Procedure::Expiration => self.config.expiration_time,
            Procedure::Activation => self.config.activation_time,
        }
    }
}
