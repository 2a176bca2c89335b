//! cashback-scheduler - Runs the daily coupon lifecycle against PostgreSQL.

use std::error::Error;
use std::sync::Arc;

use cashback_engine::adapters::postgres::{
    run_migrations, PostgresCouponRepository, PostgresStoreSettingsRepository,
};
use cashback_engine::adapters::{
    HttpSmsConfig, HttpSmsSender, LifecycleScheduler, LifecycleSchedulerConfig, LoggingSmsSender,
};
use cashback_engine::application::{ActivationCycleHandler, ExpireCouponsHandler};
use cashback_engine::config::{AppConfig, SmsConfig, SmsProvider, ValidationError};
use cashback_engine::ports::SmsSender;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = config
        .database
        .pool_options()
        .connect_with(config.database.connect_options()?)
        .await?;
    info!(
        statement_timeout_secs = config.database.statement_timeout_secs,
        "Connected to PostgreSQL"
    );

    if config.database.run_migrations {
        run_migrations(&pool).await?;
        info!("Migrations applied");
    }

    if !config.scheduler.enabled {
        warn!("Scheduler disabled by configuration, exiting");
        return Ok(());
    }

    let coupons = Arc::new(PostgresCouponRepository::new(pool.clone()));
    let settings = Arc::new(PostgresStoreSettingsRepository::new(pool));
    let sms = build_sms_sender(&config.sms)?;

    let scheduler = LifecycleScheduler::with_config(
        ExpireCouponsHandler::new(coupons.clone()),
        ActivationCycleHandler::new(coupons, settings, sms),
        LifecycleSchedulerConfig::default()
            .with_times(
                config.scheduler.expiration_time()?,
                config.scheduler.activation_time()?,
            )
            .with_poll_interval(config.scheduler.poll_interval()),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(shutdown_rx).await;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_sms_sender(config: &SmsConfig) -> Result<Arc<dyn SmsSender>, Box<dyn Error + Send + Sync>> {
    match config.provider {
        SmsProvider::Log => {
            warn!("SMS provider is 'log', messages will not be delivered");
            Ok(Arc::new(LoggingSmsSender::new()))
        }
        SmsProvider::Http => {
            let api_url = config
                .api_url
                .clone()
                .ok_or(ValidationError::MissingRequired("SMS__API_URL"))?;
            let api_key = config
                .api_key
                .clone()
                .ok_or(ValidationError::MissingRequired("SMS__API_KEY"))?;
            let http = HttpSmsConfig::new(api_url, api_key, config.sender_id.clone())
                .with_timeout(config.timeout());
            Ok(Arc::new(HttpSmsSender::new(http)?))
        }
    }
}
