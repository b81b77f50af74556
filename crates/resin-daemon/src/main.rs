use anyhow::Result;
use clap::Parser;
use resin_daemon::config::Config;
use resin_daemon::cycle;
use resin_daemon::fetch::HoyolabClient;
use resin_daemon::notify::SlackWebhook;
use resin_daemon::state::StateStore;
use std::time::Duration;
use tokio::signal;
use tokio::time::interval;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_target(false)
        .with_max_level(Level::INFO)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::parse();
    info!(
        "starting daily-notes monitor for uid {} (every {}h, thresholds {:?})",
        config.genshin_uid, config.schedule_hours, config.resin_alert_thresholds.0
    );

    let fetcher = HoyolabClient::new(&config)?;
    let notifier = SlackWebhook::new(&config.slack_webhook_url, config.genshin_uid)?;
    let store = StateStore::new(&config.data_dir);

    tokio::select! {
        _ = run_loop(&config, &fetcher, &notifier, &store) => {}
        _ = signal::ctrl_c() => info!("shutdown requested"),
    }
    Ok(())
}

/// Sleep-then-run scheduling: one cycle per tick, never overlapping, and a
/// failed cycle is logged and skipped rather than taking the loop down.
async fn run_loop(
    config: &Config,
    fetcher: &HoyolabClient,
    notifier: &SlackWebhook,
    store: &StateStore,
) {
    let mut tick = interval(Duration::from_secs(config.schedule_hours.max(1) * 3600));
    if !config.post_on_start {
        // Consume the interval's immediate first tick.
        tick.tick().await;
    }
    loop {
        tick.tick().await;
        let now = chrono::Utc::now();
        if let Err(e) = cycle::run_cycle(
            now,
            &config.resin_alert_thresholds.0,
            fetcher,
            notifier,
            store,
        )
        .await
        {
            warn!("cycle failed: {e:?}");
        }
    }
}
