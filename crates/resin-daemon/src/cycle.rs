use crate::alerts;
use crate::fetch::{FetchError, SnapshotFetcher};
use crate::notify::{DeliveryError, Notifier};
use crate::state::StateStore;
use chrono::{DateTime, Utc};
use resin_core::{day_key, next_reset, Report};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CycleError {
    /// Snapshot fetch failed; the cycle aborted before alert evaluation.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Report delivery failed; alert state was already settled by then.
    #[error("report delivery failed: {0}")]
    Deliver(#[from] DeliveryError),
    /// Alert state could not be persisted.
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// One monitoring cycle: fetch → alert → report → deliver, strictly in that
/// order. A fetch failure aborts before any state is touched; alert state is
/// loaded, evaluated, and (when something fired) persisted before the report
/// goes out, so a Slack outage on the report cannot lose dedup state.
pub async fn run_cycle(
    now: DateTime<Utc>,
    thresholds: &[u32],
    fetcher: &dyn SnapshotFetcher,
    notifier: &dyn Notifier,
    store: &StateStore,
) -> Result<(), CycleError> {
    let snapshot = fetcher.fetch().await?;

    let day = day_key(now);
    let mut state = store.load();
    alerts::fire_resin_alerts(
        snapshot.current_resin,
        thresholds,
        &day,
        &mut state,
        store,
        notifier,
    )
    .await?;

    let reset = next_reset(now);
    let report = Report::build(&snapshot, &reset, now);
    notifier.send_report(&report).await?;

    info!(
        "cycle complete: resin {}/{}, {}/{} expeditions finished",
        report.resin.current,
        report.resin.max,
        report.expeditions.finished,
        report.expeditions.total
    );
    Ok(())
}
