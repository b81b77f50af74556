use crate::notify::Notifier;
use crate::state::StateStore;
use anyhow::Result;
use resin_core::{due_thresholds, AlertState};
use tracing::{info, warn};

/// Fires any newly crossed resin thresholds, at most once per day each.
///
/// A threshold is marked fired only after its notification was delivered, so
/// a failed send leaves the entry unmarked and the next cycle retries while
/// resin is still over the line. The trade-off runs the other way only across
/// a crash between send and persist, where one duplicate alert is possible.
/// A failed send for one threshold does not stop later thresholds from being
/// tried, and the state file is rewritten only when something new fired.
pub async fn fire_resin_alerts(
    resin_now: u32,
    thresholds: &[u32],
    day: &str,
    state: &mut AlertState,
    store: &StateStore,
    notifier: &dyn Notifier,
) -> Result<()> {
    let mut fired_any = false;

    for threshold in due_thresholds(resin_now, thresholds, state, day) {
        let text = format!(
            "🔔 *Resin Alert*: You've reached **{threshold}** resin (current: {resin_now})."
        );
        match notifier.send_text(&text).await {
            Ok(()) => {
                state.mark_fired(day, threshold);
                fired_any = true;
                info!("resin alert fired at {threshold} (current {resin_now})");
            }
            Err(e) => {
                warn!("resin alert at {threshold} not delivered, will retry next cycle: {e}");
            }
        }
    }

    if fired_any {
        store.save(state)?;
    }
    Ok(())
}
