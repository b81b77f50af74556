use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-day record of which resin thresholds have already alerted.
///
/// Day keys come from [`crate::day_key`]. A `(day, threshold)` entry only
/// ever goes from unfired to fired; past days are kept for audit, nothing
/// evicts them. The persisted JSON is exactly this two-level map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertState {
    days: BTreeMap<String, BTreeMap<String, bool>>,
}

impl AlertState {
    pub fn is_fired(&self, day: &str, threshold: u32) -> bool {
        self.days
            .get(day)
            .and_then(|m| m.get(&threshold.to_string()))
            .copied()
            .unwrap_or(false)
    }

    pub fn mark_fired(&mut self, day: &str, threshold: u32) {
        self.days
            .entry(day.to_string())
            .or_default()
            .insert(threshold.to_string(), true);
    }
}

/// Thresholds that should alert right now: crossed by `resin` and not yet
/// fired today. Callers pass `thresholds` ascending, so firing order is
/// lowest-first. Thresholds never un-fire within a day, so a value that has
/// dropped back below a fired threshold stays fired.
pub fn due_thresholds(resin: u32, thresholds: &[u32], state: &AlertState, day: &str) -> Vec<u32> {
    thresholds
        .iter()
        .copied()
        .filter(|&t| resin >= t && !state.is_fired(day, t))
        .collect()
}
