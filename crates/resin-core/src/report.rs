use crate::model::RawSnapshot;
use crate::recovery::Recovery;
use crate::reset::ResetEvent;
use chrono::{DateTime, Utc};

/// Daily commissions default to 4 slots when upstream omits the total.
pub const DEFAULT_COMMISSION_TOTAL: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct ResinGauge {
    pub current: u32,
    pub max: u32,
    pub eta_seconds: u64,
}

/// Present only when the snapshot carried both teapot fields; an unlocked
/// teapot with no data renders as "N/A" downstream, never as 0/0.
#[derive(Debug, Clone, PartialEq)]
pub struct TeapotGauge {
    pub current: u64,
    pub max: u64,
    pub eta_seconds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpeditionSummary {
    pub finished: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommissionSummary {
    pub done: u32,
    pub total: u32,
    pub claimed: bool,
}

/// Render-ready aggregate for one monitoring cycle. Built fresh each cycle,
/// handed to the notifier, then dropped; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub resin: ResinGauge,
    pub expeditions: ExpeditionSummary,
    pub teapot: Option<TeapotGauge>,
    pub commissions: CommissionSummary,
    pub reset: ResetEvent,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Pure assembly of a report from a snapshot and the next reset. No I/O,
    /// no state: the same inputs always produce the same report.
    pub fn build(raw: &RawSnapshot, reset: &ResetEvent, now: DateTime<Utc>) -> Report {
        let finished = raw.expeditions.iter().filter(|e| e.finished).count() as u32;

        let teapot = match (raw.teapot_currency, raw.teapot_currency_max) {
            (Some(current), Some(max)) => Some(TeapotGauge {
                current,
                max,
                eta_seconds: Recovery::seconds_opt(raw.teapot_recovery.as_ref(), now),
            }),
            _ => None,
        };

        Report {
            resin: ResinGauge {
                current: raw.current_resin,
                max: raw.max_resin,
                eta_seconds: Recovery::seconds_opt(raw.resin_recovery.as_ref(), now),
            },
            expeditions: ExpeditionSummary {
                finished,
                total: raw.expeditions.len() as u32,
            },
            teapot,
            commissions: CommissionSummary {
                done: raw.finished_commissions.unwrap_or(0),
                total: raw.max_commissions.unwrap_or(DEFAULT_COMMISSION_TOTAL),
                claimed: raw.claimed_commission_reward.unwrap_or(false),
            },
            reset: reset.clone(),
            generated_at: now,
        }
    }
}
