use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A "time until ready" field as the upstream API reports it.
///
/// The daily-note payload is not consistent about this: depending on the
/// endpoint version a recovery field arrives as an RFC 3339 ready-at instant,
/// a `{Day, Hour, Minute, Second}` component map, or a bare count of seconds
/// (sometimes quoted as a string). All of them normalize to whole seconds
/// remaining via [`Recovery::seconds_until_ready`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recovery {
    /// Timezone-aware ready-at instant.
    ReadyAt(DateTime<Utc>),
    /// Naive ready-at instant, read as UTC.
    ReadyAtNaive(NaiveDateTime),
    /// Split duration components.
    Components {
        #[serde(rename = "Day", default)]
        day: i64,
        #[serde(rename = "Hour", default)]
        hour: i64,
        #[serde(rename = "Minute", default)]
        minute: i64,
        #[serde(rename = "Second", default)]
        second: i64,
    },
    /// Bare seconds remaining.
    Seconds(f64),
    /// Seconds remaining, quoted as a string.
    Text(String),
}

impl Recovery {
    /// Whole seconds until ready, floored at zero. Zero means "ready now".
    pub fn seconds_until_ready(&self, now: DateTime<Utc>) -> u64 {
        match self {
            Recovery::ReadyAt(at) => (*at - now).num_seconds().max(0) as u64,
            Recovery::ReadyAtNaive(at) => (at.and_utc() - now).num_seconds().max(0) as u64,
            Recovery::Components {
                day,
                hour,
                minute,
                second,
            } => (day * 86400 + hour * 3600 + minute * 60 + second).max(0) as u64,
            Recovery::Seconds(s) => clamp_seconds(*s),
            Recovery::Text(s) => s.trim().parse::<f64>().map(clamp_seconds).unwrap_or(0),
        }
    }

    /// Like [`Recovery::seconds_until_ready`], with an absent field meaning "ready".
    pub fn seconds_opt(value: Option<&Recovery>, now: DateTime<Utc>) -> u64 {
        value.map(|r| r.seconds_until_ready(now)).unwrap_or(0)
    }
}

fn clamp_seconds(s: f64) -> u64 {
    if s.is_finite() && s > 0.0 {
        s as u64
    } else {
        0
    }
}

/// Human-readable "time to ready" string: `"ready"` at zero, otherwise
/// `"in ~{H}h {M}m"` with the hour part omitted when zero.
pub fn eta(seconds: u64) -> String {
    if seconds == 0 {
        return "ready".to_string();
    }
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    if h > 0 {
        format!("in ~{h}h {m}m")
    } else {
        format!("in ~{m}m")
    }
}
