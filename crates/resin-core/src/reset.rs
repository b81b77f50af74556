use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// Abyss resets follow the NA game server: America/New_York.
pub const SERVER_TZ: Tz = New_York;

/// Local hour of the reset on the 1st and 16th. Minute and second are always
/// zero, so a strict hour comparison decides "already passed".
pub const RESET_HOUR: u32 = 4;

/// The next Abyss reset: when it lands, and how long until then.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetEvent {
    pub target: DateTime<Tz>,
    pub until: Duration,
}

/// Next reset strictly after `now`. Resets land on the 1st and 16th of each
/// month at [`RESET_HOUR`] server-local time, rolling December into January.
pub fn next_reset(now_utc: DateTime<Utc>) -> ResetEvent {
    let now = now_utc.with_timezone(&SERVER_TZ);
    let (y, m, d) = (now.year(), now.month(), now.day());

    let target = if d == 1 && now.hour() < RESET_HOUR {
        reset_instant(y, m, 1)
    } else if d < 16 || (d == 16 && now.hour() < RESET_HOUR) {
        reset_instant(y, m, 16)
    } else if m == 12 {
        reset_instant(y + 1, 1, 1)
    } else {
        reset_instant(y, m + 1, 1)
    };

    ResetEvent {
        target,
        until: target - now,
    }
}

fn reset_instant(y: i32, m: u32, d: u32) -> DateTime<Tz> {
    // 04:00 exists and is unambiguous on every America/New_York date; DST
    // transitions happen at 02:00 local.
    SERVER_TZ
        .with_ymd_and_hms(y, m, d, RESET_HOUR, 0, 0)
        .single()
        .expect("reset hour exists in server timezone")
}

/// Calendar date in the server timezone, used to scope alert dedup to one day.
pub fn day_key(now_utc: DateTime<Utc>) -> String {
    now_utc
        .with_timezone(&SERVER_TZ)
        .format("%Y-%m-%d")
        .to_string()
}
