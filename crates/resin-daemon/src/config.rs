use clap::Parser;
use std::path::PathBuf;

/// Ascending, deduplicated resin alert thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds(pub Vec<u32>);

fn parse_thresholds(raw: &str) -> Result<Thresholds, String> {
    let mut values = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let v: u32 = part
            .parse()
            .map_err(|_| format!("invalid threshold '{part}'"))?;
        values.push(v);
    }
    values.sort_unstable();
    values.dedup();
    Ok(Thresholds(values))
}

/// Daily-notes monitor configuration. Read once at startup from flags or the
/// matching environment variables; there is no hot reload. A missing required
/// credential fails the parse, so misconfiguration is fatal before the first
/// cycle rather than a per-cycle error.
#[derive(Debug, Parser)]
#[command(name = "resin-daemon", version, about = "HoYoLab daily-notes monitor with Slack reporting")]
pub struct Config {
    /// Slack incoming-webhook URL reports and alerts are posted to.
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook_url: String,

    /// HoYoLab `ltoken_v2` session cookie.
    #[arg(long, env = "LTOKEN_V2", hide_env_values = true)]
    pub ltoken_v2: String,

    /// HoYoLab `ltuid_v2` account cookie.
    #[arg(long, env = "LTUID_V2", hide_env_values = true)]
    pub ltuid_v2: String,

    /// Genshin UID to monitor.
    #[arg(long, env = "GENSHIN_UID")]
    pub genshin_uid: u64,

    /// Game server region the UID lives on.
    #[arg(long, env = "GENSHIN_SERVER", default_value = "os_usa")]
    pub genshin_server: String,

    /// Hours between monitoring cycles.
    #[arg(long, env = "SCHEDULE_HOURS", default_value_t = 1)]
    pub schedule_hours: u64,

    /// Run one cycle immediately at startup instead of waiting a full interval.
    #[arg(long, env = "POST_ON_START", default_value_t = true, action = clap::ArgAction::Set)]
    pub post_on_start: bool,

    /// Comma-separated resin thresholds that alert once per day each.
    #[arg(
        long,
        env = "RESIN_ALERT_THRESHOLDS",
        default_value = "120,160",
        value_parser = parse_thresholds
    )]
    pub resin_alert_thresholds: Thresholds,

    /// Directory holding the alert dedup state file.
    #[arg(long, env = "DATA_DIR", default_value = "/data")]
    pub data_dir: PathBuf,

    /// HoYoLab API base URL; override for testing against a stub.
    #[arg(
        long,
        env = "API_BASE_URL",
        default_value = "https://bbs-api-os.hoyolab.com"
    )]
    pub api_base_url: String,
}
