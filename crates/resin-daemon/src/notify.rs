use async_trait::async_trait;
use resin_core::{eta, Report};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound message channel. One best-effort send per call; retry policy is
/// the caller's business (see `alerts`).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), DeliveryError>;
    async fn send_report(&self, report: &Report) -> Result<(), DeliveryError>;
}

/// Slack incoming-webhook notifier. Reports go out as Block Kit sections,
/// alerts as plain mrkdwn text.
pub struct SlackWebhook {
    http: reqwest::Client,
    url: String,
    uid: u64,
}

impl SlackWebhook {
    pub fn new(url: impl Into<String>, uid: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
            uid,
        })
    }

    async fn post(&self, payload: &Value) -> Result<(), DeliveryError> {
        self.http
            .post(&self.url)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn send_text(&self, text: &str) -> Result<(), DeliveryError> {
        self.post(&json!({ "text": text })).await
    }

    async fn send_report(&self, report: &Report) -> Result<(), DeliveryError> {
        self.post(&render_blocks(report, self.uid)).await
    }
}

/// Block Kit rendering of a report: header, context line, and one section of
/// six mrkdwn fields. A snapshot without teapot data renders the teapot field
/// as `N/A` rather than a misleading 0/0.
pub(crate) fn render_blocks(report: &Report, uid: u64) -> Value {
    let teapot = match &report.teapot {
        Some(t) => format!(
            "*🫖 Teapot Coins*\n`{}/{}` — {} to cap",
            t.current,
            t.max,
            eta(t.eta_seconds)
        ),
        None => "*🫖 Teapot Coins*\n`N/A`".to_string(),
    };

    let reset_eta = eta(report.reset.until.num_seconds().max(0) as u64);
    let reset_eta = reset_eta.trim_start_matches("in ~");

    let fields = [
        format!(
            "*🔋 Resin*\n`{}/{}` — {} to full",
            report.resin.current,
            report.resin.max,
            eta(report.resin.eta_seconds)
        ),
        format!(
            "*🗺 Expeditions*\n`{}/{}` finished",
            report.expeditions.finished, report.expeditions.total
        ),
        teapot,
        format!(
            "*🌙 Abyss Reset (NA)*\n`{}` — in {}",
            report.reset.target.format("%Y-%m-%d %H:%M %Z"),
            reset_eta
        ),
        format!(
            "*📝 Commissions*\n`{}/{}`",
            report.commissions.done, report.commissions.total
        ),
        format!(
            "*🎁 Commission Reward*\n{}",
            if report.commissions.claimed {
                "✅ claimed"
            } else {
                "❌ not claimed"
            }
        ),
    ];

    json!({
        "blocks": [
            {
                "type": "header",
                "text": { "type": "plain_text", "text": "Genshin Daily Notes", "emoji": true }
            },
            {
                "type": "context",
                "elements": [
                    { "type": "mrkdwn", "text": format!("*Time:* {}", report.generated_at.format("%Y-%m-%d %H:%M UTC")) },
                    { "type": "mrkdwn", "text": "*Server:* NA" },
                    { "type": "mrkdwn", "text": format!("*UID:* `{uid}`") }
                ]
            },
            { "type": "divider" },
            {
                "type": "section",
                "fields": fields
                    .iter()
                    .map(|t| json!({ "type": "mrkdwn", "text": t }))
                    .collect::<Vec<_>>()
            }
        ],
        "text": "Genshin Daily Notes"
    })
}
