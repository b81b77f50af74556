use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use resin_core::{RawSnapshot, Report, SERVER_TZ};
use resin_daemon::cycle::run_cycle;
use resin_daemon::fetch::{FetchError, SnapshotFetcher};
use resin_daemon::notify::{DeliveryError, Notifier};
use resin_daemon::state::StateStore;
use std::sync::Mutex;
use tempfile::tempdir;

struct FixtureFetcher {
    snapshot: RawSnapshot,
}

#[async_trait]
impl SnapshotFetcher for FixtureFetcher {
    async fn fetch(&self) -> Result<RawSnapshot, FetchError> {
        Ok(self.snapshot.clone())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    texts: Mutex<Vec<String>>,
    reports: Mutex<Vec<Report>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_text(&self, text: &str) -> Result<(), DeliveryError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn send_report(&self, report: &Report) -> Result<(), DeliveryError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

fn fixture_snapshot() -> RawSnapshot {
    serde_json::from_value(serde_json::json!({
        "current_resin": 150,
        "max_resin": 200,
        "resin_recovery_time": "7530",
        "finished_task_num": 3,
        "total_task_num": 4,
        "is_extra_task_reward_received": false,
        "expeditions": [
            {"status": "Finished"},
            {"status": "Ongoing"},
        ],
        "current_home_coin": 1200,
        "max_home_coin": 2400,
        "home_coin_recovery_time": "36000"
    }))
    .unwrap()
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
}

const THRESHOLDS: [u32; 2] = [120, 160];

#[tokio::test]
async fn one_cycle_produces_the_expected_report_and_alert() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let fetcher = FixtureFetcher {
        snapshot: fixture_snapshot(),
    };
    let notifier = RecordingNotifier::default();
    let now = fixed_now();

    run_cycle(now, &THRESHOLDS, &fetcher, &notifier, &store)
        .await
        .unwrap();

    // Exactly one alert: 150 resin crosses 120 but not 160.
    let texts = notifier.texts.lock().unwrap().clone();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("120"));
    assert!(texts[0].contains("150"));

    let reports = notifier.reports.lock().unwrap().clone();
    assert_eq!(reports.len(), 1);
    let report = &reports[0];

    assert_eq!(report.resin.current, 150);
    assert_eq!(report.resin.max, 200);
    assert_eq!(report.resin.eta_seconds, 7530);

    assert_eq!(report.expeditions.finished, 1);
    assert_eq!(report.expeditions.total, 2);

    let teapot = report.teapot.as_ref().expect("teapot fields were present");
    assert_eq!(teapot.current, 1200);
    assert_eq!(teapot.max, 2400);
    assert_eq!(teapot.eta_seconds, 36000);

    assert_eq!(report.commissions.done, 3);
    assert_eq!(report.commissions.total, 4);
    assert!(!report.commissions.claimed);

    // 2024-03-20 is past the 16th, so the next reset is April 1st 04:00
    // server time, 11 days 20 hours from the fixed now.
    let expected_target = SERVER_TZ.with_ymd_and_hms(2024, 4, 1, 4, 0, 0).unwrap();
    assert_eq!(report.reset.target, expected_target);
    assert_eq!(report.reset.until.num_seconds(), 1_022_400);

    assert_eq!(report.generated_at, now);
}

#[tokio::test]
async fn rerunning_the_same_day_sends_no_new_alerts() {
    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let fetcher = FixtureFetcher {
        snapshot: fixture_snapshot(),
    };
    let notifier = RecordingNotifier::default();
    let now = fixed_now();

    run_cycle(now, &THRESHOLDS, &fetcher, &notifier, &store)
        .await
        .unwrap();
    run_cycle(now, &THRESHOLDS, &fetcher, &notifier, &store)
        .await
        .unwrap();

    // One alert total across both cycles, but a report from each.
    assert_eq!(notifier.texts.lock().unwrap().len(), 1);
    let reports = notifier.reports.lock().unwrap().clone();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0], reports[1]);
}

#[tokio::test]
async fn fetch_failure_aborts_the_cycle_without_touching_state() {
    struct FailingFetcher;

    #[async_trait]
    impl SnapshotFetcher for FailingFetcher {
        async fn fetch(&self) -> Result<RawSnapshot, FetchError> {
            Err(FetchError::Upstream {
                retcode: -100,
                message: "login expired".to_string(),
            })
        }
    }

    let dir = tempdir().unwrap();
    let store = StateStore::new(dir.path());
    let notifier = RecordingNotifier::default();

    let err = run_cycle(fixed_now(), &THRESHOLDS, &FailingFetcher, &notifier, &store)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        resin_daemon::cycle::CycleError::Fetch(FetchError::Upstream { retcode: -100, .. })
    ));

    // No partial report, no alert, no state written.
    assert!(notifier.texts.lock().unwrap().is_empty());
    assert!(notifier.reports.lock().unwrap().is_empty());
    assert!(!store.path().exists());
}
