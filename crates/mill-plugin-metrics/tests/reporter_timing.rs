use mill_plugin_metrics::{
    CapabilityKind, FeatureRegistrationTracker, InventoryReport, InventoryReporter,
    MetricsConfig, MetricsError, MetricsResult, ReportSink, DEFAULT_REPORT_INTERVAL,
};
use mill_test_support::{invoke_registration, plugin, RecordingRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct CollectingSink {
    reports: Mutex<Vec<InventoryReport>>,
}

impl CollectingSink {
    fn reports(&self) -> Vec<InventoryReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ReportSink for CollectingSink {
    fn emit(&self, report: &InventoryReport) -> MetricsResult<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

/// Fails every other emission
#[derive(Default)]
struct FlakySink {
    attempts: AtomicUsize,
    delivered: AtomicUsize,
}

impl ReportSink for FlakySink {
    fn emit(&self, _report: &InventoryReport) -> MetricsResult<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt % 2 == 0 {
            return Err(MetricsError::sink("collector unavailable"));
        }
        self.delivered.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_reports_once_per_period_starting_after_first_period() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(CollectingSink::default());
    let reporter = InventoryReporter::new(
        tracker.inventory().clone(),
        sink.clone(),
        DEFAULT_REPORT_INTERVAL,
    )
    .unwrap();
    let handle = reporter.spawn().unwrap();

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(sink.reports().is_empty(), "no report before the first period");

    tokio::time::sleep(Duration::from_secs(20)).await;
    let reports = sink.reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].tick, 1);
    assert_eq!(reports[1].tick, 2);

    assert_eq!(handle.cancel().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_reports_reflect_registrations_between_ticks() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(CollectingSink::default());
    let handle = InventoryReporter::new(
        tracker.inventory().clone(),
        sink.clone(),
        Duration::from_secs(10),
    )
    .unwrap()
    .spawn()
    .unwrap();

    invoke_registration(&tracker, CapabilityKind::Completion, 7, &plugin("acme.lang")).unwrap();
    tokio::time::sleep(Duration::from_secs(15)).await;

    invoke_registration(&tracker, CapabilityKind::Hover, 9, &plugin("acme.lang")).unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;

    let reports = sink.reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].summary.registration_count, 1);
    assert_eq!(reports[1].summary.registration_count, 2);
    assert_eq!(
        reports[1].inventory.handle("acme.lang", CapabilityKind::Hover),
        Some(9)
    );

    handle.cancel().await;
}

#[tokio::test(start_paused = true)]
async fn test_no_reports_after_cancel() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(CollectingSink::default());
    let handle = InventoryReporter::new(
        tracker.inventory().clone(),
        sink.clone(),
        Duration::from_secs(10),
    )
    .unwrap()
    .spawn()
    .unwrap();

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(handle.cancel().await, 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(sink.reports().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sink_failures_do_not_stop_later_ticks() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(FlakySink::default());
    let handle = InventoryReporter::new(
        tracker.inventory().clone(),
        sink.clone(),
        Duration::from_secs(10),
    )
    .unwrap()
    .spawn()
    .unwrap();

    tokio::time::sleep(Duration::from_secs(45)).await;

    assert_eq!(sink.attempts.load(Ordering::SeqCst), 4);
    assert_eq!(sink.delivered.load(Ordering::SeqCst), 2);
    assert_eq!(handle.cancel().await, 4);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_reporting() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(CollectingSink::default());
    let handle = InventoryReporter::new(
        tracker.inventory().clone(),
        sink.clone(),
        Duration::from_secs(10),
    )
    .unwrap()
    .spawn()
    .unwrap();

    drop(handle);
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert!(sink.reports().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_spawn_if_enabled_uses_configured_interval() {
    let tracker = FeatureRegistrationTracker::new(RecordingRegistry::new());
    let sink = Arc::new(CollectingSink::default());
    let config = MetricsConfig {
        report_interval_secs: 3,
        ..MetricsConfig::default()
    };

    let handle = InventoryReporter::from_config(tracker.inventory().clone(), sink.clone(), &config)
        .unwrap()
        .spawn_if_enabled(&config)
        .unwrap()
        .expect("reporting is enabled by default");

    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(handle.cancel().await, 3);
    assert_eq!(sink.reports().len(), 3);
}
