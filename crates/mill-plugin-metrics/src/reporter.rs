//! Periodic inventory reporting
//!
//! [`InventoryReporter::spawn`] schedules a task on the current tokio runtime that
//! snapshots the inventory once per period and hands an [`InventoryReport`] to a
//! [`ReportSink`]. Each tick stands alone: a failing sink is logged and the next
//! tick proceeds as normal.

use crate::config::{check_interval, MetricsConfig};
use crate::error::{MetricsError, MetricsResult};
use crate::inventory::{FeatureInventory, Inventory, InventorySummary};
use crate::logging::report_span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};

/// Tracing target used by [`TracingSink`]
pub const REPORT_TARGET: &str = "plugin_metrics";

/// One emitted view of the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
    /// 1-based sequence number of the tick that produced this report
    pub tick: u64,
    pub summary: InventorySummary,
    pub inventory: Inventory,
}

impl InventoryReport {
    pub fn new(tick: u64, inventory: Inventory) -> Self {
        Self {
            generated_at: Utc::now(),
            tick,
            summary: inventory.summary(),
            inventory,
        }
    }
}

/// Destination for inventory reports
pub trait ReportSink: Send + Sync {
    fn emit(&self, report: &InventoryReport) -> MetricsResult<()>;
}

impl<F> ReportSink for F
where
    F: Fn(&InventoryReport) -> MetricsResult<()> + Send + Sync,
{
    fn emit(&self, report: &InventoryReport) -> MetricsResult<()> {
        self(report)
    }
}

/// Writes reports to the log stream at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, report: &InventoryReport) -> MetricsResult<()> {
        let inventory = serde_json::to_string(&report.inventory)?;
        info!(
            target: REPORT_TARGET,
            tick = report.tick,
            generated_at = %report.generated_at.to_rfc3339(),
            plugins = report.summary.plugin_count,
            registrations = report.summary.registration_count,
            inventory = %inventory,
            "Plugin capability inventory"
        );
        Ok(())
    }
}

/// Emits inventory snapshots to a sink on a fixed period
pub struct InventoryReporter {
    inventory: FeatureInventory,
    sink: Arc<dyn ReportSink>,
    period: Duration,
}

impl InventoryReporter {
    /// Create a reporter; `period` must be non-zero and at most
    /// [`MAX_REPORT_INTERVAL`](crate::config::MAX_REPORT_INTERVAL)
    pub fn new(
        inventory: FeatureInventory,
        sink: Arc<dyn ReportSink>,
        period: Duration,
    ) -> MetricsResult<Self> {
        check_interval(period)?;

        Ok(Self {
            inventory,
            sink,
            period,
        })
    }

    pub fn from_config(
        inventory: FeatureInventory,
        sink: Arc<dyn ReportSink>,
        config: &MetricsConfig,
    ) -> MetricsResult<Self> {
        config.validate()?;
        Self::new(inventory, sink, config.report_interval())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Snapshot the inventory and emit it immediately
    pub fn report_now(&self, tick: u64) -> MetricsResult<()> {
        let report = InventoryReport::new(tick, self.inventory.snapshot());
        self.sink.emit(&report)
    }

    /// Schedule periodic reporting on the current tokio runtime
    ///
    /// The first report is emitted one full period after this call.
    pub fn spawn(self) -> MetricsResult<ReporterHandle> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| MetricsError::NoRuntime)?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        debug!(period = ?self.period, "Starting inventory reporter");
        let task = runtime.spawn(self.run(shutdown_rx));

        Ok(ReporterHandle {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Like [`spawn`](Self::spawn), but returns `None` when reporting is disabled
    pub fn spawn_if_enabled(self, config: &MetricsConfig) -> MetricsResult<Option<ReporterHandle>> {
        if !config.enabled {
            debug!("Inventory reporter disabled by configuration");
            return Ok(None);
        }
        self.spawn().map(Some)
    }

    async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) -> u64 {
        let Some(first_tick) = Instant::now().checked_add(self.period) else {
            warn!(period = ?self.period, "Report period overflows the clock, not reporting");
            return 0;
        };
        let mut ticker = interval_at(first_tick, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut emitted = 0u64;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    let tick = emitted + 1;
                    async {
                        if let Err(e) = self.report_now(tick) {
                            warn!(error = %e, "Failed to emit inventory report");
                        }
                    }
                    .instrument(report_span(tick))
                    .await;
                    emitted = tick;
                }
            }
        }

        debug!(emitted, "Inventory reporter stopped");
        emitted
    }
}

/// Controls a spawned [`InventoryReporter`]
///
/// Dropping the handle aborts the task.
pub struct ReporterHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
}

impl ReporterHandle {
    /// Stop reporting and wait for the task to finish
    ///
    /// Returns the number of ticks that ran, including ticks whose sink failed.
    pub async fn cancel(mut self) -> u64 {
        if let Some(tx) = self.shutdown_tx.take() {
            // The task may have already exited
            let _ = tx.send(());
        }

        match self.task.take() {
            Some(task) => match task.await {
                Ok(emitted) => emitted,
                Err(e) => {
                    warn!(error = %e, "Inventory reporter task ended abnormally");
                    0
                }
            },
            None => 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
