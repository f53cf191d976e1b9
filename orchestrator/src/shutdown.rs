//! Shutdown coordination
//!
//! Turns an interrupt (or a direct call) into a bounded drain of every tracked
//! process: graceful terminate, wait up to the timeout, then forced kill. Each
//! handle is drained in isolation so one failure never blocks the rest.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::core::{ProcessHandle, SupervisorState};
use crate::error::OrchestratorResult;
use shared::{logging, process_debug, process_info, process_warn, ComponentId};

/// Result of draining one handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Exited within the graceful timeout.
    ///
    /// Platforms without a graceful terminate signal kill on terminate, so
    /// there this also covers processes that were stopped forcibly.
    Graceful,
    /// Ignored the graceful signal and was killed
    Forced,
    /// Was no longer running when the drain reached it
    AlreadyStopped,
    /// The platform rejected a signal or status query
    Error(String),
}

impl DrainOutcome {
    /// Whether this outcome counts as a shutdown action
    pub fn stopped_by_drain(&self) -> bool {
        matches!(self, DrainOutcome::Graceful | DrainOutcome::Forced)
    }
}

impl fmt::Display for DrainOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainOutcome::Graceful => write!(f, "graceful"),
            DrainOutcome::Forced => write!(f, "forced"),
            DrainOutcome::AlreadyStopped => write!(f, "already-stopped"),
            DrainOutcome::Error(reason) => write!(f, "error: {reason}"),
        }
    }
}

/// Outcome of one handle, with identity for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainRecord {
    pub name: String,
    pub pid: u32,
    pub outcome: DrainOutcome,
    pub elapsed: Duration,
}

/// Per-handle outcomes of one drain, in spawn order
#[derive(Debug, Clone, Default)]
pub struct ShutdownReport {
    pub records: Vec<DrainRecord>,
    pub elapsed: Duration,
}

impl ShutdownReport {
    /// Number of processes stopped by the drain (graceful + forced)
    pub fn stopped_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.stopped_by_drain()).count()
    }

    pub fn outcomes(&self) -> Vec<&DrainOutcome> {
        self.records.iter().map(|r| &r.outcome).collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &DrainRecord> {
        self.records.iter().filter(|r| matches!(r.outcome, DrainOutcome::Error(_)))
    }
}

/// Drains all tracked handles exactly once
pub struct ShutdownCoordinator {
    state: Arc<SupervisorState>,
    graceful_timeout: Duration,
    report: Mutex<Option<ShutdownReport>>,
}

impl ShutdownCoordinator {
    pub fn new(state: Arc<SupervisorState>, graceful_timeout: Duration) -> Self {
        Self {
            state,
            graceful_timeout,
            report: Mutex::new(None),
        }
    }

    pub fn state(&self) -> &Arc<SupervisorState> {
        &self.state
    }

    /// Drain every tracked handle in spawn order.
    ///
    /// Only the first call performs the drain and returns its report; calls
    /// made while (or after) draining return `None` without touching any
    /// process.
    pub async fn shutdown(&self) -> Option<ShutdownReport> {
        if !self.state.begin_shutdown() {
            process_debug!(ComponentId::current(), "Shutdown already in progress, ignoring request");
            return None;
        }

        let component = ComponentId::current();
        logging::log_shutdown(component, "stopping all services");
        let started = Instant::now();

        let records = {
            let mut handles = self.state.handles().await;
            let mut records = Vec::with_capacity(handles.len());
            for handle in handles.iter_mut() {
                records.push(self.drain(handle).await);
            }
            records
        };

        let report = ShutdownReport {
            records,
            elapsed: started.elapsed(),
        };

        for record in report.errors() {
            if let DrainOutcome::Error(reason) = &record.outcome {
                logging::log_error(component, &format!("Stopping {} (PID: {})", record.name, record.pid), reason);
            }
        }
        logging::log_success(
            component,
            &format!("Successfully stopped {} service(s)", report.stopped_count()),
        );

        *self.report.lock().await = Some(report.clone());
        self.state.finish_shutdown();
        Some(report)
    }

    /// Wait for a drain (started by anyone) to finish and return its report
    pub async fn completed(&self) -> Option<ShutdownReport> {
        self.state.shutdown_complete().await;
        self.report.lock().await.clone()
    }

    async fn drain(&self, handle: &mut ProcessHandle) -> DrainRecord {
        let started = Instant::now();
        let outcome = match self.drain_handle(handle).await {
            Ok(outcome) => outcome,
            Err(e) => DrainOutcome::Error(e.to_string()),
        };

        DrainRecord {
            name: handle.name().to_string(),
            pid: handle.pid(),
            outcome,
            elapsed: started.elapsed(),
        }
    }

    async fn drain_handle(&self, handle: &mut ProcessHandle) -> OrchestratorResult<DrainOutcome> {
        let component = ComponentId::current();

        if !handle.is_running()? {
            process_debug!(component, "{} (PID: {}) already stopped", handle.name(), handle.pid());
            return Ok(DrainOutcome::AlreadyStopped);
        }

        process_info!(component, "   Stopping {} (PID: {})...", handle.name(), handle.pid());
        handle.terminate().await?;

        if handle.wait_for_exit(self.graceful_timeout).await?.is_some() {
            return Ok(DrainOutcome::Graceful);
        }

        process_warn!(
            component,
            "   Force killing {} (PID: {}) after {:?}...",
            handle.name(),
            handle.pid(),
            self.graceful_timeout
        );
        handle.kill().await?;
        handle.wait().await?;
        Ok(DrainOutcome::Forced)
    }
}
