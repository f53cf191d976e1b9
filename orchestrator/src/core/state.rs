//! Supervisor state shared by the supervisor, monitor loop and shutdown coordinator

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{watch, Mutex, MutexGuard};

use super::handle::{ProcessHandle, ProcessInfo, TerminationState};

/// Lifecycle of the shutdown sequence: `Idle -> Draining -> Done`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    Idle,
    Draining,
    Done,
}

/// Tracked handles plus the one-way shutdown latch
///
/// Handles are kept in spawn order. The handle list is only appended to while
/// the latch is unset; once `begin_shutdown` succeeds, nothing new is tracked.
pub struct SupervisorState {
    handles: Mutex<Vec<ProcessHandle>>,
    shutdown_in_progress: AtomicBool,
    phase: watch::Sender<ShutdownPhase>,
}

impl Default for SupervisorState {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisorState {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(ShutdownPhase::Idle);
        Self {
            handles: Mutex::new(Vec::new()),
            shutdown_in_progress: AtomicBool::new(false),
            phase,
        }
    }

    /// Append a handle. Returns it back when a shutdown has already begun.
    pub async fn track(&self, handle: ProcessHandle) -> Result<(), ProcessHandle> {
        let mut handles = self.handles.lock().await;
        // Checked under the lock so a drain never misses a late append
        if self.is_shutting_down() {
            return Err(handle);
        }
        handles.push(handle);
        Ok(())
    }

    /// Exclusive access to the handle list, in spawn order
    pub async fn handles(&self) -> MutexGuard<'_, Vec<ProcessHandle>> {
        self.handles.lock().await
    }

    /// Identities of all tracked handles, in spawn order
    pub async fn snapshot(&self) -> Vec<ProcessInfo> {
        self.handles.lock().await.iter().map(|h| h.info().clone()).collect()
    }

    /// Last observed state of every tracked handle, in spawn order
    pub async fn states(&self) -> Vec<(String, TerminationState)> {
        self.handles
            .lock()
            .await
            .iter()
            .map(|h| (h.name().to_string(), h.state()))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.handles.lock().await.len()
    }

    /// Set the latch. Only the first caller gets `true`; later calls are no-ops.
    pub fn begin_shutdown(&self) -> bool {
        let first = !self.shutdown_in_progress.swap(true, Ordering::SeqCst);
        if first {
            self.phase.send_replace(ShutdownPhase::Draining);
        }
        first
    }

    /// Mark the drain as finished
    pub fn finish_shutdown(&self) {
        self.phase.send_replace(ShutdownPhase::Done);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_in_progress.load(Ordering::SeqCst)
    }

    pub fn phase(&self) -> ShutdownPhase {
        *self.phase.borrow()
    }

    /// Receiver for phase transitions
    pub fn subscribe(&self) -> watch::Receiver<ShutdownPhase> {
        self.phase.subscribe()
    }

    /// Resolve once a shutdown has begun
    pub async fn shutdown_requested(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|phase| *phase != ShutdownPhase::Idle).await;
    }

    /// Resolve once the drain has finished
    pub async fn shutdown_complete(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|phase| *phase == ShutdownPhase::Done).await;
    }
}
