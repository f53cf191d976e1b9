//! OS signal trap feeding the shutdown coordinator
//!
//! SIGINT and SIGTERM on Unix; Ctrl+C only on Windows. Every received signal
//! calls `ShutdownCoordinator::shutdown`, whose latch turns repeats into no-ops.

use std::io;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::shutdown::ShutdownCoordinator;
use shared::{logging, process_warn, ComponentId};

#[cfg(unix)]
struct ShutdownSignals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignals {
    fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) -> Option<&'static str> {
        tokio::select! {
            received = self.interrupt.recv() => received.map(|_| "SIGINT"),
            received = self.terminate.recv() => received.map(|_| "SIGTERM"),
        }
    }
}

#[cfg(windows)]
struct ShutdownSignals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl ShutdownSignals {
    fn install() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    async fn recv(&mut self) -> Option<&'static str> {
        self.ctrl_c.recv().await.map(|_| "Ctrl+C")
    }
}

#[cfg(not(any(unix, windows)))]
struct ShutdownSignals;

#[cfg(not(any(unix, windows)))]
impl ShutdownSignals {
    fn install() -> io::Result<Self> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "no signal support on this platform"))
    }

    async fn recv(&mut self) -> Option<&'static str> {
        None
    }
}

/// Installed signal trap; dropping it uninstalls the listener task
pub struct SignalListener {
    task: JoinHandle<()>,
}

impl SignalListener {
    /// Arm the trap. Must succeed before any service is spawned.
    pub fn install(coordinator: Arc<ShutdownCoordinator>) -> OrchestratorResult<Self> {
        let mut signals = ShutdownSignals::install().map_err(|e| OrchestratorError::SignalInstallFailed {
            reason: e.to_string(),
        })?;

        let task = tokio::spawn(async move {
            while let Some(name) = signals.recv().await {
                let component = ComponentId::current();
                if coordinator.state().is_shutting_down() {
                    process_warn!(component, "Received {} while draining, ignoring", name);
                    continue;
                }
                logging::log_shutdown(component, &format!("received {name}"));

                // Drain off the listener task so later signals are still consumed
                let coordinator = coordinator.clone();
                tokio::spawn(async move {
                    coordinator.shutdown().await;
                });
            }
        });

        Ok(Self { task })
    }
}

impl Drop for SignalListener {
    fn drop(&mut self) {
        self.task.abort();
    }
}
