//! Supervisor: spawns the registry in order and watches for unexpected exits
//!
//! Startup is best-effort: a service that fails to spawn is reported and the
//! rest still start. Monitoring only reports; crashed children are never
//! restarted and never stop the orchestrator.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::core::{LaunchSpec, ProcessExit, ProcessHandle, ProcessInfo, ServiceRegistry, SupervisorState, TerminationState};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::CommandLauncher;
use shared::{logging, process_debug, process_info, process_warn, ComponentId};

/// A service that failed to start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnFailure {
    pub service: String,
    pub reason: String,
}

/// Outcome of `start_all`, in registry order
#[derive(Debug, Clone, Default)]
pub struct StartupReport {
    pub started: Vec<ProcessInfo>,
    pub failures: Vec<SpawnFailure>,
    /// Set when a shutdown request cut startup short
    pub interrupted: bool,
}

/// A tracked process that died outside of a drain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedExit {
    pub name: String,
    pub pid: u32,
    pub exit: ProcessExit,
}

/// Owns the tracked processes for the orchestrator's lifetime
pub struct Supervisor {
    launcher: Box<dyn CommandLauncher>,
    state: Arc<SupervisorState>,
    monitor_interval: Duration,
}

impl Supervisor {
    pub fn new(launcher: Box<dyn CommandLauncher>, monitor_interval: Duration) -> Self {
        Self {
            launcher,
            state: Arc::new(SupervisorState::new()),
            monitor_interval,
        }
    }

    /// Shared state, handed to the shutdown coordinator
    pub fn state(&self) -> Arc<SupervisorState> {
        self.state.clone()
    }

    /// Spawn one service and start tracking it
    pub async fn spawn(&self, spec: &LaunchSpec) -> OrchestratorResult<ProcessInfo> {
        let component = ComponentId::current();

        if self.state.is_shutting_down() {
            return Err(OrchestratorError::ShutdownInProgress { service: spec.name.clone() });
        }
        if !spec.working_dir.is_dir() {
            return Err(OrchestratorError::WorkingDirectoryMissing {
                service: spec.name.clone(),
                path: spec.working_dir.clone(),
            });
        }

        process_info!(component, "🚀 Starting {}...", spec.name);
        process_debug!(
            component,
            "{}: `{}` in {} via {} launcher",
            spec.name,
            spec.command,
            spec.working_dir.display(),
            self.launcher.strategy()
        );

        let child = self.launcher.launch(spec)?;
        let handle = ProcessHandle::new(&spec.name, child)?;
        let info = handle.info().clone();

        if let Err(mut rejected) = self.state.track(handle).await {
            // A drain began while we were spawning; it will never see this child
            process_warn!(component, "Shutdown began while starting {}, stopping it", spec.name);
            if rejected.kill().await.is_ok() {
                let _ = rejected.wait().await;
            }
            return Err(OrchestratorError::ShutdownInProgress { service: spec.name.clone() });
        }

        process_info!(component, "✅ {} started (PID: {})", info.name, info.pid);
        Ok(info)
    }

    /// Spawn every registry entry in order, waiting each entry's settle delay.
    ///
    /// Stops early when a shutdown is requested.
    pub async fn start_all(&self, registry: &ServiceRegistry) -> StartupReport {
        let component = ComponentId::current();
        let mut report = StartupReport::default();

        for spec in registry.iter() {
            if self.state.is_shutting_down() {
                report.interrupted = true;
                break;
            }

            match self.spawn(spec).await {
                Ok(info) => report.started.push(info),
                Err(OrchestratorError::ShutdownInProgress { .. }) => {
                    report.interrupted = true;
                    break;
                }
                Err(e) => {
                    logging::log_error(component, &format!("Launching {}", spec.name), &e);
                    report.failures.push(SpawnFailure {
                        service: spec.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }

            if !spec.settle_delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(spec.settle_delay) => {}
                    _ = self.state.shutdown_requested() => {
                        report.interrupted = true;
                        break;
                    }
                }
            }
        }

        report
    }

    /// One liveness pass over all tracked handles.
    ///
    /// Returns processes newly observed as exited. Each exit is reported once;
    /// the handle keeps its terminal state afterwards.
    pub async fn monitor_tick(&self) -> Vec<UnexpectedExit> {
        let component = ComponentId::current();
        let mut exits = Vec::new();

        if self.state.is_shutting_down() {
            return exits;
        }

        let mut handles = self.state.handles().await;
        if self.state.is_shutting_down() {
            return exits;
        }
        for handle in handles.iter_mut().filter(|h| h.state().is_running()) {
            match handle.poll() {
                Ok(TerminationState::Terminated(exit)) => {
                    process_warn!(
                        component,
                        "⚠️  {} (PID: {}) has stopped unexpectedly ({})",
                        handle.name(),
                        handle.pid(),
                        exit
                    );
                    exits.push(UnexpectedExit {
                        name: handle.name().to_string(),
                        pid: handle.pid(),
                        exit,
                    });
                }
                Ok(_) => {}
                Err(e) => process_warn!(component, "{}", e),
            }
        }

        exits
    }

    /// Tick `monitor_tick` at the monitor interval until a shutdown begins
    pub async fn monitor_loop(&self) {
        let mut interval = tokio::time::interval(self.monitor_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.monitor_tick().await;
                }
                _ = self.state.shutdown_requested() => break,
            }
        }
    }
}
