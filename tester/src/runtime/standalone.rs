//! Standalone service driver
//!
//! Runs a single registry entry through the orchestrator library, without
//! the rest of the stack, to show each service starts on its own.

use std::sync::Arc;
use std::time::Duration;

use orchestrator::{
    services::platform_launcher, CommandLauncher, LaunchSpec, ShutdownCoordinator, ShutdownReport, Supervisor,
};
use shared::{process_info, ComponentId};

use crate::error::TesterResult;
use crate::runtime::probe::{ProbeOutcome, ReadinessProbe};

/// Graceful timeout used when draining a standalone service
pub const STANDALONE_GRACEFUL_TIMEOUT: Duration = Duration::from_secs(10);
const STANDALONE_MONITOR_INTERVAL: Duration = Duration::from_secs(1);

/// What happened to one standalone run
#[derive(Debug, Clone)]
pub struct StandaloneRun {
    pub name: String,
    pub probe: ProbeOutcome,
    pub shutdown: Option<ShutdownReport>,
}

impl StandaloneRun {
    /// Became ready and was stopped by the drain
    pub fn passed(&self) -> bool {
        self.probe.ready && self.shutdown.as_ref().is_some_and(|r| r.stopped_count() == 1)
    }
}

pub struct StandaloneService {
    supervisor: Supervisor,
    coordinator: Arc<ShutdownCoordinator>,
}

impl Default for StandaloneService {
    fn default() -> Self {
        Self::new(platform_launcher(), STANDALONE_GRACEFUL_TIMEOUT)
    }
}

impl StandaloneService {
    pub fn new(launcher: Box<dyn CommandLauncher>, graceful_timeout: Duration) -> Self {
        let supervisor = Supervisor::new(launcher, STANDALONE_MONITOR_INTERVAL);
        let coordinator = Arc::new(ShutdownCoordinator::new(supervisor.state(), graceful_timeout));
        Self {
            supervisor,
            coordinator,
        }
    }

    /// Spawn `spec`, probe its readiness URL, then drain it
    pub async fn run(self, spec: &LaunchSpec, probe: &ReadinessProbe) -> TesterResult<StandaloneRun> {
        let component = ComponentId::current();
        process_info!(component, "🧪 Testing {} standalone...", spec.name);

        self.supervisor.spawn(spec).await?;
        let outcome = probe.wait_ready(&spec.name, &spec.readiness_url).await;

        process_info!(component, "🛑 Stopping {}...", spec.name);
        let shutdown = self.coordinator.shutdown().await;

        Ok(StandaloneRun {
            name: spec.name.clone(),
            probe: outcome,
            shutdown,
        })
    }
}
