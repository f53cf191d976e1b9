//! Orchestrator process driver
//!
//! Starts the orchestrator binary as a child of the tester and stops it the
//! way a user would: interrupt, give it time to drain, kill as a last resort.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::{Child, Command};

use crate::config::LaunchConfig;
use crate::error::{TesterError, TesterResult};
use shared::{process_error, process_info, process_warn, ComponentId};

/// How `stop` ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopOutcome {
    /// Exited on its own within the stop timeout
    pub clean: bool,
    pub status: Option<ExitStatus>,
}

impl StopOutcome {
    /// Clean exit with status 0
    pub fn success(&self) -> bool {
        self.clean && self.status.is_some_and(|s| s.success())
    }
}

pub struct OrchestratorProcess {
    child: Child,
    pid: u32,
    stop_timeout: Duration,
}

impl OrchestratorProcess {
    /// Spawn the orchestrator binary with `config`
    pub fn start(config: &LaunchConfig) -> TesterResult<Self> {
        let component = ComponentId::current();
        process_info!(component, "🚀 Starting orchestrator ({})...", config.binary.display());

        let mut command = Command::new(&config.binary);
        command
            .args(config.to_args())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        #[cfg(windows)]
        {
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(CREATE_NEW_PROCESS_GROUP);
        }

        let child = command.spawn().map_err(|e| TesterError::OrchestratorStartFailed {
            reason: format!("{}: {e}", config.binary.display()),
        })?;
        let pid = child.id().ok_or_else(|| TesterError::OrchestratorStartFailed {
            reason: "spawned process has no process id".to_string(),
        })?;

        process_info!(component, "✅ Orchestrator started (PID: {})", pid);
        Ok(Self {
            child,
            pid,
            stop_timeout: config.stop_timeout,
        })
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Non-blocking liveness check
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Deliver the interrupt signal
    #[cfg(unix)]
    pub fn interrupt(&mut self) -> TesterResult<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        kill(Pid::from_raw(self.pid as i32), Signal::SIGINT).map_err(|e| TesterError::Io(e.into()))
    }

    /// Without POSIX signals the only remote stop is a forced one
    #[cfg(not(unix))]
    pub fn interrupt(&mut self) -> TesterResult<()> {
        self.child.start_kill()?;
        Ok(())
    }

    /// Interrupt, wait up to the stop timeout, then kill
    pub async fn stop(mut self) -> TesterResult<StopOutcome> {
        let component = ComponentId::current();
        process_info!(component, "🛑 Stopping orchestrator...");

        if !self.is_running() {
            let status = self.child.wait().await?;
            process_warn!(component, "⚠️  Orchestrator had already exited ({})", status);
            return Ok(StopOutcome {
                clean: false,
                status: Some(status),
            });
        }

        if let Err(e) = self.interrupt() {
            process_error!(component, "❌ Error stopping orchestrator: {}", e);
        }

        match tokio::time::timeout(self.stop_timeout, self.child.wait()).await {
            Ok(status) => {
                let status = status?;
                process_info!(component, "✅ Orchestrator stopped cleanly ({})", status);
                Ok(StopOutcome {
                    clean: true,
                    status: Some(status),
                })
            }
            Err(_elapsed) => {
                process_warn!(component, "⚠️  Orchestrator didn't stop gracefully, killing...");
                self.child.kill().await?;
                let status = self.child.wait().await.ok();
                Ok(StopOutcome { clean: false, status })
            }
        }
    }
}
