//! Process handles: one spawned OS process plus its observed termination state

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::ChildControl;

/// Exit status of a finished process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessExit {
    /// Exit code if the process exited normally
    pub code: Option<i32>,
    /// Signal that terminated the process (Unix only)
    pub signal: Option<i32>,
}

impl ProcessExit {
    pub fn code(code: i32) -> Self {
        Self { code: Some(code), signal: None }
    }

    pub fn signaled(signal: i32) -> Self {
        Self { code: None, signal: Some(signal) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {code}"),
            (None, Some(signal)) => write!(f, "signal {signal}"),
            (None, None) => write!(f, "unknown status"),
        }
    }
}

/// Observed lifecycle of a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationState {
    Running,
    /// Exited on its own or after a graceful request
    Terminated(ProcessExit),
    /// Exited after a forced kill
    Killed,
}

impl TerminationState {
    pub fn is_running(&self) -> bool {
        matches!(self, TerminationState::Running)
    }
}

/// Identity of a tracked process, cheap to clone for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub name: String,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
}

/// Handle for a managed process
pub struct ProcessHandle {
    info: ProcessInfo,
    state: TerminationState,
    child: Box<dyn ChildControl>,
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("info", &self.info)
            .field("state", &self.state)
            .finish()
    }
}

impl ProcessHandle {
    /// Wrap a freshly spawned child. Fails if the child has no process identity.
    pub fn new(name: impl Into<String>, child: Box<dyn ChildControl>) -> OrchestratorResult<Self> {
        let name = name.into();
        let pid = child
            .id()
            .ok_or_else(|| OrchestratorError::spawn(&name, "spawned process has no process id"))?;

        Ok(Self {
            info: ProcessInfo {
                name,
                pid,
                started_at: Utc::now(),
            },
            state: TerminationState::Running,
            child,
        })
    }

    pub fn info(&self) -> &ProcessInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn pid(&self) -> u32 {
        self.info.pid
    }

    /// Last observed state, without touching the OS
    pub fn state(&self) -> TerminationState {
        self.state
    }

    /// Refresh the state with a non-blocking liveness check
    pub fn poll(&mut self) -> OrchestratorResult<TerminationState> {
        if self.state.is_running() {
            let exited = self.child.try_wait().map_err(|e| OrchestratorError::StatusCheckFailed {
                service: self.info.name.clone(),
                pid: self.info.pid,
                reason: e.to_string(),
            })?;
            if let Some(exit) = exited {
                self.state = TerminationState::Terminated(exit);
            }
        }
        Ok(self.state)
    }

    pub fn is_running(&mut self) -> OrchestratorResult<bool> {
        Ok(self.poll()?.is_running())
    }

    /// Send the graceful-terminate signal
    pub async fn terminate(&mut self) -> OrchestratorResult<()> {
        self.child.terminate().await.map_err(|e| self.signal_error(e))
    }

    /// Send the forced-kill signal
    pub async fn kill(&mut self) -> OrchestratorResult<()> {
        self.child.kill().await.map_err(|e| self.signal_error(e))?;
        self.state = TerminationState::Killed;
        Ok(())
    }

    /// Wait up to `timeout` for the process to exit; `None` when it is still running
    pub async fn wait_for_exit(&mut self, timeout: Duration) -> OrchestratorResult<Option<ProcessExit>> {
        match tokio::time::timeout(timeout, self.wait()).await {
            Ok(result) => result.map(Some),
            Err(_elapsed) => Ok(None),
        }
    }

    /// Wait for the process to exit
    pub async fn wait(&mut self) -> OrchestratorResult<ProcessExit> {
        let exit = self.child.wait().await.map_err(|e| OrchestratorError::StatusCheckFailed {
            service: self.info.name.clone(),
            pid: self.info.pid,
            reason: e.to_string(),
        })?;
        if self.state.is_running() {
            self.state = TerminationState::Terminated(exit);
        }
        Ok(exit)
    }

    fn signal_error(&self, e: std::io::Error) -> OrchestratorError {
        OrchestratorError::SignalFailed {
            service: self.info.name.clone(),
            pid: self.info.pid,
            reason: e.to_string(),
        }
    }
}
