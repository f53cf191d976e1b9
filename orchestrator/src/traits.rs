//! Trait definitions with mockall annotations for testing
//!
//! These are the two seams of the supervisor: how a `LaunchSpec` becomes a
//! running child (`CommandLauncher`) and how a running child is observed and
//! signalled (`ChildControl`). Both are injected, so the supervisor and the
//! shutdown coordinator can be driven against synthetic processes.

use async_trait::async_trait;
use tokio::process::Command;

use crate::core::{LaunchSpec, ProcessExit};
use crate::error::OrchestratorResult;

/// Which spawning strategy a launcher implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// Arguments are passed straight to the OS; shell strings are tokenized first
    ArgumentVector,
    /// Everything is flattened into one string and run through a shell interpreter
    Shell,
}

impl std::fmt::Display for LaunchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchStrategy::ArgumentVector => write!(f, "argv"),
            LaunchStrategy::Shell => write!(f, "shell"),
        }
    }
}

/// Control surface over one spawned OS process
///
/// Implemented by `OsChild` for real processes and by test doubles.
#[mockall::automock]
#[async_trait]
pub trait ChildControl: Send {
    /// OS process identifier, `None` once the process has been reaped
    fn id(&self) -> Option<u32>;

    /// Non-blocking liveness check; `Some` once the process has exited
    fn try_wait(&mut self) -> std::io::Result<Option<ProcessExit>>;

    /// Ask the process to exit (SIGTERM, or the platform equivalent)
    async fn terminate(&mut self) -> std::io::Result<()>;

    /// Force the process to exit (SIGKILL, or the platform equivalent)
    async fn kill(&mut self) -> std::io::Result<()>;

    /// Wait until the process exits
    async fn wait(&mut self) -> std::io::Result<ProcessExit>;
}

/// Platform-specific strategy for turning a `LaunchSpec` into a child process
#[mockall::automock]
pub trait CommandLauncher: Send + Sync {
    /// Strategy implemented by this launcher
    fn strategy(&self) -> LaunchStrategy;

    /// Build the command without spawning it
    fn build(&self, spec: &LaunchSpec) -> OrchestratorResult<Command>;

    /// Spawn the process described by `spec`
    fn launch(&self, spec: &LaunchSpec) -> OrchestratorResult<Box<dyn ChildControl>>;
}
