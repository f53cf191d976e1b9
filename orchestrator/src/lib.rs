//! Orchestrator library for running the local dev stack
//!
//! Starts the backend, frontend and dashboard as child processes in a fixed
//! order, watches them for unexpected exits, and on interrupt drains them
//! with a graceful-then-forced shutdown bounded by a timeout.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod shutdown;
pub mod supervisor;
pub mod traits;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use crate::core::{
    CommandLine, LaunchSpec, ProcessExit, ProcessHandle, ProcessInfo, ServiceRegistry, ShutdownPhase,
    SupervisorState, TerminationState,
};
pub use error::{OrchestratorError, OrchestratorResult};
pub use shutdown::{DrainOutcome, DrainRecord, ShutdownCoordinator, ShutdownReport};
pub use supervisor::{SpawnFailure, StartupReport, Supervisor, UnexpectedExit};
pub use traits::{ChildControl, CommandLauncher, LaunchStrategy, MockChildControl, MockCommandLauncher};
