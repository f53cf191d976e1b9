//! Core data model
//!
//! The service registry, process handles and the shared supervisor state.
//! Nothing in here spawns processes or installs signal handlers.

pub mod handle;
pub mod registry;
pub mod state;

pub use handle::{ProcessExit, ProcessHandle, ProcessInfo, TerminationState};
pub use registry::{CommandLine, LaunchSpec, ServiceRegistry};
pub use state::{ShutdownPhase, SupervisorState};
