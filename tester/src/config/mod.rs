//! Configuration Management
//!
//! How the tester launches the orchestrator.

pub mod builder;
pub mod orchestrator;

// Re-export main types
pub use builder::LaunchConfigBuilder;
pub use self::orchestrator::{default_binary, resolve, LaunchConfig, DEFAULT_STOP_TIMEOUT};
