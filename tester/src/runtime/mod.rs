//! Runtime Management
//!
//! Process drivers and HTTP probes used while a scenario runs.

pub mod api_client;
pub mod constellation;
pub mod probe;
pub mod standalone;

// Re-export main types
pub use api_client::{db_health_url, HealthClient};
pub use constellation::{OrchestratorProcess, StopOutcome};
pub use probe::{ProbeOutcome, ReadinessProbe};
pub use standalone::{StandaloneRun, StandaloneService};
