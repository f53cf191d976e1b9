//! Dev stack test harness
//!
//! Drives the orchestrator from the outside: starts it as a child process,
//! polls the services over HTTP, checks the backend health contract, and
//! stops it with an interrupt the way a user would.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tester::*;
//!
//! # async fn demo() -> TesterResult<()> {
//! let launch = LaunchConfig::builder().root("/path/to/stack").build();
//! let process = OrchestratorProcess::start(&launch)?;
//!
//! let url = url::Url::parse("http://127.0.0.1:4000/health").unwrap();
//! let outcome = ReadinessProbe::new().wait_ready("Backend API", &url).await;
//! assert!(outcome.ready);
//!
//! assert!(process.stop().await?.success());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod runtime;
pub mod scenarios;
pub mod testing;

// Main interfaces - re-exported at crate root for convenience
pub use config::{LaunchConfig, LaunchConfigBuilder};
pub use error::{TesterError, TesterResult};
pub use runtime::{OrchestratorProcess, ProbeOutcome, ReadinessProbe, StopOutcome};

// Supporting types
pub use runtime::{HealthClient, StandaloneRun, StandaloneService};
pub use scenarios::{ScenarioContext, TestScenarios};
pub use testing::{check_port_uniqueness, check_service_layout, AssertionResult, TestSummary};
