//! Test Scenarios
//!
//! Each scenario drives the dev stack from the outside and records its checks
//! in a `TestSummary`. A scenario fails when any check fails.

pub mod automated;
pub mod individual;
pub mod integration;

use std::time::Duration;

use ::orchestrator::{LaunchSpec, ServiceRegistry};

use crate::config::LaunchConfig;
use crate::error::{TesterError, TesterResult};
use crate::testing::TestSummary;

/// Warm-up before the one-shot probes of the `orchestrator` scenario
pub const INTEGRATION_WARMUP: Duration = Duration::from_secs(25);
/// Warm-up before readiness polling in the `automated` scenario
pub const AUTOMATED_WARMUP: Duration = Duration::from_secs(15);

/// Everything a scenario needs to know about the stack under test
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub launch: LaunchConfig,
    pub registry: ServiceRegistry,
    /// Overrides each scenario's default warm-up
    pub warmup: Option<Duration>,
}

impl ScenarioContext {
    pub fn new(launch: LaunchConfig, registry: ServiceRegistry) -> Self {
        Self {
            launch,
            registry,
            warmup: None,
        }
    }

    pub fn with_warmup(mut self, warmup: Option<Duration>) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn warmup_or(&self, default: Duration) -> Duration {
        self.warmup.unwrap_or(default)
    }

    /// The service exposing the backend health contract
    pub fn backend(&self) -> Option<&LaunchSpec> {
        self.registry.iter().find(|spec| is_backend(spec))
    }
}

/// Backends are recognised by a `/health` readiness path
pub fn is_backend(spec: &LaunchSpec) -> bool {
    spec.readiness_url.path().trim_end_matches('/').ends_with("/health")
}

/// Fail when the summary has failures (or no checks at all)
pub fn conclude(summary: &TestSummary) -> TesterResult<()> {
    summary.print();
    if summary.all_passed() {
        Ok(())
    } else {
        Err(TesterError::ChecksFailed {
            failed: summary.failed(),
            total: summary.total(),
        })
    }
}

pub struct TestScenarios {
    context: ScenarioContext,
}

impl TestScenarios {
    pub fn new(context: ScenarioContext) -> Self {
        Self { context }
    }

    /// Run a specific scenario by name
    pub async fn run_scenario(&self, name: &str) -> TesterResult<()> {
        match name {
            "orchestrator" => integration::run(&self.context).await,
            "automated" => automated::run(&self.context).await,
            "individual" => individual::run(&self.context).await,

            // Run all scenarios, standalone services first so ports are free
            "all" => {
                individual::run(&self.context).await?;
                integration::run(&self.context).await?;
                automated::run(&self.context).await
            }

            _ => Err(TesterError::UnknownScenario {
                name: name.to_string(),
                available: Self::available_scenarios().join(", "),
            }),
        }
    }

    /// Get list of available scenarios
    pub fn available_scenarios() -> Vec<&'static str> {
        vec!["orchestrator", "automated", "individual", "all"]
    }
}
