//! Orchestrator integration scenario
//!
//! Start the whole stack, give it time to warm up, probe every service once,
//! then interrupt the orchestrator and expect a clean exit.

use std::time::Duration;

use shared::{logging, ComponentId};

use super::{conclude, INTEGRATION_WARMUP, ScenarioContext};
use crate::error::TesterResult;
use crate::runtime::{OrchestratorProcess, ReadinessProbe};
use crate::testing::{AssertionResult, TestSummary};

const PROBE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn run(context: &ScenarioContext) -> TesterResult<()> {
    let component = ComponentId::current();
    logging::log_startup(component, "orchestrator integration test");

    let mut process = OrchestratorProcess::start(&context.launch)?;
    let warmup = context.warmup_or(INTEGRATION_WARMUP);
    logging::log_progress(component, "Warm-up", &format!("waiting {}s for services to start", warmup.as_secs()));
    tokio::time::sleep(warmup).await;

    let mut summary = TestSummary::new();
    summary.record(AssertionResult::from_bool(
        "Orchestrator running",
        process.is_running(),
        format!("PID: {}", process.pid()),
    ));

    let probe = ReadinessProbe::new().request_timeout(PROBE_REQUEST_TIMEOUT);
    for spec in context.registry.iter() {
        let check = format!("{} responding", spec.name);
        let result = match probe.check_once(&spec.readiness_url).await {
            Ok(status) => AssertionResult::from_bool(
                check,
                status.is_success(),
                format!("{} (status {})", spec.readiness_url, status.as_u16()),
            ),
            Err(e) => AssertionResult::failure(check, format!("{}: {e}", spec.readiness_url)),
        };
        summary.record(result);
    }

    let stopped = process.stop().await?;
    summary.record(AssertionResult::from_bool(
        "Clean shutdown",
        stopped.success(),
        match stopped.status {
            Some(status) => format!("Exit: {status}"),
            None => "Exit status unavailable".to_string(),
        },
    ));

    conclude(&summary)
}
