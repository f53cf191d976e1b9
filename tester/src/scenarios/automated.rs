//! Automated integration scenario
//!
//! Start the stack, wait for every service to become ready, run the health,
//! accessibility and registry checks, and print a summary. The orchestrator
//! is stopped whatever happens in between.

use shared::{logging, process_info, process_warn, ComponentId};

use super::{conclude, is_backend, ScenarioContext, AUTOMATED_WARMUP};
use crate::error::TesterResult;
use crate::runtime::{db_health_url, HealthClient, OrchestratorProcess, ReadinessProbe};
use crate::testing::{check_port_uniqueness, check_service_layout, AssertionResult, TestSummary};

pub async fn run(context: &ScenarioContext) -> TesterResult<()> {
    let component = ComponentId::current();
    logging::log_startup(component, "automated integration tests");

    let process = OrchestratorProcess::start(&context.launch)?;
    let mut summary = TestSummary::new();

    run_checks(context, &mut summary).await;

    let stopped = process.stop().await?;
    if !stopped.success() {
        process_warn!(component, "⚠️  Orchestrator did not exit cleanly ({:?})", stopped.status);
    }

    conclude(&summary)
}

async fn run_checks(context: &ScenarioContext, summary: &mut TestSummary) {
    let component = ComponentId::current();

    let warmup = context.warmup_or(AUTOMATED_WARMUP);
    logging::log_progress(component, "Warm-up", &format!("waiting {}s for services to initialize", warmup.as_secs()));
    tokio::time::sleep(warmup).await;

    let probe = ReadinessProbe::new();
    let mut all_ready = true;
    for spec in context.registry.iter() {
        logging::log_progress(component, "Readiness", &format!("waiting for {} at {}", spec.name, spec.readiness_url));
        let outcome = probe.wait_ready(&spec.name, &spec.readiness_url).await;
        all_ready &= outcome.ready;
        summary.record(AssertionResult::from_bool(
            format!("{} ready", spec.name),
            outcome.ready,
            format!("{}s, {} attempt(s)", outcome.elapsed.as_secs(), outcome.attempts),
        ));
    }

    if !all_ready {
        process_warn!(component, "❌ Not all services started successfully");
        return;
    }

    process_info!(component, "🔍 Running Integration Tests");
    let client = HealthClient::default();
    for spec in context.registry.iter() {
        if is_backend(spec) {
            summary.record(client.check_backend_health(&spec.readiness_url).await);
            summary.record(client.check_backend_db_health(&db_health_url(&spec.readiness_url)).await);
        } else {
            summary.record(client.check_accessible(&spec.name, &spec.readiness_url).await);
        }
    }

    summary.record(check_service_layout(&context.registry));
    summary.record(check_port_uniqueness(&context.registry));
}
