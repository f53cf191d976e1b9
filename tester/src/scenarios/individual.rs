//! Individual service scenario
//!
//! Start each service on its own, without the orchestrator binary, and check
//! it becomes ready and stops cleanly.

use std::time::Duration;

use ::orchestrator::LaunchSpec;
use shared::{logging, ComponentId};

use super::{conclude, is_backend, ScenarioContext};
use crate::error::TesterResult;
use crate::runtime::{ReadinessProbe, StandaloneService};
use crate::testing::{AssertionResult, TestSummary};

const PROBE_INTERVAL: Duration = Duration::from_secs(3);
const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);
const BACKEND_DEADLINE: Duration = Duration::from_secs(15);
/// The frontend dev server compiles on first start
const FRONTEND_DEADLINE: Duration = Duration::from_secs(45);
const FRONTEND_NAME: &str = "Frontend UI";

/// Readiness deadline for one standalone service
pub fn deadline_for(spec: &LaunchSpec) -> Duration {
    if is_backend(spec) {
        BACKEND_DEADLINE
    } else if spec.name == FRONTEND_NAME {
        FRONTEND_DEADLINE
    } else {
        DEFAULT_DEADLINE
    }
}

pub async fn run(context: &ScenarioContext) -> TesterResult<()> {
    let component = ComponentId::current();
    logging::log_startup(component, "individual service tests");

    let mut summary = TestSummary::new();
    for spec in context.registry.iter() {
        let probe = ReadinessProbe::new().interval(PROBE_INTERVAL).deadline(deadline_for(spec));
        let check = format!("{} standalone", spec.name);
        logging::log_progress(component, "Standalone", &format!("starting {} on its own", spec.name));

        let result = match StandaloneService::default().run(spec, &probe).await {
            Ok(run) => AssertionResult::from_bool(
                check,
                run.passed(),
                format!(
                    "ready={} after {}s, drain: {}",
                    run.probe.ready,
                    run.probe.elapsed.as_secs(),
                    run.shutdown
                        .as_ref()
                        .and_then(|r| r.records.first())
                        .map(|r| r.outcome.to_string())
                        .unwrap_or_else(|| "none".to_string())
                ),
            ),
            Err(e) => AssertionResult::failure(check, e.to_string()),
        };
        summary.record(result);
    }

    conclude(&summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::orchestrator::ServiceRegistry;

    #[test]
    fn test_deadlines() {
        let registry = ServiceRegistry::dev_stack(std::path::Path::new("."), "python3").unwrap();
        let deadlines: Vec<_> = registry.iter().map(deadline_for).collect();
        assert_eq!(deadlines, vec![BACKEND_DEADLINE, FRONTEND_DEADLINE, DEFAULT_DEADLINE]);
    }
}
