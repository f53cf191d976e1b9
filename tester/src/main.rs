//! Test runner for the dev stack
//!
//! Runs one scenario against the real services and exits non-zero when any
//! of its checks fail.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use orchestrator::ServiceRegistry;
use shared::{logging, process_error, ComponentId};
use tester::{config::resolve, LaunchConfig, ScenarioContext, TestScenarios, TesterResult};

#[derive(Parser)]
#[command(name = "tester")]
#[command(about = "Integration tests for the dev stack orchestrator")]
struct Args {
    /// Test scenario to run (orchestrator, automated, individual, all)
    #[arg(long, default_value = "automated")]
    scenario: String,

    /// Orchestrator executable (defaults to the one built next to this binary)
    #[arg(long)]
    orchestrator_bin: Option<PathBuf>,

    /// Directory containing backend/, frontend/ and dashboard/
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON service registry, passed through to the orchestrator
    #[arg(long)]
    services: Option<PathBuf>,

    /// Interpreter for the dashboard (falls back to DASHBOARD_PYTHON)
    #[arg(long)]
    python: Option<String>,

    /// Override the scenario's warm-up before probing, in seconds
    #[arg(long)]
    warmup_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn launch_config(&self) -> LaunchConfig {
        let mut builder = LaunchConfig::builder().root(&self.root).log_level(&self.log_level);
        if let Some(ref binary) = self.orchestrator_bin {
            builder = builder.binary(binary);
        }
        if let Some(ref services) = self.services {
            builder = builder.services(resolve(&self.root, services));
        }
        if let Some(ref python) = self.python {
            builder = builder.python(python);
        }
        builder.build()
    }

    fn registry(&self) -> TesterResult<ServiceRegistry> {
        let registry = match &self.services {
            Some(path) => ServiceRegistry::load(&resolve(&self.root, path), &self.root)?,
            None => {
                let python = orchestrator::OrchestratorConfig::new().with_python(self.python.clone()).python;
                ServiceRegistry::dev_stack(&self.root, &python)?
            }
        };
        Ok(registry)
    }
}

async fn run(args: Args) -> TesterResult<()> {
    let context = ScenarioContext::new(args.launch_config(), args.registry()?)
        .with_warmup(args.warmup_secs.map(Duration::from_secs));
    TestScenarios::new(context).run_scenario(&args.scenario).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ComponentId::init_tester();
    if let Err(e) = logging::init_tracing_with_level(Some(&args.log_level)) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let component = ComponentId::current();
    let scenario = args.scenario.clone();
    match run(args).await {
        Ok(()) => {
            logging::log_success(component, &format!("Scenario '{scenario}' passed"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            process_error!(component, "❌ Scenario '{}' failed: {}", scenario, e);
            ExitCode::FAILURE
        }
    }
}
