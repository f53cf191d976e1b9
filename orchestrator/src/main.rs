//! Main entry point for the orchestrator binary
//!
//! Arms the signal trap, starts every service in registry order, then
//! monitors them until a shutdown drains them all.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use orchestrator::{
    services::{platform_launcher, SignalListener},
    OrchestratorConfig, OrchestratorResult, ServiceRegistry, ShutdownCoordinator, Supervisor,
};
use shared::{logging, process_info, process_warn, ComponentId};

/// Runs the backend, frontend and dashboard together
#[derive(Parser)]
#[command(name = "orchestrator")]
#[command(about = "Starts and supervises the local dev stack")]
pub struct Args {
    /// Directory containing backend/, frontend/ and dashboard/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// JSON service registry replacing the built-in table
    #[arg(long)]
    pub services: Option<PathBuf>,

    /// Interpreter for the dashboard (falls back to DASHBOARD_PYTHON)
    #[arg(long)]
    pub python: Option<String>,

    /// Seconds a service gets to exit after the terminate signal
    #[arg(long, default_value = "5")]
    pub graceful_timeout_secs: u64,

    /// Liveness check interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub monitor_interval_ms: u64,

    /// Replace every post-spawn settle delay (milliseconds)
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// Shut everything down after this many seconds
    #[arg(long)]
    pub max_runtime_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    fn into_config(self) -> OrchestratorConfig {
        OrchestratorConfig::new()
            .with_root(self.root)
            .with_services_file(self.services)
            .with_python(self.python)
            .with_graceful_timeout(Duration::from_secs(self.graceful_timeout_secs))
            .with_monitor_interval(Duration::from_millis(self.monitor_interval_ms.max(1)))
            .with_settle_override(self.settle_ms.map(Duration::from_millis))
            .with_max_runtime(self.max_runtime_secs.map(Duration::from_secs))
    }
}

fn load_registry(config: &OrchestratorConfig) -> OrchestratorResult<ServiceRegistry> {
    let registry = match &config.services_file {
        Some(path) => ServiceRegistry::load(path, &config.root)?,
        None => ServiceRegistry::dev_stack(&config.root, &config.python)?,
    };
    Ok(match config.settle_override {
        Some(delay) => registry.with_uniform_settle_delay(delay),
        None => registry,
    })
}

#[tokio::main]
async fn main() -> OrchestratorResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ComponentId::init_orchestrator();
    logging::init_tracing_with_level(Some(&args.log_level))?;

    let component = ComponentId::current();
    let config = args.into_config();
    let registry = load_registry(&config)?;

    logging::log_startup(component, "dev stack orchestrator");

    let supervisor = Supervisor::new(platform_launcher(), config.monitor_interval);
    let coordinator = Arc::new(ShutdownCoordinator::new(supervisor.state(), config.graceful_timeout));

    // Without the trap there is no way to stop the children cleanly
    let _signals = SignalListener::install(coordinator.clone())?;

    if let Some(max_runtime) = config.max_runtime {
        let coordinator = coordinator.clone();
        tokio::spawn(async move {
            tokio::time::sleep(max_runtime).await;
            logging::log_shutdown(ComponentId::current(), "maximum runtime reached");
            coordinator.shutdown().await;
        });
    }

    let startup = supervisor.start_all(&registry).await;

    if !startup.interrupted {
        if startup.failures.is_empty() {
            logging::log_success(component, "All services started successfully!");
        } else {
            process_warn!(
                component,
                "⚠️  Started {} of {} service(s)",
                startup.started.len(),
                registry.len()
            );
        }

        process_info!(component, "📍 Service URLs:");
        for spec in registry.iter() {
            process_info!(component, "   {}: {}", spec.name, spec.readiness_url);
        }
        process_info!(component, "💡 Press Ctrl+C to stop all services");

        supervisor.monitor_loop().await;
    }

    if let Some(report) = coordinator.completed().await {
        for record in &report.records {
            process_info!(component, "   {} (PID: {}): {}", record.name, record.pid, record.outcome);
        }
    }

    logging::log_success(component, "Orchestrator stopped");
    Ok(())
}
