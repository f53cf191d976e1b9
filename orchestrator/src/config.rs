//! Orchestrator configuration and default timings

use std::path::PathBuf;
use std::time::Duration;

/// Interval between monitor ticks
pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_secs(1);

/// How long a child gets to exit after the graceful-terminate signal
pub const DEFAULT_GRACEFUL_TIMEOUT: Duration = Duration::from_secs(5);

/// Warm-up waits after each spawn. Heuristics, not readiness checks.
pub const BACKEND_SETTLE_DELAY: Duration = Duration::from_secs(2);
pub const FRONTEND_SETTLE_DELAY: Duration = Duration::from_secs(2);
pub const DASHBOARD_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Env var consulted for the dashboard interpreter
pub const PYTHON_ENV_VAR: &str = "DASHBOARD_PYTHON";

#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Runtime configuration of the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Directory the registry's working directories are resolved against
    pub root: PathBuf,
    /// Optional JSON registry replacing the built-in service table
    pub services_file: Option<PathBuf>,
    /// Interpreter for the dashboard service
    pub python: String,
    pub monitor_interval: Duration,
    pub graceful_timeout: Duration,
    /// Replaces every service's settle delay when set
    pub settle_override: Option<Duration>,
    /// Shut down on our own after this long
    pub max_runtime: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            services_file: None,
            python: DEFAULT_PYTHON.to_string(),
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            graceful_timeout: DEFAULT_GRACEFUL_TIMEOUT,
            settle_override: None,
            max_runtime: None,
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_services_file(mut self, path: Option<PathBuf>) -> Self {
        self.services_file = path;
        self
    }

    /// Pick the interpreter: explicit value, then `DASHBOARD_PYTHON`, then the platform default
    pub fn with_python(mut self, python: Option<String>) -> Self {
        self.python = python
            .or_else(|| std::env::var(PYTHON_ENV_VAR).ok())
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PYTHON.to_string());
        self
    }

    pub fn with_monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = interval;
        self
    }

    pub fn with_graceful_timeout(mut self, timeout: Duration) -> Self {
        self.graceful_timeout = timeout;
        self
    }

    pub fn with_settle_override(mut self, delay: Option<Duration>) -> Self {
        self.settle_override = delay;
        self
    }

    pub fn with_max_runtime(mut self, runtime: Option<Duration>) -> Self {
        self.max_runtime = runtime;
        self
    }
}
