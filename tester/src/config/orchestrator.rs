//! Orchestrator launch configuration
//!
//! Describes how the tester starts the orchestrator binary and converts that
//! into its command-line arguments.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a stopped orchestrator gets to drain before it is killed
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub binary: PathBuf,
    pub root: PathBuf,
    pub services: Option<PathBuf>,
    pub python: Option<String>,
    pub graceful_timeout: Option<Duration>,
    pub settle: Option<Duration>,
    pub log_level: String,
    pub stop_timeout: Duration,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            root: PathBuf::from("."),
            services: None,
            python: None,
            graceful_timeout: None,
            settle: None,
            log_level: "info".to_string(),
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }
}

impl LaunchConfig {
    /// Create a new builder
    pub fn builder() -> crate::config::builder::LaunchConfigBuilder {
        crate::config::builder::LaunchConfigBuilder::new()
    }

    /// Convert to orchestrator command-line arguments
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec!["--root".to_string(), self.root.display().to_string()];

        if let Some(ref services) = self.services {
            args.push("--services".to_string());
            args.push(services.display().to_string());
        }

        if let Some(ref python) = self.python {
            args.push("--python".to_string());
            args.push(python.clone());
        }

        if let Some(timeout) = self.graceful_timeout {
            args.push("--graceful-timeout-secs".to_string());
            args.push(timeout.as_secs().to_string());
        }

        if let Some(settle) = self.settle {
            args.push("--settle-ms".to_string());
            args.push(settle.as_millis().to_string());
        }

        args.push("--log-level".to_string());
        args.push(self.log_level.clone());

        args
    }
}

/// The orchestrator binary built alongside this one, or `orchestrator` on PATH
pub fn default_binary() -> PathBuf {
    let name = format!("orchestrator{}", std::env::consts::EXE_SUFFIX);
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(&name)))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(name))
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
