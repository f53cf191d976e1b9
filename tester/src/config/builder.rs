//! Launch configuration builder

use super::LaunchConfig;
use std::path::PathBuf;
use std::time::Duration;

pub struct LaunchConfigBuilder {
    config: LaunchConfig,
}

impl LaunchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LaunchConfig::default(),
        }
    }

    /// Set the orchestrator executable
    pub fn binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.config.binary = binary.into();
        self
    }

    /// Set the services root directory
    pub fn root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.config.root = root.into();
        self
    }

    /// Use a JSON registry instead of the built-in table
    pub fn services<P: Into<PathBuf>>(mut self, services: P) -> Self {
        self.config.services = Some(services.into());
        self
    }

    /// Set the dashboard interpreter
    pub fn python<S: Into<String>>(mut self, python: S) -> Self {
        self.config.python = Some(python.into());
        self
    }

    pub fn graceful_timeout(mut self, timeout: Duration) -> Self {
        self.config.graceful_timeout = Some(timeout);
        self
    }

    /// Override every settle delay
    pub fn settle(mut self, settle: Duration) -> Self {
        self.config.settle = Some(settle);
        self
    }

    /// Set log level (trace, debug, info, warn, error)
    pub fn log_level<S: Into<String>>(mut self, level: S) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Set how long `stop` waits before killing the orchestrator
    pub fn stop_timeout(mut self, timeout: Duration) -> Self {
        self.config.stop_timeout = timeout;
        self
    }

    pub fn build(self) -> LaunchConfig {
        self.config
    }
}

impl Default for LaunchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
