//! Orchestrator-specific error types

use shared::SharedError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Failed to spawn {service}: {reason}")]
    SpawnFailed { service: String, reason: String },

    #[error("Working directory for {service} does not exist: {}", path.display())]
    WorkingDirectoryMissing { service: String, path: PathBuf },

    #[error("Invalid command for {service}: {reason}")]
    InvalidCommand { service: String, reason: String },

    #[error("Failed to signal {service} (PID: {pid}): {reason}")]
    SignalFailed { service: String, pid: u32, reason: String },

    #[error("Failed to check status of {service} (PID: {pid}): {reason}")]
    StatusCheckFailed { service: String, pid: u32, reason: String },

    #[error("Failed to install signal handler: {reason}")]
    SignalInstallFailed { reason: String },

    #[error("Duplicate service name in registry: {name}")]
    DuplicateService { name: String },

    #[error("Shutdown in progress, not starting {service}")]
    ShutdownInProgress { service: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn spawn(service: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::SpawnFailed {
            service: service.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error belongs to the spawn-failure family, which is
    /// reported but never aborts startup
    pub fn is_spawn_failure(&self) -> bool {
        matches!(
            self,
            Self::SpawnFailed { .. } | Self::WorkingDirectoryMissing { .. } | Self::InvalidCommand { .. }
        )
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
