//! Tester-specific error types

use orchestrator::OrchestratorError;
use shared::SharedError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TesterError {
    #[error("Failed to start orchestrator: {reason}")]
    OrchestratorStartFailed { reason: String },

    #[error("Orchestrator is not running")]
    OrchestratorNotRunning,

    #[error("Orchestrator did not stop within {timeout:?}")]
    OrchestratorStuck { timeout: Duration },

    #[error("{service} not ready after {elapsed:?} ({attempts} attempts)")]
    NotReady {
        service: String,
        elapsed: Duration,
        attempts: u32,
    },

    #[error("{failed} of {total} check(s) failed")]
    ChecksFailed { failed: usize, total: usize },

    #[error("Unknown test scenario: '{name}'. Available: {available}")]
    UnknownScenario { name: String, available: String },

    #[error("Orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type TesterResult<T> = Result<T, TesterError>;
