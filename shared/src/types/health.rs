//! Backend health contract consumed by readiness probes
//!
//! `GET /health` answers `{"status": "ok"}` when the backend is healthy.
//! `GET /health/db` always answers 200 with a `state` field, whether or not
//! the database is connected.

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub const OK: &'static str = "ok";

    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }

    /// Parse a `/health` body
    pub fn parse(body: &str) -> SharedResult<Self> {
        serde_json::from_str(body).map_err(|e| SharedError::ContractViolation {
            message: format!("invalid /health body: {e}"),
        })
    }
}

/// Body of `GET /health/db`
///
/// `state` is whatever the backend's database driver reports (commonly a
/// numeric connection state), so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbHealth {
    pub state: serde_json::Value,
    #[serde(rename = "stateText", default, skip_serializing_if = "Option::is_none")]
    pub state_text: Option<String>,
}

impl DbHealth {
    /// Human-readable state, falling back to "unknown"
    pub fn describe(&self) -> &str {
        self.state_text.as_deref().unwrap_or("unknown")
    }

    /// Parse a `/health/db` body; a body without `state` breaks the contract
    pub fn parse(body: &str) -> SharedResult<Self> {
        serde_json::from_str(body).map_err(|e| SharedError::ContractViolation {
            message: format!("missing state: {e}"),
        })
    }
}
