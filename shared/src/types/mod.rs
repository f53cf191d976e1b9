//! Core types used throughout the dev stack

pub mod health;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub use health::{DbHealth, HealthStatus};

/// Global component ID singleton - set once at startup
static COMPONENT_ID: OnceLock<ComponentId> = OnceLock::new();

/// Identifier for the binary emitting log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// The orchestrator supervising the service processes
    Orchestrator,
    /// The external test harness driving the orchestrator
    Tester,
}

impl ComponentId {
    /// Initialize the global component ID for the orchestrator
    pub fn init_orchestrator() -> &'static ComponentId {
        COMPONENT_ID.get_or_init(|| ComponentId::Orchestrator)
    }

    /// Initialize the global component ID for the tester
    pub fn init_tester() -> &'static ComponentId {
        COMPONENT_ID.get_or_init(|| ComponentId::Tester)
    }

    /// Get the global component ID.
    ///
    /// Library code running without an explicit init (unit tests, embedding)
    /// reports as the orchestrator.
    pub fn current() -> &'static ComponentId {
        COMPONENT_ID.get_or_init(|| ComponentId::Orchestrator)
    }

    /// Target prefix used when building the log filter
    pub fn crate_target(&self) -> &'static str {
        match self {
            ComponentId::Orchestrator => "orchestrator",
            ComponentId::Tester => "tester",
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Orchestrator => write!(f, "orchestrator"),
            ComponentId::Tester => write!(f, "tester"),
        }
    }
}
