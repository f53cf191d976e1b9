//! Shared types for the local dev-stack orchestrator
//!
//! Holds what both the orchestrator and the external test harness need:
//! component-aware logging, the shared error type and the backend health
//! contract.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
