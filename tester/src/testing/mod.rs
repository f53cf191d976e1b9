//! Testing Framework
//!
//! Check results, summaries and the static registry checks.

pub mod assertions;
pub mod registry;

// Re-export main types
pub use assertions::{AssertionResult, TestSummary};
pub use registry::{check_port_uniqueness, check_service_layout};
