//! Common test utilities and infrastructure
//!
//! Throwaway HTTP servers standing in for the dev stack services.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{serve, ServiceStub, TestHelpers};
