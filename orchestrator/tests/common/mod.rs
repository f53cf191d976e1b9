//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used across the orchestrator test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::{Behavior, FakeChild, FakeRemote, TestFixtures};
pub use helpers::{Launched, LogCapture, StackBuilder, TestHelpers, TestStack};
