//! Test fixtures for tester tests

use std::time::Duration;

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    /// Fast probe settings so readiness tests finish in well under a second
    pub const PROBE_INTERVAL: Duration = Duration::from_millis(25);
    pub const PROBE_DEADLINE: Duration = Duration::from_secs(2);
    pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(500);

    /// Requests answered with 503 before a flaky service comes up
    pub const WARMUP_REQUESTS: u32 = 3;

    pub fn healthy_body() -> serde_json::Value {
        serde_json::json!({ "status": "ok" })
    }

    pub fn db_body() -> serde_json::Value {
        serde_json::json!({ "state": 0, "stateText": "disconnected" })
    }
}
