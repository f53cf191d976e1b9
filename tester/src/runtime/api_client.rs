//! HTTP client for the backend health contract
//!
//! `GET /health` must answer 200 with `{"status": "ok"}`; `GET /health/db`
//! must answer 200 with a `state` field even when the database is down.

use std::time::Duration;
use url::Url;

use crate::testing::AssertionResult;
use shared::{DbHealth, HealthStatus};

pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Issues the one-shot health and accessibility checks
#[derive(Clone)]
pub struct HealthClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl Default for HealthClient {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_TIMEOUT)
    }
}

impl HealthClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, reqwest::Error> {
        self.client.get(url.clone()).timeout(self.timeout).send().await
    }

    /// `GET <backend>/health` answers 200 with status "ok"
    pub async fn check_backend_health(&self, health_url: &Url) -> AssertionResult {
        const NAME: &str = "Backend health endpoint";

        let response = match self.get(health_url).await {
            Ok(response) => response,
            Err(e) => return AssertionResult::failure(NAME, e.to_string()),
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AssertionResult::failure(NAME, e.to_string()),
        };
        match HealthStatus::parse(&body) {
            Ok(health) => AssertionResult::from_bool(
                NAME,
                status.is_success() && health.is_ok(),
                format!("Response: status={} ({})", health.status, status),
            ),
            Err(e) => AssertionResult::failure(NAME, format!("Status: {status}, {e}")),
        }
    }

    /// `GET <backend>/health/db` answers 200 with a `state` field
    pub async fn check_backend_db_health(&self, db_health_url: &Url) -> AssertionResult {
        const NAME: &str = "Backend DB health endpoint";

        let response = match self.get(db_health_url).await {
            Ok(response) => response,
            Err(e) => return AssertionResult::failure(NAME, e.to_string()),
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return AssertionResult::failure(NAME, e.to_string()),
        };
        match DbHealth::parse(&body) {
            Ok(db) => AssertionResult::from_bool(NAME, status.is_success(), format!("DB State: {}", db.describe())),
            Err(e) => AssertionResult::failure(NAME, format!("Status: {status}, {e}")),
        }
    }

    /// `GET url` answers 200
    pub async fn check_accessible(&self, name: &str, url: &Url) -> AssertionResult {
        let check = format!("{name} accessibility");
        match self.get(url).await {
            Ok(response) => {
                let status = response.status();
                AssertionResult::from_bool(check, status.is_success(), format!("Status: {}", status.as_u16()))
            }
            Err(e) => AssertionResult::failure(check, e.to_string()),
        }
    }
}

/// Sibling URL of the backend's readiness URL, e.g. `/health` to `/health/db`
pub fn db_health_url(health_url: &Url) -> Url {
    let mut url = health_url.clone();
    let path = format!("{}/db", health_url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}
