//! HTTP readiness probe
//!
//! Polls a URL until it answers with a success status or a deadline passes.
//! Connection errors, request timeouts and non-success statuses all mean
//! "not yet ready"; only the deadline is a failure.

use reqwest::StatusCode;
use std::time::{Duration, Instant};
use url::Url;

use crate::error::{TesterError, TesterResult};
use shared::{process_debug, process_info, process_warn, ComponentId};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(45);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one `wait_ready` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub ready: bool,
    pub elapsed: Duration,
    pub attempts: u32,
    /// Status of the last HTTP response, if any request got one
    pub last_status: Option<u16>,
}

impl ProbeOutcome {
    /// Turn a not-ready outcome into an error naming the service
    pub fn into_result(self, service: &str) -> TesterResult<Self> {
        if self.ready {
            Ok(self)
        } else {
            Err(TesterError::NotReady {
                service: service.to_string(),
                elapsed: self.elapsed,
                attempts: self.attempts,
            })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadinessProbe {
    client: reqwest::Client,
    interval: Duration,
    deadline: Duration,
    request_timeout: Duration,
}

impl Default for ReadinessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadinessProbe {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            interval: DEFAULT_INTERVAL,
            deadline: DEFAULT_DEADLINE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Pause between attempts
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Total time budget for `wait_ready`
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Timeout applied to each individual request
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn deadline_duration(&self) -> Duration {
        self.deadline
    }

    /// One GET; `Ok(status)` for any HTTP response, `Err` for network failures
    pub async fn check_once(&self, url: &Url) -> Result<StatusCode, reqwest::Error> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.request_timeout)
            .send()
            .await?;
        Ok(response.status())
    }

    /// Poll `url` until it answers with a success status or the deadline passes
    pub async fn wait_ready(&self, name: &str, url: &Url) -> ProbeOutcome {
        let component = ComponentId::current();
        process_info!(component, "⏳ Waiting for {}...", name);

        let started = Instant::now();
        let mut attempts = 0;
        let mut last_status = None;

        loop {
            attempts += 1;
            match self.check_once(url).await {
                Ok(status) if status.is_success() => {
                    let elapsed = started.elapsed();
                    process_info!(component, "✅ {} is ready ({}s)", name, elapsed.as_secs());
                    return ProbeOutcome {
                        ready: true,
                        elapsed,
                        attempts,
                        last_status: Some(status.as_u16()),
                    };
                }
                Ok(status) => {
                    process_debug!(component, "{} answered {} (attempt {})", name, status, attempts);
                    last_status = Some(status.as_u16());
                }
                Err(e) => {
                    process_debug!(component, "{} not reachable yet (attempt {}): {}", name, attempts, e);
                }
            }

            let remaining = self.deadline.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                break;
            }
            tokio::time::sleep(self.interval.min(remaining)).await;
            if started.elapsed() >= self.deadline {
                break;
            }
        }

        let elapsed = started.elapsed();
        process_warn!(component, "❌ {} failed to start within {}s", name, self.deadline.as_secs());
        ProbeOutcome {
            ready: false,
            elapsed,
            attempts,
            last_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let probe = ReadinessProbe::new();
        assert_eq!(probe.interval, DEFAULT_INTERVAL);
        assert_eq!(probe.deadline_duration(), DEFAULT_DEADLINE);
        assert_eq!(probe.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_unreachable_url_is_not_ready_after_deadline() {
        // Port 9 (discard) is closed on test hosts, so every attempt is refused
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let probe = ReadinessProbe::new()
            .interval(Duration::from_millis(20))
            .deadline(Duration::from_millis(200))
            .request_timeout(Duration::from_millis(100));

        let outcome = probe.wait_ready("nothing", &url).await;

        assert!(!outcome.ready);
        assert!(outcome.attempts >= 2);
        assert_eq!(outcome.last_status, None);
        assert!(outcome.elapsed >= Duration::from_millis(200));
        assert!(outcome.elapsed < Duration::from_secs(2));
        assert!(outcome.into_result("nothing").is_err());
    }
}
