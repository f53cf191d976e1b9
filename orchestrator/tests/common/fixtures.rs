//! Test fixtures for orchestrator tests
//!
//! `FakeChild` is a scripted stand-in for an OS process. Each fake comes with a
//! `FakeRemote` the test keeps to make the process exit on its own and to
//! inspect which signals it received.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use orchestrator::{ChildControl, ProcessExit};

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    /// Short graceful timeout so forced kills happen quickly
    pub const GRACEFUL_TIMEOUT: Duration = Duration::from_millis(150);
    pub const MONITOR_INTERVAL: Duration = Duration::from_millis(20);
    pub const BASE_PID: u32 = 4000;

    /// The three dev-stack service names, in registry order
    pub fn service_names() -> Vec<&'static str> {
        vec!["Backend API", "Frontend UI", "Dashboard"]
    }
}

/// How a fake process reacts to signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Exits as soon as it is asked to terminate
    ExitsOnTerminate,
    /// Ignores the terminate signal; only a kill stops it
    IgnoresTerminate,
    /// The platform rejects every signal sent to it
    RejectsSignals,
}

#[derive(Debug, Default)]
struct FakeProcess {
    exit: Option<ProcessExit>,
    signals: Vec<&'static str>,
}

/// Test-side handle onto a fake process
#[derive(Debug, Clone, Default)]
pub struct FakeRemote {
    inner: Arc<Mutex<FakeProcess>>,
}

impl FakeRemote {
    /// Make the process exit on its own
    pub fn exit_with(&self, code: i32) {
        self.inner.lock().unwrap().exit = Some(ProcessExit::code(code));
    }

    /// Signals received so far, in order ("terminate" / "kill")
    pub fn signals(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().signals.clone()
    }
}

/// Scripted `ChildControl` implementation
pub struct FakeChild {
    pid: u32,
    behavior: Behavior,
    remote: FakeRemote,
}

impl FakeChild {
    pub fn new(pid: u32, behavior: Behavior) -> (Self, FakeRemote) {
        let remote = FakeRemote::default();
        (
            Self {
                pid,
                behavior,
                remote: remote.clone(),
            },
            remote,
        )
    }

    fn exit(&self) -> Option<ProcessExit> {
        self.remote.inner.lock().unwrap().exit
    }

    fn record(&self, signal: &'static str) -> std::io::Result<()> {
        let mut process = self.remote.inner.lock().unwrap();
        process.signals.push(signal);
        if self.behavior == Behavior::RejectsSignals {
            return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "operation not permitted"));
        }
        match signal {
            "terminate" if self.behavior == Behavior::ExitsOnTerminate => {
                process.exit.get_or_insert(ProcessExit::signaled(15));
            }
            "kill" => {
                process.exit.get_or_insert(ProcessExit::signaled(9));
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl ChildControl for FakeChild {
    fn id(&self) -> Option<u32> {
        Some(self.pid)
    }

    fn try_wait(&mut self) -> std::io::Result<Option<ProcessExit>> {
        Ok(self.exit())
    }

    async fn terminate(&mut self) -> std::io::Result<()> {
        self.record("terminate")
    }

    async fn kill(&mut self) -> std::io::Result<()> {
        self.record("kill")
    }

    async fn wait(&mut self) -> std::io::Result<ProcessExit> {
        loop {
            if let Some(exit) = self.exit() {
                return Ok(exit);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}
