//! Test helpers and builder patterns for orchestrator tests
//!
//! `StackBuilder` wires a `Supervisor` to a mock launcher that hands out
//! `FakeChild` processes, plus a `ShutdownCoordinator` over the same state.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use orchestrator::{
    ChildControl, CommandLine, LaunchSpec, LaunchStrategy, MockCommandLauncher, ServiceRegistry, ShutdownCoordinator,
    Supervisor, SupervisorState,
};

use super::fixtures::{Behavior, FakeChild, FakeRemote, TestFixtures};

/// Remotes of every fake the launcher handed out, in launch order
#[derive(Clone, Default)]
pub struct Launched(Arc<Mutex<Vec<(String, FakeRemote)>>>);

impl Launched {
    pub fn names(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn remote(&self, name: &str) -> FakeRemote {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| panic!("{name} was never launched"))
    }
}

/// A supervisor, its coordinator and the fakes behind them
pub struct TestStack {
    pub supervisor: Supervisor,
    pub coordinator: Arc<ShutdownCoordinator>,
    pub launched: Launched,
}

/// Builder for test stacks with sensible defaults
pub struct StackBuilder {
    behaviors: HashMap<String, Behavior>,
    graceful_timeout: Duration,
}

impl StackBuilder {
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            graceful_timeout: TestFixtures::GRACEFUL_TIMEOUT,
        }
    }

    /// Script one service; unscripted services exit on terminate
    pub fn with_behavior(mut self, name: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(name.to_string(), behavior);
        self
    }

    pub fn with_graceful_timeout(mut self, timeout: Duration) -> Self {
        self.graceful_timeout = timeout;
        self
    }

    pub fn build(self) -> TestStack {
        let launched = Launched::default();
        let next_pid = Arc::new(AtomicU32::new(TestFixtures::BASE_PID));

        let mut launcher = MockCommandLauncher::new();
        launcher
            .expect_strategy()
            .return_const(LaunchStrategy::ArgumentVector);
        {
            let launched = launched.clone();
            let behaviors = self.behaviors;
            launcher.expect_launch().returning(move |spec| {
                let behavior = behaviors
                    .get(&spec.name)
                    .copied()
                    .unwrap_or(Behavior::ExitsOnTerminate);
                let pid = next_pid.fetch_add(1, Ordering::SeqCst);
                let (child, remote) = FakeChild::new(pid, behavior);
                launched.0.lock().unwrap().push((spec.name.clone(), remote));
                Ok(Box::new(child) as Box<dyn ChildControl>)
            });
        }

        let supervisor = Supervisor::new(Box::new(launcher), TestFixtures::MONITOR_INTERVAL);
        let coordinator = Arc::new(ShutdownCoordinator::new(supervisor.state(), self.graceful_timeout));

        TestStack {
            supervisor,
            coordinator,
            launched,
        }
    }
}

/// Collects formatted log output for the current thread
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route this thread's events here until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Common test helper functions
pub struct TestHelpers;

impl TestHelpers {
    /// Launch spec with its working directory under `root`
    pub fn spec(root: &Path, name: &str, command: CommandLine) -> LaunchSpec {
        let dir = root.join(name.replace(' ', "_").to_lowercase());
        LaunchSpec::new(name, command, dir, Url::parse("http://127.0.0.1:9/").unwrap())
    }

    /// Registry of `names` running `command`, creating each working directory
    pub fn registry(root: &Path, names: &[&str], command: CommandLine) -> ServiceRegistry {
        let specs = names
            .iter()
            .map(|name| {
                let spec = Self::spec(root, name, command.clone());
                std::fs::create_dir_all(&spec.working_dir).unwrap();
                spec
            })
            .collect();
        ServiceRegistry::new(specs).unwrap()
    }

    /// The dev-stack service names with fake commands
    pub fn dev_registry(root: &Path) -> ServiceRegistry {
        Self::registry(root, &TestFixtures::service_names(), CommandLine::shell("fake"))
    }

    /// Names in spawn order
    pub async fn tracked_names(state: &SupervisorState) -> Vec<String> {
        state.snapshot().await.into_iter().map(|i| i.name).collect()
    }
}
