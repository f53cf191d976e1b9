//! Service registry: the static table of services the orchestrator manages

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::config::{BACKEND_SETTLE_DELAY, DASHBOARD_SETTLE_DELAY, FRONTEND_SETTLE_DELAY};
use crate::error::{OrchestratorError, OrchestratorResult};

/// How a service is invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandLine {
    /// Pre-split argument vector, program first
    Argv(Vec<String>),
    /// Free text, e.g. `npm run dev`
    Shell(String),
}

impl CommandLine {
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::Argv(args.into_iter().map(Into::into).collect())
    }

    pub fn shell(line: impl Into<String>) -> Self {
        CommandLine::Shell(line.into())
    }

    /// Split into arguments on whitespace without shell interpretation
    pub fn tokens(&self) -> Vec<String> {
        match self {
            CommandLine::Argv(args) => args.clone(),
            CommandLine::Shell(line) => line.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Flatten into a single line for a shell interpreter
    pub fn flatten(&self) -> String {
        match self {
            CommandLine::Argv(args) => args.join(" "),
            CommandLine::Shell(line) => line.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CommandLine::Argv(args) => args.iter().all(|a| a.trim().is_empty()),
            CommandLine::Shell(line) => line.trim().is_empty(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flatten())
    }
}

/// Static description of how to start one managed service
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSpec {
    pub name: String,
    pub command: CommandLine,
    pub working_dir: PathBuf,
    pub readiness_url: Url,
    /// Fixed warm-up wait after spawning, before the next service starts.
    /// A heuristic, not a readiness check.
    pub settle_delay: Duration,
}

impl LaunchSpec {
    pub fn new(name: impl Into<String>, command: CommandLine, working_dir: impl Into<PathBuf>, readiness_url: Url) -> Self {
        Self {
            name: name.into(),
            command,
            working_dir: working_dir.into(),
            readiness_url,
            settle_delay: Duration::ZERO,
        }
    }

    /// Configure settle delay (fluent API)
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Port of the readiness URL, using the scheme default when omitted
    pub fn port(&self) -> Option<u16> {
        self.readiness_url.port_or_known_default()
    }
}

/// One entry of a JSON registry file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServiceEntry {
    name: String,
    command: CommandLine,
    working_dir: PathBuf,
    readiness_url: Url,
    #[serde(default)]
    settle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegistryFile {
    services: Vec<ServiceEntry>,
}

/// Ordered, name-unique set of launch specs
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    specs: Vec<LaunchSpec>,
}

impl ServiceRegistry {
    /// Build a registry, rejecting duplicate names and empty commands
    pub fn new(specs: Vec<LaunchSpec>) -> OrchestratorResult<Self> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name.as_str()) {
                return Err(OrchestratorError::DuplicateService { name: spec.name.clone() });
            }
            if spec.command.is_empty() {
                return Err(OrchestratorError::InvalidCommand {
                    service: spec.name.clone(),
                    reason: "command is empty".to_string(),
                });
            }
        }
        Ok(Self { specs })
    }

    /// The backend / frontend / dashboard stack, rooted at `root`
    pub fn dev_stack(root: &Path, python: &str) -> OrchestratorResult<Self> {
        Self::new(vec![
            LaunchSpec::new(
                "Backend API",
                CommandLine::shell("npm start"),
                root.join("backend"),
                Url::parse("http://127.0.0.1:4000/health")?,
            )
            .with_settle_delay(BACKEND_SETTLE_DELAY),
            LaunchSpec::new(
                "Frontend UI",
                CommandLine::shell("npm run dev"),
                root.join("frontend"),
                Url::parse("http://127.0.0.1:5173")?,
            )
            .with_settle_delay(FRONTEND_SETTLE_DELAY),
            LaunchSpec::new(
                "Dashboard",
                CommandLine::argv([python, "app.py"]),
                root.join("dashboard"),
                Url::parse("http://127.0.0.1:5000")?,
            )
            .with_settle_delay(DASHBOARD_SETTLE_DELAY),
        ])
    }

    /// Parse a JSON registry; relative working directories resolve against `root`
    pub fn from_json(json: &str, root: &Path) -> OrchestratorResult<Self> {
        let file: RegistryFile = serde_json::from_str(json)?;
        let specs = file
            .services
            .into_iter()
            .map(|entry| {
                let working_dir = if entry.working_dir.is_absolute() {
                    entry.working_dir
                } else {
                    root.join(entry.working_dir)
                };
                LaunchSpec::new(entry.name, entry.command, working_dir, entry.readiness_url)
                    .with_settle_delay(Duration::from_millis(entry.settle_ms))
            })
            .collect();
        Self::new(specs)
    }

    /// Load a JSON registry file from disk
    pub fn load(path: &Path, root: &Path) -> OrchestratorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, root)
    }

    /// Replace every settle delay with `delay`
    pub fn with_uniform_settle_delay(mut self, delay: Duration) -> Self {
        for spec in &mut self.specs {
            spec.settle_delay = delay;
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaunchSpec> {
        self.specs.iter()
    }

    pub fn get(&self, name: &str) -> Option<&LaunchSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
