//! Platform spawning strategies
//!
//! Unix spawns argument vectors directly and tokenizes free-text commands on
//! whitespace, so nothing is re-interpreted by a shell. Windows cannot reliably
//! spawn script shims like `npm` from an argument vector, so there everything
//! is flattened into one line and handed to `cmd /C`.

use std::io;
use std::process::Stdio;
use tokio::process::Command;

use super::os_process::OsChild;
use crate::core::LaunchSpec;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{ChildControl, CommandLauncher, LaunchStrategy};

#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Spawns the command's argument vector directly
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgvLauncher;

/// Runs the flattened command line through a shell interpreter
#[derive(Debug, Clone)]
pub struct ShellLauncher {
    shell: String,
    flag: String,
}

impl ShellLauncher {
    pub fn new(shell: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            flag: flag.into(),
        }
    }

    /// `cmd /C` on Windows, `sh -c` elsewhere
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::new("cmd", "/C")
        } else {
            Self::new("sh", "-c")
        }
    }
}

/// Launcher for the host platform
pub fn platform_launcher() -> Box<dyn CommandLauncher> {
    if cfg!(windows) {
        Box::new(ShellLauncher::platform_default())
    } else {
        Box::new(ArgvLauncher)
    }
}

/// Settings common to both strategies
fn configure(cmd: &mut Command, spec: &LaunchSpec) {
    cmd.current_dir(&spec.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
}

fn spawn_child(spec: &LaunchSpec, mut cmd: Command) -> OrchestratorResult<Box<dyn ChildControl>> {
    let program = cmd.as_std().get_program().to_string_lossy().into_owned();
    let child = cmd.spawn().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => OrchestratorError::spawn(&spec.name, format!("executable not found: {program}")),
        _ => OrchestratorError::spawn(&spec.name, e),
    })?;
    Ok(Box::new(OsChild::new(child)))
}

impl CommandLauncher for ArgvLauncher {
    fn strategy(&self) -> LaunchStrategy {
        LaunchStrategy::ArgumentVector
    }

    fn build(&self, spec: &LaunchSpec) -> OrchestratorResult<Command> {
        let tokens = spec.command.tokens();
        let (program, args) = tokens.split_first().ok_or_else(|| OrchestratorError::InvalidCommand {
            service: spec.name.clone(),
            reason: "command is empty".to_string(),
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        configure(&mut cmd, spec);
        Ok(cmd)
    }

    fn launch(&self, spec: &LaunchSpec) -> OrchestratorResult<Box<dyn ChildControl>> {
        spawn_child(spec, self.build(spec)?)
    }
}

impl CommandLauncher for ShellLauncher {
    fn strategy(&self) -> LaunchStrategy {
        LaunchStrategy::Shell
    }

    fn build(&self, spec: &LaunchSpec) -> OrchestratorResult<Command> {
        if spec.command.is_empty() {
            return Err(OrchestratorError::InvalidCommand {
                service: spec.name.clone(),
                reason: "command is empty".to_string(),
            });
        }

        let mut cmd = Command::new(&self.shell);
        cmd.arg(&self.flag).arg(spec.command.flatten());
        configure(&mut cmd, spec);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);

        Ok(cmd)
    }

    fn launch(&self, spec: &LaunchSpec) -> OrchestratorResult<Box<dyn ChildControl>> {
        spawn_child(spec, self.build(spec)?)
    }
}
