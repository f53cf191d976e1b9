//! Tests for the spawning strategies
//!
//! Command construction is checked without spawning anything.

use std::ffi::OsStr;
use std::path::Path;

use super::common::test_spec;
use crate::core::CommandLine;
use crate::error::OrchestratorError;
use crate::services::launcher::{platform_launcher, ArgvLauncher, ShellLauncher};
use crate::traits::{CommandLauncher, LaunchStrategy};

fn program_and_args(cmd: &tokio::process::Command) -> (String, Vec<String>) {
    let std_cmd = cmd.as_std();
    let program = std_cmd.get_program().to_string_lossy().into_owned();
    let args = std_cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    (program, args)
}

/// Free text is tokenized, never passed to a shell
#[test]
fn test_argv_launcher_tokenizes_shell_string() {
    let spec = test_spec("Frontend UI", CommandLine::shell("npm run dev"), Path::new("/srv/frontend"));
    let cmd = ArgvLauncher.build(&spec).unwrap();

    let (program, args) = program_and_args(&cmd);
    assert_eq!(program, "npm");
    assert_eq!(args, vec!["run", "dev"]);
    assert_eq!(cmd.as_std().get_current_dir(), Some(Path::new("/srv/frontend")));
}

/// Argument vectors pass through untouched, spaces included
#[test]
fn test_argv_launcher_keeps_argument_vector() {
    let spec = test_spec(
        "Dashboard",
        CommandLine::argv(["python3", "my app.py"]),
        Path::new("/srv/dashboard"),
    );
    let cmd = ArgvLauncher.build(&spec).unwrap();

    let (program, args) = program_and_args(&cmd);
    assert_eq!(program, "python3");
    assert_eq!(args, vec!["my app.py"]);
}

#[test]
fn test_argv_launcher_rejects_empty_command() {
    let spec = test_spec("empty", CommandLine::argv(Vec::<String>::new()), Path::new("."));
    let result = ArgvLauncher.build(&spec);

    assert!(matches!(result, Err(OrchestratorError::InvalidCommand { .. })));
}

/// Argument vectors are flattened into one line for the shell
#[test]
fn test_shell_launcher_flattens_argument_vector() {
    let launcher = ShellLauncher::new("cmd", "/C");
    let spec = test_spec("Dashboard", CommandLine::argv(["python", "app.py"]), Path::new("dashboard"));
    let cmd = launcher.build(&spec).unwrap();

    let (program, args) = program_and_args(&cmd);
    assert_eq!(program, "cmd");
    assert_eq!(args, vec!["/C", "python app.py"]);
    assert_eq!(launcher.strategy(), LaunchStrategy::Shell);
}

#[test]
fn test_shell_launcher_passes_shell_string_verbatim() {
    let launcher = ShellLauncher::new("sh", "-c");
    let spec = test_spec("Backend API", CommandLine::shell("npm start"), Path::new("backend"));
    let cmd = launcher.build(&spec).unwrap();

    let args: Vec<&OsStr> = cmd.as_std().get_args().collect();
    assert_eq!(args, vec![OsStr::new("-c"), OsStr::new("npm start")]);
}

#[test]
fn test_platform_launcher_strategy() {
    let expected = if cfg!(windows) {
        LaunchStrategy::Shell
    } else {
        LaunchStrategy::ArgumentVector
    };
    assert_eq!(platform_launcher().strategy(), expected);
}

#[tokio::test]
async fn test_missing_executable_is_spawn_failure() {
    let dir = tempfile::tempdir().unwrap();
    let spec = test_spec(
        "ghost",
        CommandLine::argv(["definitely-not-a-real-binary-4f1c"]),
        dir.path(),
    );

    let result = ArgvLauncher.launch(&spec);
    match result {
        Err(OrchestratorError::SpawnFailed { service, reason }) => {
            assert_eq!(service, "ghost");
            assert!(reason.contains("executable not found"), "unexpected reason: {reason}");
        }
        Err(other) => panic!("expected SpawnFailed, got {other}"),
        Ok(_) => panic!("expected spawn to fail"),
    }
}
