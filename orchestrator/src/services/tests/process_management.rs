//! Tests for OsChild against real processes
//!
//! These verify the process lifecycle plumbing end to end: spawn, liveness,
//! graceful terminate and forced kill.

use std::time::Duration;
use tokio::time::timeout;

use super::common::{test_spec, TEST_TIMEOUT};
use crate::core::{CommandLine, ProcessExit};
use crate::services::launcher::ArgvLauncher;
use crate::traits::{ChildControl, CommandLauncher};

fn launch(argv: &[&str]) -> (tempfile::TempDir, Box<dyn ChildControl>) {
    let dir = tempfile::tempdir().unwrap();
    let spec = test_spec("test", CommandLine::argv(argv.iter().copied()), dir.path());
    let child = ArgvLauncher.launch(&spec).unwrap();
    (dir, child)
}

async fn wait_until_exited(child: &mut Box<dyn ChildControl>) -> ProcessExit {
    timeout(TEST_TIMEOUT, async {
        loop {
            if let Some(exit) = child.try_wait().unwrap() {
                return exit;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("process should exit")
}

/// Test spawning gives a process identity and a running process
#[tokio::test]
async fn test_spawned_child_is_running() {
    let (_dir, mut child) = launch(&["sleep", "30"]);

    assert!(child.id().is_some(), "Spawned child should have a PID");
    assert!(child.try_wait().unwrap().is_none(), "Child should still be running");

    child.kill().await.unwrap();
    child.wait().await.unwrap();
}

/// Test SIGTERM ends a cooperative child
#[tokio::test]
async fn test_terminate_sends_sigterm() {
    let (_dir, mut child) = launch(&["sleep", "30"]);

    child.terminate().await.unwrap();
    let exit = timeout(TEST_TIMEOUT, child.wait()).await.unwrap().unwrap();

    assert_eq!(exit, ProcessExit::signaled(15));
}

/// Test SIGKILL ends a child that ignores SIGTERM
#[tokio::test]
async fn test_kill_ends_child_ignoring_sigterm() {
    let (_dir, mut child) = launch(&["sh", "-c", "trap '' TERM; while true; do sleep 0.1; done"]);
    // Let the shell install its trap
    tokio::time::sleep(Duration::from_millis(200)).await;

    child.terminate().await.unwrap();
    let still_running = timeout(Duration::from_millis(300), child.wait()).await;
    assert!(still_running.is_err(), "Child should ignore SIGTERM");

    child.kill().await.unwrap();
    let exit = timeout(TEST_TIMEOUT, child.wait()).await.unwrap().unwrap();
    assert_eq!(exit, ProcessExit::signaled(9));
}

/// Test exit codes are observed by the non-blocking check
#[tokio::test]
async fn test_try_wait_reports_exit_code() {
    let (_dir, mut child) = launch(&["sh", "-c", "exit 3"]);

    let exit = wait_until_exited(&mut child).await;
    assert_eq!(exit, ProcessExit::code(3));
    assert!(!exit.success());
}

/// Test the PID survives reaping
#[tokio::test]
async fn test_pid_retained_after_exit() {
    let (_dir, mut child) = launch(&["true"]);
    let pid = child.id();

    wait_until_exited(&mut child).await;
    assert_eq!(child.id(), pid);
}
