//! Real OS child process behind the `ChildControl` seam

use async_trait::async_trait;
use std::io;
use std::process::ExitStatus;
use tokio::process::Child;

use crate::core::ProcessExit;
use crate::traits::ChildControl;

/// A child spawned through `tokio::process`
pub struct OsChild {
    child: Child,
    /// Captured at spawn; tokio forgets the id once the child is reaped
    pid: Option<u32>,
}

impl OsChild {
    pub fn new(child: Child) -> Self {
        let pid = child.id();
        Self { child, pid }
    }

    fn require_pid(&self) -> io::Result<u32> {
        self.pid
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "process has no id"))
    }
}

#[cfg(unix)]
fn send_terminate(child: &mut OsChild) -> io::Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = child.require_pid()?;
    let raw = i32::try_from(pid).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    kill(Pid::from_raw(raw), Signal::SIGTERM).map_err(io::Error::from)
}

#[cfg(not(unix))]
fn send_terminate(child: &mut OsChild) -> io::Result<()> {
    // No graceful equivalent for an arbitrary child here
    child.require_pid()?;
    child.child.start_kill()
}

fn to_process_exit(status: ExitStatus) -> ProcessExit {
    #[cfg(unix)]
    let signal = {
        use std::os::unix::process::ExitStatusExt;
        status.signal()
    };
    #[cfg(not(unix))]
    let signal = None;

    ProcessExit {
        code: status.code(),
        signal,
    }
}

#[async_trait]
impl ChildControl for OsChild {
    fn id(&self) -> Option<u32> {
        self.pid
    }

    fn try_wait(&mut self) -> io::Result<Option<ProcessExit>> {
        Ok(self.child.try_wait()?.map(to_process_exit))
    }

    async fn terminate(&mut self) -> io::Result<()> {
        send_terminate(self)
    }

    async fn kill(&mut self) -> io::Result<()> {
        self.child.start_kill()
    }

    async fn wait(&mut self) -> io::Result<ProcessExit> {
        self.child.wait().await.map(to_process_exit)
    }
}
