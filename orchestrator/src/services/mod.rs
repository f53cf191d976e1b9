//! Real service implementations
//!
//! OS-facing pieces behind the traits in `crate::traits`: spawning strategies,
//! the tokio-backed child process and the signal trap.

pub mod launcher;
pub mod os_process;
pub mod signals;

#[cfg(test)]
mod tests;

pub use launcher::{platform_launcher, ArgvLauncher, ShellLauncher};
pub use os_process::OsChild;
pub use signals::SignalListener;
