//! Service-specific tests
//!
//! Each OS-facing service has its own test file. Tests that spawn real
//! processes rely on POSIX `sh` and are Unix-only.

#[cfg(test)]
mod launcher;
#[cfg(all(test, unix))]
mod process_management;

// Common test utilities for services
#[cfg(test)]
pub mod common {
    use std::path::Path;
    use std::time::Duration;
    use url::Url;

    use crate::core::{CommandLine, LaunchSpec};

    /// Upper bound for anything that should finish promptly
    pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

    /// Launch spec for a test command running in `dir`
    pub fn test_spec(name: &str, command: CommandLine, dir: &Path) -> LaunchSpec {
        LaunchSpec::new(name, command, dir, Url::parse("http://127.0.0.1:9/").expect("valid test URL"))
    }
}
