//! Launching the external cleanup utility and waiting for it to exit.

use std::process::{Child, Command};
use std::time::{Duration, Instant};

use crate::error::CleanupError;
use crate::flags::MarkerId;

/// Executable name of the Windows disk-cleanup utility.
pub const CLEANMGR: &str = "cleanmgr.exe";

/// How often the orchestrator re-checks whether the utility has exited.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A child process whose liveness can be polled without blocking.
pub trait RunningProcess: Send {
    /// Whether the process is still running. A finished process stays
    /// finished on subsequent calls.
    ///
    /// # Errors
    ///
    /// [`CleanupError::Poll`] when the process state cannot be queried.
    fn is_running(&mut self) -> Result<bool, CleanupError>;
}

impl RunningProcess for Child {
    fn is_running(&mut self) -> Result<bool, CleanupError> {
        match self.try_wait() {
            Ok(Some(_status)) => Ok(false),
            Ok(None) => Ok(true),
            Err(e) => Err(CleanupError::Poll(e)),
        }
    }
}

/// Starts the cleanup utility for a marker profile.
pub trait Launcher: Send + Sync {
    /// Launch the utility referencing `marker`, returning without waiting.
    ///
    /// # Errors
    ///
    /// [`CleanupError::Launch`] when the process fails to start.
    fn launch(&self, marker: MarkerId) -> Result<Box<dyn RunningProcess>, CleanupError>;
}

/// Real launcher for `cleanmgr.exe /sagerun:<marker>`.
///
/// The utility is spawned in a normal visible window (it may show progress
/// or prompt the user) and reads the marker profile from the same registry
/// store this crate writes.
#[derive(Debug, Default)]
pub struct CleanmgrLauncher;

impl CleanmgrLauncher {
    /// Create a launcher for the system cleanup utility.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Absolute path of the utility under the system root.
    fn program() -> String {
        let root = std::env::var("SystemRoot").unwrap_or_else(|_| r"C:\Windows".to_string());
        format!(r"{root}\system32\{CLEANMGR}")
    }
}

impl Launcher for CleanmgrLauncher {
    fn launch(&self, marker: MarkerId) -> Result<Box<dyn RunningProcess>, CleanupError> {
        let program = Self::program();
        let child = Command::new(&program)
            .arg(format!("/sagerun:{marker}"))
            .spawn()
            .map_err(|source| CleanupError::Launch { program, source })?;
        Ok(Box::new(child))
    }
}

/// Poll `process` until it exits, sleeping `interval` between checks.
///
/// With `timeout = None` the wait is unbounded, matching the utility's
/// contract that it eventually terminates (possibly after user
/// interaction). Returns the total time waited.
///
/// # Errors
///
/// [`CleanupError::Timeout`] once `timeout` elapses with the process still
/// running; [`CleanupError::Poll`] if liveness cannot be determined.
pub fn wait_for_exit(
    process: &mut dyn RunningProcess,
    interval: Duration,
    timeout: Option<Duration>,
) -> Result<Duration, CleanupError> {
    let start = Instant::now();
    loop {
        if !process.is_running()? {
            return Ok(start.elapsed());
        }
        if let Some(limit) = timeout
            && start.elapsed() >= limit
        {
            return Err(CleanupError::Timeout {
                waited: start.elapsed(),
            });
        }
        std::thread::sleep(interval);
    }
}
