//! Shared execution context wiring commands to their external boundaries.

use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::launch::{CleanmgrLauncher, Launcher};
use crate::logging::Logger;
use crate::store::{CacheStore, RegistryStore};
use crate::volume::{SystemVolumeProbe, VolumeProbe};

/// Shared context for command execution.
///
/// Holds the three external boundaries (registry store, volume probe,
/// utility launcher) behind trait objects so tests can substitute fakes,
/// plus the per-call behaviour flags. There is no process-wide mutable
/// state; `force` and `dry_run` are threaded through explicitly.
pub struct Context {
    /// Volume cache configuration store.
    pub store: Arc<dyn CacheStore>,
    /// System volume metrics source.
    pub volumes: Arc<dyn VolumeProbe>,
    /// Cleanup utility launcher.
    pub launcher: Arc<dyn Launcher>,
    /// Logger for output.
    pub log: Arc<Logger>,
    /// Whether to describe changes without applying them.
    pub dry_run: bool,
    /// Whether to bypass interactive confirmation prompts.
    pub force: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("store", &"<dyn CacheStore>")
            .field("volumes", &"<dyn VolumeProbe>")
            .field("launcher", &"<dyn Launcher>")
            .field("dry_run", &self.dry_run)
            .field("force", &self.force)
            .finish()
    }
}

impl Context {
    /// Create a context backed by the real registry, disks and cleanmgr.
    #[must_use]
    pub fn new(global: &GlobalOpts, log: Arc<Logger>) -> Self {
        Self {
            store: Arc::new(RegistryStore::new()),
            volumes: Arc::new(SystemVolumeProbe::new()),
            launcher: Arc::new(CleanmgrLauncher::new()),
            log,
            dry_run: global.dry_run,
            force: global.force,
        }
    }
}

/// Shared factories for command and orchestrator unit tests.
#[cfg(test)]
pub(crate) mod test_helpers {
    use std::sync::Arc;

    use super::Context;
    use crate::error::CleanupError;
    use crate::launch::Launcher;
    use crate::logging::Logger;
    use crate::store::CacheStore;
    use crate::volume::{VolumeProbe, VolumeSnapshot};

    /// A probe that replays a fixed sequence of snapshots.
    #[derive(Debug)]
    pub struct SequenceProbe {
        snapshots: std::sync::Mutex<std::collections::VecDeque<VolumeSnapshot>>,
    }

    impl SequenceProbe {
        /// Replay `snaps` in order; further calls repeat the last one.
        pub fn new(snaps: Vec<VolumeSnapshot>) -> Self {
            Self {
                snapshots: std::sync::Mutex::new(snaps.into()),
            }
        }
    }

    impl VolumeProbe for SequenceProbe {
        fn system_volume(&self) -> Result<VolumeSnapshot, CleanupError> {
            let mut guard = self.snapshots.lock().unwrap_or_else(|e| e.into_inner());
            if guard.len() > 1 {
                guard.pop_front().ok_or(CleanupError::VolumeUnavailable)
            } else {
                guard.front().cloned().ok_or(CleanupError::VolumeUnavailable)
            }
        }
    }

    /// Build a snapshot of the canonical test volume with the given free
    /// space.
    pub fn snapshot(free: u64) -> VolumeSnapshot {
        VolumeSnapshot {
            device: "C:".to_string(),
            total: 500_000_000_000,
            free,
        }
    }

    /// Build a context from explicit fakes.
    pub fn make_context(
        store: Arc<dyn CacheStore>,
        volumes: Arc<dyn VolumeProbe>,
        launcher: Arc<dyn Launcher>,
        dry_run: bool,
    ) -> Context {
        Context {
            store,
            volumes,
            launcher,
            log: Arc::new(Logger::new()),
            dry_run,
            force: true,
        }
    }
}
