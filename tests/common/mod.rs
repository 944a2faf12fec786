// Shared helpers for integration tests.
//
// Provides an in-memory volume cache store and fake launch/volume
// boundaries so each integration test can exercise the engine end to end
// without touching the Windows registry, real disks, or cleanmgr.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sagerun_cli::context::Context;
use sagerun_cli::error::{CleanupError, StoreError};
use sagerun_cli::flags::MarkerId;
use sagerun_cli::launch::{Launcher, RunningProcess};
use sagerun_cli::logging::Logger;
use sagerun_cli::store::CacheStore;
use sagerun_cli::volume::{VolumeProbe, VolumeSnapshot};

/// In-memory [`CacheStore`] seeded with a realistic category set.
#[derive(Debug, Default)]
pub struct MemoryStore {
    keys: Mutex<BTreeMap<String, BTreeMap<String, u32>>>,
}

impl MemoryStore {
    pub fn with_categories(names: &[&str]) -> Self {
        let keys = names
            .iter()
            .map(|n| ((*n).to_string(), BTreeMap::new()))
            .collect();
        Self {
            keys: Mutex::new(keys),
        }
    }

    /// A category set resembling a stock Windows install, deny-listed
    /// entries included.
    pub fn realistic() -> Self {
        Self::with_categories(&[
            "Content Indexer Cleaner",
            "Delivery Optimization Files",
            "Device Driver Packages",
            "Downloaded Program Files",
            "GameNewsFiles",
            "GameStatisticsFiles",
            "GameUpdateFiles",
            "Previous Installations",
            "Recycle Bin",
            "Temporary Files",
            "Temporary Setup Files",
            "Temporary Sync Files",
        ])
    }

    pub fn seed(&self, category: &str, name: &str, data: u32) {
        let mut guard = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), data);
    }

    pub fn get(&self, category: &str, name: &str) -> Option<u32> {
        let guard = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(category).and_then(|v| v.get(name)).copied()
    }

    pub fn value_count(&self) -> usize {
        let guard = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        guard.values().map(BTreeMap::len).sum()
    }
}

impl CacheStore for MemoryStore {
    fn categories(&self) -> Result<Vec<String>, StoreError> {
        let guard = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.keys().cloned().collect())
    }

    fn values(&self, category: &str) -> Result<Vec<(String, u32)>, StoreError> {
        let guard = self.keys.lock().unwrap_or_else(|e| e.into_inner());
        guard.get(category).map_or_else(
            || {
                Err(StoreError::NotFound {
                    path: category.to_string(),
                })
            },
            |values| Ok(values.iter().map(|(k, v)| (k.clone(), *v)).collect()),
        )
    }

    fn set_value(&self, category: &str, name: &str, data: u32) -> Result<(), StoreError> {
        self.seed(category, name, data);
        Ok(())
    }
}

/// A probe replaying fixed before/after snapshots.
#[derive(Debug)]
pub struct SequenceProbe {
    snapshots: Mutex<std::collections::VecDeque<VolumeSnapshot>>,
}

impl SequenceProbe {
    pub fn new(snaps: Vec<VolumeSnapshot>) -> Self {
        Self {
            snapshots: Mutex::new(snaps.into()),
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

pub fn snapshot(free: u64) -> VolumeSnapshot {
    VolumeSnapshot {
        device: "C:".to_string(),
        total: 500_000_000_000,
        free,
    }
}

/// A process that reports running for a fixed number of polls.
#[derive(Debug)]
pub struct FakeProcess {
    pub polls_left: usize,
}

impl RunningProcess for FakeProcess {
    fn is_running(&mut self) -> Result<bool, CleanupError> {
        if self.polls_left == 0 {
            return Ok(false);
        }
        self.polls_left -= 1;
        Ok(true)
    }
}

/// A launcher that hands out [`FakeProcess`]es and counts launches.
#[derive(Debug, Default)]
pub struct FakeLauncher {
    pub polls: usize,
    pub launches: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn launch_count(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, _marker: MarkerId) -> Result<Box<dyn RunningProcess>, CleanupError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeProcess {
            polls_left: self.polls,
        }))
    }
}

/// Build a context from explicit fakes; `force` is always set so that no
/// test ever blocks on a confirmation prompt.
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
