//! System volume metrics: device id, total size, free space.

use std::path::Path;

use serde::Serialize;
use sysinfo::Disks;

use crate::error::CleanupError;

/// Bytes per gigabyte, for display rounding.
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Point-in-time capacity of the boot/system volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VolumeSnapshot {
    /// Device id, e.g. `C:` on Windows or `/` elsewhere.
    pub device: String,
    /// Total size in bytes.
    pub total: u64,
    /// Free space in bytes at snapshot time.
    pub free: u64,
}

/// Source of system volume snapshots.
///
/// Abstracted so the orchestrator can be tested with canned before/after
/// values instead of real disk state.
pub trait VolumeProbe: Send + Sync {
    /// Snapshot the system volume.
    ///
    /// # Errors
    ///
    /// [`CleanupError::VolumeUnavailable`] when no disk matches the system
    /// mount point.
    fn system_volume(&self) -> Result<VolumeSnapshot, CleanupError>;
}

/// Real probe backed by [`sysinfo::Disks`], refreshed on every call.
#[derive(Debug, Default)]
pub struct SystemVolumeProbe;

impl SystemVolumeProbe {
    /// Create a probe for the current host.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Mount point of the boot/system volume on this host.
    fn system_mount() -> String {
        if cfg!(windows) {
            // SystemDrive is set by the OS; the fallback covers stripped-down
            // environments.
            std::env::var("SystemDrive").map_or_else(|_| r"C:\".to_string(), |d| format!("{d}\\"))
        } else {
            "/".to_string()
        }
    }
}

impl VolumeProbe for SystemVolumeProbe {
    fn system_volume(&self) -> Result<VolumeSnapshot, CleanupError> {
        let mount = Self::system_mount();
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .find(|d| d.mount_point() == Path::new(&mount))
            .map(|d| VolumeSnapshot {
                device: mount.trim_end_matches('\\').to_string(),
                total: d.total_space(),
                free: d.available_space(),
            })
            .ok_or(CleanupError::VolumeUnavailable)
    }
}

/// Format a (possibly negative) byte count as gigabytes with two decimals.
#[must_use]
pub fn format_gb(bytes: i64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let gb = bytes as f64 / GIB;
    format!("{gb:.2}")
}
