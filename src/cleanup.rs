//! End-to-end cleanup orchestration.
//!
//! One run writes the fixed marker profile, launches the cleanup utility
//! against it, waits for the utility to exit, and reports the free-space
//! delta. The run moves through `ProfileWritten → ProcessLaunched → Polling
//! → Completed`; a launch failure is the only modeled fatal transition.

use std::time::Duration;

use serde::Serialize;

use crate::context::Context;
use crate::error::CleanError;
use crate::flags::{MarkerId, writer};
use crate::launch::{self, POLL_INTERVAL};
use crate::volume::{VolumeSnapshot, format_gb};

/// Marker id reserved for orchestrated runs.
pub const RUN_MARKER: u32 = 1337;

/// Categories activated by an orchestrated run: upgrade/setup leftovers.
pub const RUN_SELECTION: [&str; 2] = ["Temporary Setup Files", "Previous Installations"];

/// Tuning knobs for one orchestrated run.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Give up waiting after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Delay between liveness checks.
    pub poll_interval: Duration,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_interval: POLL_INTERVAL,
        }
    }
}

/// Outcome of one orchestrated cleanup run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResult {
    /// Device id of the system volume.
    pub device: String,
    /// Total size of the system volume in bytes.
    pub total: u64,
    /// Free space before the run, in bytes.
    pub free_before: u64,
    /// Free space after the run, in bytes.
    pub free_after: u64,
    /// Space reclaimed in bytes. Negative when space was consumed during
    /// the run; reported as-is, never an error.
    pub reclaimed: i64,
}

impl CleanupResult {
    /// Build a result from before/after snapshots of the same volume.
    #[must_use]
    pub fn from_snapshots(before: &VolumeSnapshot, after_free: u64) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let reclaimed = after_free as i64 - before.free as i64;
        Self {
            device: before.device.clone(),
            total: before.total,
            free_before: before.free,
            free_after: after_free,
            reclaimed,
        }
    }

    /// Reclaimed space formatted as gigabytes with two decimals.
    #[must_use]
    pub fn reclaimed_gb(&self) -> String {
        format_gb(self.reclaimed)
    }
}

/// Run the cleanup end to end.
///
/// Writes marker [`RUN_MARKER`] selecting [`RUN_SELECTION`], launches the
/// cleanup utility referencing that profile, polls until the process exits,
/// and measures the free-space delta. In dry-run mode the intended writes
/// and launch are described and `None` is returned; no registry write and
/// no process launch happen.
///
/// # Errors
///
/// Store and launch errors propagate immediately; a configured timeout
/// yields [`crate::error::CleanupError::Timeout`].
pub fn run_cleanup(ctx: &Context, opts: &CleanupOptions) -> Result<Option<CleanupResult>, CleanError> {
    let marker = MarkerId::new(RUN_MARKER)?;
    let selection: Vec<String> = RUN_SELECTION.iter().map(|s| (*s).to_string()).collect();

    let before = ctx.volumes.system_volume()?;
    ctx.log.info(&format!(
        "system volume {}: {} free of {} bytes",
        before.device, before.free, before.total
    ));

    ctx.log.stage("Writing cleanup profile");
    let writes = writer::plan(ctx.store.as_ref(), marker, &selection)?;
    if ctx.dry_run {
        for write in &writes {
            ctx.log.dry_run(&format!(
                "would set {}\\{} = {}",
                write.category, write.value_name, write.value
            ));
        }
        ctx.log
            .dry_run(&format!("would launch {} /sagerun:{marker}", launch::CLEANMGR));
        return Ok(None);
    }
    writer::apply(ctx.store.as_ref(), &writes)?;
    ctx.log
        .debug(&format!("wrote {} category flags for marker {marker}", writes.len()));

    ctx.log.stage("Running disk cleanup");
    let mut process = ctx.launcher.launch(marker)?;
    let waited = launch::wait_for_exit(process.as_mut(), opts.poll_interval, opts.timeout)?;
    ctx.log
        .debug(&format!("cleanup utility exited after {}s", waited.as_secs()));

    let after = ctx.volumes.system_volume()?;
    let result = CleanupResult::from_snapshots(&before, after.free);
    ctx.log.info(&format!(
        "reclaimed {} bytes ({} GB)",
        result.reclaimed,
        result.reclaimed_gb()
    ));
    Ok(Some(result))
}
