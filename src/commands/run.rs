//! The `run` command: orchestrated disk cleanup.

use std::time::Duration;

use anyhow::Result;

use crate::cleanup::{self, CleanupOptions};
use crate::cli::{GlobalOpts, RunOpts};
use crate::commands::confirm;
use crate::context::Context;
use crate::volume::format_gb;

/// Run the cleanup command.
///
/// Prompts before configuring and launching the cleanup utility unless
/// `--force`; `--dry-run` describes the profile writes and launch without
/// performing either.
///
/// # Errors
///
/// Returns an error when the profile cannot be written, the utility fails
/// to launch, or a configured timeout elapses.
pub fn run(global: &GlobalOpts, opts: &RunOpts, ctx: &Context) -> Result<()> {
    if !ctx.dry_run
        && !global.force
        && !confirm("configure cleanup profile 1337 and run cleanmgr?")?
    {
        ctx.log.warn("aborted");
        return Ok(());
    }

    let cleanup_opts = CleanupOptions {
        timeout: opts.timeout.map(Duration::from_secs),
        ..CleanupOptions::default()
    };

    let Some(result) = cleanup::run_cleanup(ctx, &cleanup_opts)? else {
        // Dry run: the orchestrator already described the intended actions.
        return Ok(());
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    ctx.log.stage("Cleanup complete");
    ctx.log.info(&format!("volume: {}", result.device));
    ctx.log.info(&format!(
        "free before: {} GB, free after: {} GB",
        format_gb(i64::try_from(result.free_before).unwrap_or(i64::MAX)),
        format_gb(i64::try_from(result.free_after).unwrap_or(i64::MAX)),
    ));
    ctx.log.info(&format!(
        "reclaimed: {} bytes ({} GB)",
        result.reclaimed,
        result.reclaimed_gb()
    ));
    Ok(())
}
