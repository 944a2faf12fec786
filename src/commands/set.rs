//! The `set` command: write a marker profile.

use anyhow::Result;

use crate::cli::{GlobalOpts, SetOpts};
use crate::commands::confirm;
use crate::context::Context;
use crate::flags::{MarkerId, writer};

/// Run the set command.
///
/// Plans the full overwrite first so validation errors and the dry-run
/// description both come from the exact writes that would be made. Prompts
/// before writing unless `--force`.
///
/// # Errors
///
/// Returns an error on invalid input (marker range, unknown tokens) or a
/// rejected registry write.
pub fn run(global: &GlobalOpts, opts: &SetOpts, ctx: &Context) -> Result<()> {
    let marker = MarkerId::new(opts.marker)?;
    let writes = writer::plan(ctx.store.as_ref(), marker, &opts.selected)?;

    let enabled = writes.iter().filter(|w| w.enables()).count();
    ctx.log.stage(&format!(
        "StateFlags{marker}: enable {enabled}, disable {} categories",
        writes.len() - enabled
    ));

    if ctx.dry_run {
        for write in &writes {
            ctx.log.dry_run(&format!(
                "would set {}\\{} = {}",
                write.category, write.value_name, write.value
            ));
        }
        return Ok(());
    }

    if !global.force && !confirm(&format!("write {} registry values?", writes.len()))? {
        ctx.log.warn("aborted");
        return Ok(());
    }

    writer::apply(ctx.store.as_ref(), &writes)?;
    for write in &writes {
        ctx.log.debug(&format!(
            "set {}\\{} = {}",
            write.category, write.value_name, write.value
        ));
    }
    ctx.log.info(&format!(
        "{} enabled, {} disabled",
        enabled,
        writes.len() - enabled
    ));
    Ok(())
}
