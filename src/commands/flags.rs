//! The `flags` command: list StateFlags activation records.

use anyhow::Result;

use crate::cli::{FlagsOpts, GlobalOpts};
use crate::context::Context;
use crate::flags::{ActivationRecord, MarkerId, reader};

/// Run the flags command.
///
/// Read-only: never prompts, and dry-run changes nothing.
///
/// # Errors
///
/// Returns an error on an invalid `--marker` id or when the store cannot be
/// enumerated.
pub fn run(_global: &GlobalOpts, opts: &FlagsOpts, ctx: &Context) -> Result<()> {
    let records: Vec<ActivationRecord> = match opts.marker {
        Some(id) => {
            let marker = MarkerId::new(id)?;
            reader::read_marker(ctx.store.as_ref(), marker)?
                .into_iter()
                .collect()
        }
        None => reader::read_state_flags(ctx.store.as_ref())?,
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        ctx.log.info("no StateFlags markers defined");
        return Ok(());
    }

    for record in &records {
        ctx.log.stage(&format!("StateFlags{}", record.marker));
        for (category, activation) in &record.categories {
            ctx.log.info(&format!("{category}: {activation}"));
        }
    }
    Ok(())
}
