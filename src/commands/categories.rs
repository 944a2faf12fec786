//! The `categories` command: list cleanup categories.

use anyhow::Result;

use crate::cli::{CategoriesOpts, GlobalOpts};
use crate::context::Context;
use crate::flags::{EXCLUDED_CATEGORIES, normalize_token};

/// Run the categories command.
///
/// Read-only: never prompts, and dry-run changes nothing.
///
/// # Errors
///
/// Returns an error when the volume caches path cannot be enumerated.
pub fn run(_global: &GlobalOpts, opts: &CategoriesOpts, ctx: &Context) -> Result<()> {
    let names = ctx.store.categories()?;

    if opts.json {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "token": normalize_token(name),
                    "excluded": EXCLUDED_CATEGORIES.contains(&name.as_str()),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    ctx.log.stage(&format!("{} cleanup categories", names.len()));
    for name in &names {
        if EXCLUDED_CATEGORIES.contains(&name.as_str()) {
            ctx.log.info(&format!("{name} (excluded from automation)"));
        } else {
            ctx.log.info(name);
        }
    }
    Ok(())
}
