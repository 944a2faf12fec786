//! Top-level subcommand orchestration.

pub mod categories;
pub mod flags;
pub mod run;
pub mod set;

use std::io::Write as _;

use anyhow::Result;

/// Ask the user to confirm a destructive action.
///
/// Only mutating commands prompt, and only when neither `--force` nor
/// `--dry-run` is in effect. Anything other than `y`/`yes` declines.
///
/// # Errors
///
/// Returns an error when stdin or stdout is unavailable.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
