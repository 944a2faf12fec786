//! Command-line interface definition.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the disk-cleanup automation tool.
#[derive(Parser, Debug)]
#[command(
    name = "sagerun",
    about = "Windows disk-cleanup automation: volume cache StateFlags profiles and cleanmgr orchestration",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Skip interactive confirmation prompts
    #[arg(short, long, global = true)]
    pub force: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the cleanup categories known to the OS
    Categories(CategoriesOpts),
    /// List StateFlags activation records across all markers
    Flags(FlagsOpts),
    /// Write a marker profile: enable the selected categories, disable the rest
    Set(SetOpts),
    /// Configure profile 1337 and run the system cleanup utility against it
    Run(RunOpts),
    /// Print version information
    Version,
}

/// Options for the `categories` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CategoriesOpts {
    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `flags` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct FlagsOpts {
    /// Only show the record for this marker id
    #[arg(short, long)]
    pub marker: Option<u32>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Options for the `set` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SetOpts {
    /// Marker id to write (0-9999)
    pub marker: u32,

    /// Category tokens to enable (whitespace-insensitive); everything else
    /// is disabled
    pub selected: Vec<String>,
}

/// Options for the `run` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RunOpts {
    /// Give up waiting for the cleanup utility after this many seconds
    /// (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Emit the result as JSON
    #[arg(long)]
    pub json: bool,
}
