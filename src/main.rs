use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

mod cleanup;
mod cli;
mod commands;
mod context;
mod error;
mod flags;
mod launch;
mod logging;
mod store;
mod volume;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());
    let ctx = context::Context::new(&args.global, log);

    match args.command {
        cli::Command::Categories(opts) => commands::categories::run(&args.global, &opts, &ctx),
        cli::Command::Flags(opts) => commands::flags::run(&args.global, &opts, &ctx),
        cli::Command::Set(opts) => commands::set::run(&args.global, &opts, &ctx),
        cli::Command::Run(opts) => commands::run::run(&args.global, &opts, &ctx),
        cli::Command::Version => {
            let version = option_env!("SAGERUN_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("sagerun {version}");
            Ok(())
        }
    }
}
