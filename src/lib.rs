//! Disk-cleanup automation engine.
//!
//! Administrative helpers around the Windows disk-cleanup machinery:
//! enumerate the registry-defined volume cache categories, read and write
//! their `StateFlags` activation markers, and orchestrate `cleanmgr.exe`
//! runs against a saved profile while measuring the free space reclaimed.
//!
//! The public API is organised into four layers:
//!
//! - **[`store`]** — the registry-backed volume cache store behind a trait
//! - **[`flags`]** — marker ids, tri-state activation, reader and writer
//! - **[`cleanup`]** — end-to-end orchestration of one cleanup run
//! - **[`commands`]** — top-level subcommand handling for the CLI

pub mod cleanup;
pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod flags;
pub mod launch;
pub mod logging;
pub mod store;
pub mod volume;
