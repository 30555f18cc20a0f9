//! ## loggate-cli
//! **Command-line front end for the level gate**
//!
//! Sends a single message through the gate using the process configuration,
//! or reports which tiers the configured ceiling lets through.

use clap::Parser;

mod commands;
mod error;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    commands::run_command(Cli::parse())
}
