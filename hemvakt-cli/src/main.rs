//! ## hemvakt-cli
//! **Scenario runner for the Hemvakt containers**
//!
//! Drives the monitoring facades from a YAML step list and prints what each
//! step did. Individual step failures end up in the transcript; only
//! configuration, I/O and parse failures end the process with an error.

use clap::Parser;

mod commands;
mod scenario;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli)
}
