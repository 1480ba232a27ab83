//! Binary crate for the `weather` tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration once
//! - The interactive terminal window
//! - One-shot lookups and interactive configuration

use clap::Parser;

mod action;
mod cli;
mod icon;
mod logging;
mod reducer;
mod state;
mod tui;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose, cmd.is_interactive())?;
    cmd.run().await
}
