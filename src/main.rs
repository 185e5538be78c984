//! Lorebook - story lorebook and prompt compiler
//!
//! Usage:
//!   lorebook init                                  Create ./lorebook.json
//!   lorebook entry add Mira --detail "Eye Color=green"
//!   lorebook story add-chapter
//!   lorebook story add-scene --chapter 1 --summary "Mira enters the forest."
//!   lorebook prompt write --chapter 1 --scene 1   Print the writing prompt
//!   lorebook --help                                Show all commands

use anyhow::Result;
use clap::Parser;

use lorebook::cli::output::OutputMode;
use lorebook::cli::Cli;
use lorebook::init::AppContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr so prompts on stdout stay clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lorebook=warn".parse()?),
        )
        .init();

    if lorebook::cli::execute_standalone(&cli)? {
        return Ok(());
    }

    let mode = OutputMode::from_flags(cli.json, cli.md);
    let mut ctx = AppContext::open(cli.project.clone())?;
    lorebook::cli::execute(&cli.command, &mut ctx, mode)?;

    Ok(())
}
