//! NetMonit Control - operator CLI for the diagnostic engine

use anyhow::Result;
use clap::Parser;
use netmonitctl::cli::{Cli, Commands};
use netmonitctl::{commands, logging};
use std::io::IsTerminal;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Ask {
            snapshot,
            context,
            json,
            query,
        } => {
            let color = std::io::stdout().is_terminal();
            commands::ask(&config, &snapshot, &query, context.as_deref(), json, color)?
        }
        Commands::Trace { snapshot } => commands::trace(&snapshot)?,
        Commands::Coverage { snapshot, json } => commands::coverage(&snapshot, json)?,
    };

    println!("{}", output);
    Ok(())
}
