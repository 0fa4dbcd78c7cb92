//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// NetMonit operator CLI
#[derive(Debug, Parser)]
#[command(name = "netmonitctl")]
#[command(about = "NetMonit - root-cause analysis over network telemetry snapshots", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/netmonit/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Ask a question about the network
    Ask {
        /// Telemetry snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Machine context kept apart from the question
        #[arg(long)]
        context: Option<String>,

        /// Output JSON only
        #[arg(long)]
        json: bool,

        /// The question
        #[arg(required = true, trailing_var_arg = true)]
        query: Vec<String>,
    },

    /// Print the traced causal chain as JSON
    Trace {
        /// Telemetry snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Show monitoring coverage
    Coverage {
        /// Telemetry snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Output JSON only
        #[arg(long)]
        json: bool,
    },
}
