//! Command line arguments.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Track funds and print their estimated valuations.
#[derive(Parser, Debug)]
#[command(name = "fundgz", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (can also be set via FUNDGZ_CONFIG env var)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Code store path, overriding the configured one
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add funds interactively until cancelled
    Add,
    /// Pick a tracked fund and remove it
    Delete,
    /// Print the tracked funds
    List,
    /// Fetch and print the valuation of every tracked fund
    Run {
        /// Maximum requests in flight (defaults to the configured value)
        #[arg(long)]
        concurrency: Option<usize>,
    },
}
