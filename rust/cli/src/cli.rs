//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "handball",
    version,
    about = "Possession-level handball match simulator"
)]
pub struct HandballCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Simulate one match between two rosters
    Sim {
        /// Home roster (JSON)
        #[arg(long)]
        home: String,
        /// Away roster (JSON)
        #[arg(long)]
        away: String,
        #[arg(long)]
        seed: Option<u64>,
        /// Append the outcome as one JSON line to this file
        #[arg(long)]
        output: Option<String>,
        /// Write both rosters back with this match in their season logs
        #[arg(long)]
        update_rosters: bool,
        /// Log engine events to stderr
        #[arg(long, short)]
        verbose: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
    /// Print a sample of the probability stack
    Rng {
        #[arg(long)]
        seed: Option<u64>,
    },
}
