//! CLI argument definitions using clap
//!
//! Commands:
//! - bootcamp-directory serve [--config <path>] [--seed <dir>]
//! - bootcamp-directory check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bootcamp directory API server
#[derive(Parser, Debug)]
#[command(name = "bootcamp-directory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding bootcamps.json and courses.json to load at startup
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Print the resolved configuration and exit
    CheckConfig {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
