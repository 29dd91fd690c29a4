//! CLI module
//!
//! Provides the command-line interface for:
//! - serve: load configuration and seed data, then run the HTTP API
//! - check-config: validate and print the resolved configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
