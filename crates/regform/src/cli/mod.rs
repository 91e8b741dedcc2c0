//! Command-line interface for regform.
//!
//! This module provides the CLI structure for the `regform` binary.

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, StatusCommand,
};
pub use output::render_records;

/// regform - a small local registration book
///
/// Records names and email addresses in a local database, lists them, and
/// deletes them by id.
#[derive(Debug, Parser)]
#[command(name = "regform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a name and email
    Add(AddCommand),

    /// List all registrations
    List(ListCommand),

    /// Delete a registration by id
    Delete(DeleteCommand),

    /// Show database status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
