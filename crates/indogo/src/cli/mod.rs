//! Command-line interface for indogo.
//!
//! This module provides the CLI structure for the `indogo` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BoardingCommand, ConfigCommand, ExportCommand, ListCommand, SortArg, TicketCommand,
};

use crate::config::Config;
use crate::logging::Verbosity;

/// indogo - Browse flights and download e-tickets
///
/// Lists the available flights, shows a boarding pass for the one you pick,
/// and saves it as a PDF.
#[derive(Debug, Parser)]
#[command(name = "indogo")]
#[command(version, about, long_about = None)]
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
    /// List available flights
    List(ListCommand),

    /// Show the boarding pass for a flight
    Ticket(TicketCommand),

    /// Save the boarding pass for a flight as a PDF
    Export(ExportCommand),

    /// Compute the boarding time for a departure time
    Boarding(BoardingCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// The configuration file in effect: `--config`, else the default path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
