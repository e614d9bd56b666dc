//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::catalog::{PriceOrder, Selector};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Order flights by price
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Ticket command arguments.
#[derive(Debug, Args)]
pub struct TicketCommand {
    /// Flight to show: list position (1-based) or airline name
    pub flight: Selector,

    /// Passenger name printed on the ticket
    #[arg(short, long, value_parser = parse_passenger_name)]
    pub passenger: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Flight to export: list position (1-based) or airline name
    pub flight: Selector,

    /// Passenger name printed on the ticket
    #[arg(short, long, value_parser = parse_passenger_name)]
    pub passenger: Option<String>,

    /// Directory to write the PDF into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Boarding time command arguments.
#[derive(Debug, Args)]
pub struct BoardingCommand {
    /// Departure time, HH:MM on a 24-hour clock
    pub departure: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Price sort argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Cheapest first
    LowToHigh,
    /// Most expensive first
    HighToLow,
}

impl From<SortArg> for PriceOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::LowToHigh => Self::LowToHigh,
            SortArg::HighToLow => Self::HighToLow,
        }
    }
}

/// Trim a passenger name given on the command line, rejecting blank ones.
fn parse_passenger_name(value: &str) -> Result<String, String> {
    let name = value.trim();
    if name.is_empty() {
        return Err("passenger name must not be empty".to_string());
    }
    Ok(name.to_string())
}

impl ListCommand {
    /// The requested price order, catalog order when unsorted.
    #[must_use]
    pub fn order(&self) -> PriceOrder {
        self.sort.map(PriceOrder::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_arg_conversion() {
        assert_eq!(PriceOrder::from(SortArg::LowToHigh), PriceOrder::LowToHigh);
        assert_eq!(PriceOrder::from(SortArg::HighToLow), PriceOrder::HighToLow);
    }

    #[test]
    fn test_list_order_default() {
        let cmd = ListCommand {
            sort: None,
            json: false,
        };
        assert_eq!(cmd.order(), PriceOrder::Catalog);

        let cmd = ListCommand {
            sort: Some(SortArg::HighToLow),
            json: false,
        };
        assert_eq!(cmd.order(), PriceOrder::HighToLow);
    }

    #[test]
    fn test_parse_passenger_name() {
        assert_eq!(parse_passenger_name("  Arjun Mehta "), Ok("Arjun Mehta".to_string()));
        assert!(parse_passenger_name("").is_err());
        assert!(parse_passenger_name("   ").is_err());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
