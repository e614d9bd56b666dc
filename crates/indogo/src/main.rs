//! `indogo` - CLI for browsing flights and exporting e-tickets.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::debug;

use indogo::catalog::Listing;
use indogo::cli::{
    BoardingCommand, Cli, Command, ConfigCommand, ExportCommand, ListCommand, TicketCommand,
};
use indogo::ticket::DATE_FORMAT;
use indogo::{boarding, init_logging, pdf, Catalog, Config, Ticket, TicketSettings};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config_path = cli.config_path();

    match cli.command {
        Command::List(cmd) => {
            let (_, catalog) = load(&config_path)?;
            handle_list(&catalog, &cmd)
        }
        Command::Ticket(cmd) => {
            let (config, catalog) = load(&config_path)?;
            handle_ticket(&config, &catalog, &cmd)
        }
        Command::Export(cmd) => {
            let (config, catalog) = load(&config_path)?;
            handle_export(&config, &catalog, &cmd)
        }
        Command::Boarding(cmd) => {
            let (config, _) = load(&config_path)?;
            handle_boarding(&config, &cmd)
        }
        // works even when the active file is broken
        Command::Config(cmd) => handle_config(&config_path, cmd),
    }
}

fn load(config_path: &Path) -> anyhow::Result<(Config, Catalog)> {
    let config =
        Config::load_from(Some(config_path.to_path_buf())).context("loading configuration")?;
    let catalog = Catalog::from_configured(&config.catalog.flights);
    debug!(flights = catalog.len(), "Catalog loaded");
    Ok((config, catalog))
}

fn settings_for(config: &Config, passenger: Option<&str>) -> TicketSettings {
    let mut settings = TicketSettings::from(config);
    if let Some(name) = passenger {
        settings.passenger_name = name.to_string();
    }
    settings
}

fn handle_list(catalog: &Catalog, cmd: &ListCommand) -> anyhow::Result<()> {
    let listings = catalog.sorted(cmd.order());

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    println!("{}", list_header(Local::now().date_naive()));
    println!();
    println!(
        "{:>2}  {:<12} {:<15} {:<15} {:<9} {:>8}",
        "#", "Airline", "Departs", "Arrives", "Duration", "Price"
    );
    println!("{}", "-".repeat(68));
    for listing in &listings {
        print_listing(listing);
    }
    Ok(())
}

fn list_header(date: NaiveDate) -> String {
    format!("Flights for {}", date.format(DATE_FORMAT))
}

fn print_listing(listing: &Listing<'_>) {
    let flight = listing.flight;
    println!(
        "{:>2}  {:<12} {:<15} {:<15} {:<9} {:>8}",
        listing.position,
        flight.airline_name,
        format!("{} {}", flight.departure_code, flight.departure_time),
        format!("{} {}", flight.arrival_code, flight.arrival_time),
        flight.duration,
        format!("INR {}", flight.formatted_price()),
    );
    if flight.has_free_meal {
        println!("    * Free meal");
    }
    if flight.has_promo() {
        println!("    {}", flight.promo_code);
    }
}

fn handle_ticket(config: &Config, catalog: &Catalog, cmd: &TicketCommand) -> anyhow::Result<()> {
    let flight = catalog.select(&cmd.flight)?;
    let ticket = Ticket::issue_today(flight, &settings_for(config, cmd.passenger.as_deref()));

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    } else {
        println!("{ticket}");
    }
    Ok(())
}

fn handle_export(config: &Config, catalog: &Catalog, cmd: &ExportCommand) -> anyhow::Result<()> {
    let flight = catalog.select(&cmd.flight)?;
    let ticket = Ticket::issue_today(flight, &settings_for(config, cmd.passenger.as_deref()));

    let dir = cmd.output.clone().unwrap_or_else(|| config.output_dir());
    let path = pdf::export(&ticket, &dir)
        .with_context(|| format!("downloading ticket for {}", flight.airline_name))?;

    println!("E-Ticket downloaded successfully!");
    println!("Saved to: {}", path.display());
    Ok(())
}

fn handle_boarding(config: &Config, cmd: &BoardingCommand) -> anyhow::Result<()> {
    let time = boarding::boarding_time_with_offset(&cmd.departure, config.boarding.offset_minutes)?;
    println!("{time}");
    Ok(())
}

fn handle_config(config_path: &Path, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(Some(config_path.to_path_buf()))
                .context("loading configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            println!("{}", config_path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = validation_target(file, config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration error in {}", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn validation_target(file: Option<PathBuf>, config_path: &Path) -> PathBuf {
    file.unwrap_or_else(|| config_path.to_path_buf())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Passenger]");
    println!("  Name:               {}", config.passenger.name);
    println!("  Class:              {}", config.passenger.travel_class);
    println!("  Adults:             {}", config.passenger.adults);
    println!();
    println!("[Boarding]");
    println!("  Gate:               {}", config.boarding.gate);
    println!("  Terminal:           {}", config.boarding.terminal);
    println!("  Seat:               {}", config.boarding.seat);
    println!(
        "  Offset (minutes):   {}",
        config.boarding.offset_minutes
    );
    println!();
    println!("[Output]");
    println!("  Directory:          {}", config.output_dir().display());
    println!();
    println!("[Catalog]");
    if config.catalog.flights.is_empty() {
        println!("  Flights:            built-in");
    } else {
        println!("  Flights:            {}", config.catalog.flights.len());
    }
}
