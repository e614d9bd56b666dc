//! Configuration management for indogo.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::sync::LazyLock;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::boarding::{parse_clock, DEFAULT_OFFSET_MINUTES};
use crate::error::{Error, Result};
use crate::flight::Flight;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default application directory name.
const APP_DIR_NAME: &str = "indogo";

/// Prefix for environment overrides, e.g. `INDOGO_PASSENGER__NAME`.
const ENV_PREFIX: &str = "INDOGO_";

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("static regex"));

static CLOCK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("static regex"));

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `INDOGO_`, nested with `__`)
/// 2. TOML config file at `~/.config/indogo/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Who the ticket is issued to.
    pub passenger: PassengerConfig,
    /// Gate, terminal and seat placeholders plus the boarding offset.
    pub boarding: BoardingConfig,
    /// Where exported tickets go.
    pub output: OutputConfig,
    /// Flight offers.
    pub catalog: CatalogConfig,
}

/// Passenger details printed on tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerConfig {
    /// Passenger name.
    pub name: String,
    /// Cabin class label.
    pub travel_class: String,
    /// Number of adult passengers.
    pub adults: u8,
}

/// Boarding details printed on tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardingConfig {
    /// Departure gate.
    pub gate: String,
    /// Departure terminal.
    pub terminal: String,
    /// Seat number.
    pub seat: String,
    /// Minutes before departure that boarding begins.
    pub offset_minutes: u32,
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for exported PDFs.
    /// Defaults to the user's Downloads directory.
    pub directory: Option<PathBuf>,
}

/// Catalog settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Flights to offer. Empty means the built-in list.
    pub flights: Vec<Flight>,
}

impl Default for PassengerConfig {
    fn default() -> Self {
        Self {
            name: "Shreya Kumar".to_string(),
            travel_class: "Economy".to_string(),
            adults: 1,
        }
    }
}

impl Default for BoardingConfig {
    fn default() -> Self {
        Self {
            gate: "A5".to_string(),
            terminal: "T2".to_string(),
            seat: "A5".to_string(),
            offset_minutes: DEFAULT_OFFSET_MINUTES,
        }
    }
}

impl Config {
    /// Load configuration from all default sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default export directory.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the export directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .directory
            .clone()
            .unwrap_or_else(Self::default_output_dir)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.passenger.name.trim().is_empty() {
            return Err(Error::validation("passenger.name must not be empty"));
        }

        if self.passenger.adults == 0 {
            return Err(Error::validation("passenger.adults must be at least 1"));
        }

        let offset = self.boarding.offset_minutes;
        if offset == 0 || offset >= 24 * 60 {
            return Err(Error::validation(format!(
                "boarding.offset_minutes ({offset}) must be between 1 and 1439"
            )));
        }

        for (i, flight) in self.catalog.flights.iter().enumerate() {
            validate_flight(i + 1, flight)?;
        }

        Ok(())
    }
}

fn validate_flight(position: usize, flight: &Flight) -> Result<()> {
    let label = format!("catalog flight {position} ({})", flight.airline_name);

    if flight.airline_name.trim().is_empty() {
        return Err(Error::validation(format!("{label}: airline_name is empty")));
    }

    for code in [&flight.departure_code, &flight.arrival_code] {
        if !AIRPORT_CODE.is_match(code) {
            return Err(Error::validation(format!(
                "{label}: invalid airport code '{code}'"
            )));
        }
    }

    for time in [&flight.departure_time, &flight.arrival_time] {
        if !CLOCK_TIME.is_match(time) || parse_clock(time).is_err() {
            return Err(Error::validation(format!("{label}: invalid time '{time}'")));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_flights;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.passenger.name, "Shreya Kumar");
        assert_eq!(config.passenger.travel_class, "Economy");
        assert_eq!(config.passenger.adults, 1);
        assert!(config.catalog.flights.is_empty());
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_default_boarding_config() {
        let boarding = BoardingConfig::default();

        assert_eq!(boarding.gate, "A5");
        assert_eq!(boarding.terminal, "T2");
        assert_eq!(boarding.seat, "A5");
        assert_eq!(boarding.offset_minutes, 45);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_builtin_flights() {
        let mut config = Config::default();
        config.catalog.flights = builtin_flights();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_passenger() {
        let mut config = Config::default();
        config.passenger.name = "   ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("passenger.name"));
    }

    #[test]
    fn test_validate_zero_adults() {
        let mut config = Config::default();
        config.passenger.adults = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("passenger.adults"));
    }

    #[test]
    fn test_validate_offset_range() {
        let mut config = Config::default();
        config.boarding.offset_minutes = 0;
        assert!(config.validate().is_err());

        config.boarding.offset_minutes = 1440;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("offset_minutes"));

        config.boarding.offset_minutes = 1439;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_airport_code() {
        let mut config = Config::default();
        let mut flight = builtin_flights().remove(0);
        flight.arrival_code = "del".to_string();
        config.catalog.flights = vec![flight];

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid airport code 'del'"));
    }

    #[test]
    fn test_validate_bad_time() {
        let mut config = Config::default();
        let mut flight = builtin_flights().remove(0);
        flight.departure_time = "8:20".to_string();
        config.catalog.flights = vec![flight.clone()];
        assert!(config.validate().is_err());

        flight.departure_time = "29:20".to_string();
        config.catalog.flights = vec![flight];
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid time '29:20'"));
    }

    #[test]
    fn test_output_dir_custom() {
        let mut config = Config::default();
        config.output.directory = Some(PathBuf::from("/tmp/tickets"));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/tickets"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("indogo"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.passenger, PassengerConfig::default());
        assert_eq!(config.boarding, BoardingConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[passenger]
name = "Arjun Mehta"

[boarding]
gate = "B12"
offset_minutes = 60

[output]
directory = "/srv/tickets"

[[catalog.flights]]
airline_name = "GoAir"
departure_code = "DEL"
departure_time = "06:00"
arrival_code = "GOI"
arrival_time = "08:35"
duration = "02h 35m"
price = 4999
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.passenger.name, "Arjun Mehta");
        assert_eq!(config.passenger.travel_class, "Economy");
        assert_eq!(config.boarding.gate, "B12");
        assert_eq!(config.boarding.terminal, "T2");
        assert_eq!(config.boarding.offset_minutes, 60);
        assert_eq!(config.output_dir(), PathBuf::from("/srv/tickets"));
        assert_eq!(config.catalog.flights.len(), 1);
        assert_eq!(config.catalog.flights[0].promo_background_color, "#E8F5E9");
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[boarding]\noffset_minutes = 0\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("offset_minutes"));
        assert!(json.contains("Shreya Kumar"));
    }
}
