//! Tickets: a flight plus the passenger and boarding details printed with it.

use std::fmt;

use chrono::{Local, NaiveDate};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::boarding::boarding_time_or_fallback;
use crate::codes::{airport_name, flight_code_with};
use crate::config::Config;
use crate::flight::Flight;

/// `dd MMMM yyyy` with English month names, e.g. `05 March 2026`.
pub const DATE_FORMAT: &str = "%d %B %Y";

/// Passenger and boarding placeholders used when issuing a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSettings {
    /// Passenger name.
    pub passenger_name: String,
    /// Cabin class label.
    pub travel_class: String,
    /// Number of adults travelling.
    pub adults: u8,
    /// Departure gate.
    pub gate: String,
    /// Departure terminal.
    pub terminal: String,
    /// Seat number.
    pub seat: String,
    /// Minutes before departure that boarding begins.
    pub boarding_offset_minutes: u32,
}

impl From<&Config> for TicketSettings {
    fn from(config: &Config) -> Self {
        Self {
            passenger_name: config.passenger.name.clone(),
            travel_class: config.passenger.travel_class.clone(),
            adults: config.passenger.adults,
            gate: config.boarding.gate.clone(),
            terminal: config.boarding.terminal.clone(),
            seat: config.boarding.seat.clone(),
            boarding_offset_minutes: config.boarding.offset_minutes,
        }
    }
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// An issued ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    /// The flight being travelled.
    pub flight: Flight,
    /// Passenger name.
    pub passenger_name: String,
    /// Cabin class label.
    pub travel_class: String,
    /// Number of adults travelling.
    pub adults: u8,
    /// Flight code such as `SG-4821`.
    pub flight_code: String,
    /// Boarding time on a 12-hour clock.
    pub boarding_time: String,
    /// Departure gate.
    pub gate: String,
    /// Departure terminal.
    pub terminal: String,
    /// Seat number.
    pub seat: String,
    /// Date of issue.
    pub issued_on: NaiveDate,
}

impl Ticket {
    /// Issue a ticket for `flight` dated `issued_on`, drawing the flight
    /// number from `rng`.
    pub fn issue<R: Rng + ?Sized>(
        flight: &Flight,
        settings: &TicketSettings,
        issued_on: NaiveDate,
        rng: &mut R,
    ) -> Self {
        let ticket = Self {
            flight: flight.clone(),
            passenger_name: settings.passenger_name.clone(),
            travel_class: settings.travel_class.clone(),
            adults: settings.adults,
            flight_code: flight_code_with(&flight.airline_name, rng),
            boarding_time: boarding_time_or_fallback(
                &flight.departure_time,
                settings.boarding_offset_minutes,
            ),
            gate: settings.gate.clone(),
            terminal: settings.terminal.clone(),
            seat: settings.seat.clone(),
            issued_on,
        };
        debug!(
            flight_code = %ticket.flight_code,
            boarding_time = %ticket.boarding_time,
            "Issued ticket"
        );
        ticket
    }

    /// Issue a ticket dated today using the thread-local RNG.
    #[must_use]
    pub fn issue_today(flight: &Flight, settings: &TicketSettings) -> Self {
        Self::issue(flight, settings, Local::now().date_naive(), &mut rand::rng())
    }

    /// Issue date as `dd MMMM yyyy`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.issued_on.format(DATE_FORMAT).to_string()
    }

    /// Passenger count label, e.g. `01 Adult`.
    #[must_use]
    pub fn passenger_count_label(&self) -> String {
        let noun = if self.adults == 1 { "Adult" } else { "Adults" };
        format!("{:02} {noun}", self.adults)
    }

    /// Display name of the departure airport.
    #[must_use]
    pub fn departure_airport(&self) -> String {
        airport_name(&self.flight.departure_code)
    }

    /// Display name of the arrival airport.
    #[must_use]
    pub fn arrival_airport(&self) -> String {
        airport_name(&self.flight.arrival_code)
    }

    /// Amount paid, with Indian digit grouping.
    #[must_use]
    pub fn total_paid(&self) -> String {
        format!("INR {}", self.flight.formatted_price())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flight = &self.flight;
        let rule = "-".repeat(52);

        writeln!(f, "{}", flight.airline_name)?;
        writeln!(f, "{}", self.formatted_date())?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<6}{:^40}{:>6}",
            flight.departure_code, flight.duration, flight.arrival_code
        )?;
        writeln!(f, "{} -> {}", self.departure_airport(), self.arrival_airport())?;
        writeln!(
            f,
            "Departs {}  Arrives {}",
            flight.departure_time, flight.arrival_time
        )?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{}  |  {}", self.passenger_count_label(), flight.meal_label())?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Passenger Name : {}", self.passenger_name)?;
        writeln!(f, "Flight Type    : {}", self.travel_class)?;
        writeln!(f, "Flight Code    : {}", self.flight_code)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Boarding Time  : {}", self.boarding_time)?;
        writeln!(f, "Gate           : {}", self.gate)?;
        writeln!(f, "Terminal       : {}", self.terminal)?;
        writeln!(f, "Seat Number    : {}", self.seat)?;
        writeln!(f, "{rule}")?;
        write!(f, "Total Paid     : {}", self.total_paid())?;
        if flight.has_promo() {
            write!(f, "\n{}", flight.promo_code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_flights;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn issue(index: usize) -> Ticket {
        let flight = builtin_flights().remove(index);
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        Ticket::issue(
            &flight,
            &TicketSettings::default(),
            date,
            &mut StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn test_issue_uses_defaults() {
        let ticket = issue(0);
        assert_eq!(ticket.passenger_name, "Shreya Kumar");
        assert_eq!(ticket.travel_class, "Economy");
        assert_eq!(ticket.gate, "A5");
        assert_eq!(ticket.terminal, "T2");
        assert_eq!(ticket.seat, "A5");
        assert_eq!(ticket.boarding_time, "07:35 AM");
        assert!(ticket.flight_code.starts_with("SG-"));
    }

    #[test]
    fn test_issue_unknown_airline_code() {
        let ticket = issue(4);
        assert!(ticket.flight_code.starts_with("XX-"));
    }

    #[test]
    fn test_issue_falls_back_on_bad_departure() {
        crate::logging::init_test_logging();
        let mut flight = builtin_flights().remove(1);
        flight.departure_time = "soon".to_string();
        let ticket = Ticket::issue(
            &flight,
            &TicketSettings::default(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(ticket.boarding_time, "08:15 AM");
    }

    #[test]
    fn test_issue_honours_offset() {
        let mut settings = TicketSettings::default();
        settings.boarding_offset_minutes = 30;
        let flight = builtin_flights().remove(1);
        let ticket = Ticket::issue(
            &flight,
            &settings,
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(ticket.boarding_time, "04:15 PM");
    }

    #[test]
    fn test_formatted_date() {
        assert_eq!(issue(0).formatted_date(), "05 March 2026");
    }

    #[test]
    fn test_passenger_count_label() {
        let mut ticket = issue(0);
        assert_eq!(ticket.passenger_count_label(), "01 Adult");
        ticket.adults = 3;
        assert_eq!(ticket.passenger_count_label(), "03 Adults");
    }

    #[test]
    fn test_airports_and_total() {
        let ticket = issue(0);
        assert_eq!(ticket.departure_airport(), "Mumbai Chhatrapati Shivaji Airport");
        assert_eq!(ticket.arrival_airport(), "Delhi International Airport");
        assert_eq!(ticket.total_paid(), "INR 5,450");
    }

    #[test]
    fn test_display_contains_ticket_fields() {
        let ticket = issue(2);
        let text = ticket.to_string();
        assert!(text.starts_with("Air India\n05 March 2026\n"));
        assert!(text.contains("Chennai International Airport -> Kolkata Netaji Subhas Airport"));
        assert!(text.contains("01 Adult  |  Meal Included"));
        assert!(text.contains(&format!("Flight Code    : {}", ticket.flight_code)));
        assert!(text.contains("Boarding Time  : 12:45 PM"));
        assert!(text.contains("Total Paid     : INR 6,800"));
        assert!(text.ends_with("Use Code : AIREXPRESS and get 30% cashback"));
    }

    #[test]
    fn test_display_without_promo() {
        let text = issue(1).to_string();
        assert!(text.ends_with("Total Paid     : INR 4,200"));
        assert!(text.contains("Meal Included"));
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.passenger.name = "Arjun Mehta".to_string();
        config.boarding.seat = "12C".to_string();
        let settings = TicketSettings::from(&config);
        assert_eq!(settings.passenger_name, "Arjun Mehta");
        assert_eq!(settings.seat, "12C");
        assert_eq!(settings.boarding_offset_minutes, 45);
    }

    #[test]
    fn test_serialize_ticket() {
        let json = serde_json::to_string(&issue(3)).unwrap();
        assert!(json.contains("\"airline_name\":\"Indigo\""));
        assert!(json.contains("\"issued_on\":\"2026-03-05\""));
        assert!(json.contains("\"boarding_time\":\"06:30 AM\""));
    }
}
