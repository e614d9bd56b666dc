//! The flight catalog: the built-in offers, price ordering and selection.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::flight::Flight;

/// Price ordering for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceOrder {
    /// Keep catalog order.
    #[default]
    Catalog,
    /// Cheapest first.
    LowToHigh,
    /// Most expensive first.
    HighToLow,
}

/// How a user picks a flight: by list position or by airline name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based catalog position.
    Position(usize),
    /// Airline name, matched case-insensitively.
    Airline(String),
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<usize>() {
            Ok(position) => Self::Position(position),
            Err(_) => Self::Airline(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(n) => write!(f, "#{n}"),
            Self::Airline(name) => f.write_str(name),
        }
    }
}

/// A flight together with its 1-based catalog position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Listing<'a> {
    /// Position in catalog order, stable across sorting.
    pub position: usize,
    /// The flight itself.
    pub flight: &'a Flight,
}

/// An ordered collection of flights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    flights: Vec<Flight>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(builtin_flights())
    }
}

impl Catalog {
    /// Wrap a list of flights, keeping their order.
    #[must_use]
    pub fn new(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    /// Use `flights` when non-empty, otherwise the built-in offers.
    #[must_use]
    pub fn from_configured(flights: &[Flight]) -> Self {
        if flights.is_empty() {
            Self::default()
        } else {
            Self::new(flights.to_vec())
        }
    }

    /// All flights in catalog order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of flights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether the catalog has no flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// Flights in the requested price order. Equal prices keep catalog order.
    #[must_use]
    pub fn sorted(&self, order: PriceOrder) -> Vec<Listing<'_>> {
        let mut listings: Vec<Listing<'_>> = self
            .flights
            .iter()
            .enumerate()
            .map(|(i, flight)| Listing {
                position: i + 1,
                flight,
            })
            .collect();

        match order {
            PriceOrder::Catalog => {}
            PriceOrder::LowToHigh => listings.sort_by_key(|l| l.flight.price),
            PriceOrder::HighToLow => {
                listings.sort_by(|a, b| b.flight.price.cmp(&a.flight.price));
            }
        }
        listings
    }

    /// Find the flight a selector refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] when the position is out of range or
    /// no airline name matches.
    pub fn select(&self, selector: &Selector) -> Result<&Flight> {
        let found = match selector {
            Selector::Position(n) => n.checked_sub(1).and_then(|i| self.flights.get(i)),
            Selector::Airline(name) => {
                let wanted = name.to_lowercase();
                self.flights
                    .iter()
                    .find(|f| f.airline_name.to_lowercase() == wanted)
            }
        };

        let flight = found.ok_or_else(|| Error::flight_not_found(selector.to_string()))?;
        debug!(
            airline = %flight.airline_name,
            route = %format!("{}-{}", flight.departure_code, flight.arrival_code),
            "Selected flight"
        );
        Ok(flight)
    }
}

#[allow(clippy::too_many_arguments)]
fn offer(
    airline_name: &str,
    departure_code: &str,
    departure_time: &str,
    arrival_code: &str,
    arrival_time: &str,
    duration: &str,
    price: u32,
    has_free_meal: bool,
    promo_code: &str,
    promo_background_color: &str,
) -> Flight {
    Flight {
        airline_name: airline_name.to_string(),
        departure_code: departure_code.to_string(),
        departure_time: departure_time.to_string(),
        arrival_code: arrival_code.to_string(),
        arrival_time: arrival_time.to_string(),
        duration: duration.to_string(),
        price,
        has_free_meal,
        promo_code: promo_code.to_string(),
        promo_background_color: promo_background_color.to_string(),
    }
}

/// The built-in flight offers.
#[must_use]
pub fn builtin_flights() -> Vec<Flight> {
    vec![
        offer(
            "SpiceJet",
            "BOM",
            "08:20",
            "DEL",
            "10:35",
            "02h 15m",
            5450,
            false,
            "Use Code : SPICE45 and get 45% instant cashback",
            "#FFF3E0",
        ),
        offer(
            "Vistara", "BLR", "16:45", "HYD", "18:00", "01h 15m", 4200, true, "", "#E8F5E9",
        ),
        offer(
            "Air India",
            "MAA",
            "13:30",
            "CCU",
            "16:15",
            "02h 45m",
            6800,
            true,
            "Use Code : AIREXPRESS and get 30% cashback",
            "#E3F2FD",
        ),
        offer(
            "Indigo",
            "GOI",
            "07:15",
            "BOM",
            "08:00",
            "00h 45m",
            3250,
            false,
            "Use Code : 6EFLY and get 25% instant discount",
            "#FCE4EC",
        ),
        offer(
            "Akasa Air",
            "DEL",
            "19:20",
            "BLR",
            "22:05",
            "02h 45m",
            6100,
            true,
            "Use Code : AKASA25 for 25% off",
            "#E8F5E9",
        ),
        offer(
            "AirAsia",
            "HYD",
            "11:10",
            "MAA",
            "12:25",
            "01h 15m",
            3800,
            false,
            "Use Code : ASIABIG and get 35% cashback",
            "#FFF3E0",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prices(listings: &[Listing<'_>]) -> Vec<u32> {
        listings.iter().map(|l| l.flight.price).collect()
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.flights()[0].airline_name, "SpiceJet");
        assert_eq!(catalog.flights()[5].airline_name, "AirAsia");
    }

    #[test]
    fn test_sorted_catalog_order() {
        let catalog = Catalog::default();
        let listings = catalog.sorted(PriceOrder::Catalog);
        assert_eq!(prices(&listings), vec![5450, 4200, 6800, 3250, 6100, 3800]);
        assert_eq!(listings[2].position, 3);
    }

    #[test]
    fn test_sorted_low_to_high() {
        let catalog = Catalog::default();
        let listings = catalog.sorted(PriceOrder::LowToHigh);
        assert_eq!(prices(&listings), vec![3250, 3800, 4200, 5450, 6100, 6800]);
        // Indigo keeps its catalog position
        assert_eq!(listings[0].position, 4);
        assert_eq!(listings[0].flight.airline_name, "Indigo");
    }

    #[test]
    fn test_sorted_high_to_low() {
        let catalog = Catalog::default();
        let listings = catalog.sorted(PriceOrder::HighToLow);
        assert_eq!(prices(&listings), vec![6800, 6100, 5450, 4200, 3800, 3250]);
    }

    #[test]
    fn test_sort_is_stable_and_non_destructive() {
        let mut flights = builtin_flights();
        flights[1].price = 5450;
        let catalog = Catalog::new(flights);

        let asc = catalog.sorted(PriceOrder::LowToHigh);
        let tied: Vec<usize> = asc
            .iter()
            .filter(|l| l.flight.price == 5450)
            .map(|l| l.position)
            .collect();
        assert_eq!(tied, vec![1, 2]);

        let desc = catalog.sorted(PriceOrder::HighToLow);
        let tied: Vec<usize> = desc
            .iter()
            .filter(|l| l.flight.price == 5450)
            .map(|l| l.position)
            .collect();
        assert_eq!(tied, vec![1, 2]);

        assert_eq!(catalog.flights()[0].airline_name, "SpiceJet");
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Position(3));
        assert_eq!(
            " air india ".parse::<Selector>().unwrap(),
            Selector::Airline("air india".to_string())
        );
    }

    #[test]
    fn test_select_by_position() {
        let catalog = Catalog::default();
        let flight = catalog.select(&Selector::Position(2)).unwrap();
        assert_eq!(flight.airline_name, "Vistara");
    }

    #[test]
    fn test_select_by_airline_case_insensitive() {
        let catalog = Catalog::default();
        let flight = catalog
            .select(&Selector::Airline("AKASA AIR".to_string()))
            .unwrap();
        assert_eq!(flight.departure_code, "DEL");
    }

    #[test]
    fn test_select_out_of_range() {
        let catalog = Catalog::default();
        assert!(catalog.select(&Selector::Position(0)).unwrap_err().is_not_found());
        assert!(catalog.select(&Selector::Position(7)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_select_unknown_airline() {
        let catalog = Catalog::default();
        let err = catalog
            .select(&Selector::Airline("Lufthansa".to_string()))
            .unwrap_err();
        assert_eq!(err.to_string(), "no flight matches 'Lufthansa'");
    }

    #[test]
    fn test_from_configured() {
        assert_eq!(Catalog::from_configured(&[]).len(), 6);

        let one = vec![builtin_flights().remove(3)];
        let catalog = Catalog::from_configured(&one);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.flights()[0].airline_name, "Indigo");
    }
}
