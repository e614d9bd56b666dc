//! `indogo` - Flight listing and boarding-pass export
//!
//! This library provides the flight catalog, the derivations printed on a
//! ticket (boarding time, flight code, airport names), and rendering of
//! tickets as text or PDF.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod boarding;
pub mod catalog;
pub mod cli;
pub mod codes;
pub mod config;
pub mod error;
pub mod flight;
pub mod logging;
pub mod pdf;
pub mod ticket;

pub use boarding::boarding_time;
pub use catalog::{Catalog, PriceOrder, Selector};
pub use codes::{airport_name, flight_code};
pub use config::Config;
pub use error::{Error, Result};
pub use flight::Flight;
pub use logging::init_logging;
pub use ticket::{Ticket, TicketSettings};
