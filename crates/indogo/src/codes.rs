//! Airport and airline code lookups.

use rand::Rng;

/// Two-letter code used for airlines we don't know.
pub const UNKNOWN_AIRLINE_CODE: &str = "XX";

/// Full display name of an airport, keyed by IATA code.
///
/// Unknown codes render as `"<code> Airport"`.
#[must_use]
pub fn airport_name(code: &str) -> String {
    let name = match code {
        "DEL" => "Delhi International Airport",
        "BLR" => "Bengaluru Airport India",
        "BOM" => "Mumbai Chhatrapati Shivaji Airport",
        "MAA" => "Chennai International Airport",
        "CCU" => "Kolkata Netaji Subhas Airport",
        "HYD" => "Hyderabad Rajiv Gandhi Airport",
        _ => return format!("{code} Airport"),
    };
    name.to_string()
}

/// Two-letter designator for an airline name, matched case-insensitively.
#[must_use]
pub fn airline_code(airline_name: &str) -> &'static str {
    match airline_name.to_lowercase().as_str() {
        "indigo" => "IG",
        "air india" => "AI",
        "spicejet" => "SG",
        "vistara" => "UK",
        "goair" => "G8",
        _ => UNKNOWN_AIRLINE_CODE,
    }
}

/// Generate a flight code such as `SG-4821` using the thread-local RNG.
#[must_use]
pub fn flight_code(airline_name: &str) -> String {
    flight_code_with(airline_name, &mut rand::rng())
}

/// Generate a flight code drawing the flight number from `rng`.
///
/// The number is always four digits, in `1000..=9999`.
pub fn flight_code_with<R: Rng + ?Sized>(airline_name: &str, rng: &mut R) -> String {
    let number: u16 = rng.random_range(1000..=9999);
    format!("{}-{number}", airline_code(airline_name))
}
