//! The flight record.
//!
//! A [`Flight`] describes one offer in the catalog: who flies it, between
//! which airports, when, for how much, and any promotion attached to it.

use serde::{Deserialize, Serialize};

/// Background colour used for promotions without a usable colour.
pub const DEFAULT_PROMO_COLOR: &str = "#E8F5E9";

/// An RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Parse a `#RRGGBB` hex string.
    #[must_use]
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Channels scaled to `0.0..=1.0`, as PDF colour operators expect.
    #[must_use]
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// One flight offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Marketing name of the airline.
    pub airline_name: String,
    /// IATA code of the departure airport.
    pub departure_code: String,
    /// Local departure time, `HH:MM` on a 24-hour clock.
    pub departure_time: String,
    /// IATA code of the arrival airport.
    pub arrival_code: String,
    /// Local arrival time, `HH:MM` on a 24-hour clock.
    pub arrival_time: String,
    /// Display duration, e.g. `02h 15m`.
    pub duration: String,
    /// Fare in whole rupees.
    pub price: u32,
    /// Whether a meal is included in the fare.
    #[serde(default)]
    pub has_free_meal: bool,
    /// Promotion text; empty when there is none.
    #[serde(default)]
    pub promo_code: String,
    /// Background colour of the promotion banner, `#RRGGBB`.
    #[serde(default = "default_promo_color")]
    pub promo_background_color: String,
}

fn default_promo_color() -> String {
    DEFAULT_PROMO_COLOR.to_string()
}

impl Flight {
    /// Whether this flight carries a promotion.
    #[must_use]
    pub fn has_promo(&self) -> bool {
        !self.promo_code.is_empty()
    }

    /// The promotion background colour, falling back to the default when the
    /// stored value does not parse.
    #[must_use]
    pub fn promo_color(&self) -> Rgb {
        Rgb::parse_hex(&self.promo_background_color)
            .or_else(|| Rgb::parse_hex(DEFAULT_PROMO_COLOR))
            .unwrap_or(Rgb {
                r: 0xE8,
                g: 0xF5,
                b: 0xE9,
            })
    }

    /// The fare with Indian digit grouping, e.g. `1,23,456`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format_inr(self.price)
    }

    /// Meal badge text.
    #[must_use]
    pub fn meal_label(&self) -> &'static str {
        if self.has_free_meal {
            "Meal Included"
        } else {
            "No Meal"
        }
    }

    /// Airline name with spaces removed, for file names.
    #[must_use]
    pub fn compact_airline_name(&self) -> String {
        self.airline_name.replace(' ', "")
    }
}

/// Group digits the `en-IN` way: the last three, then pairs.
#[must_use]
pub fn format_inr(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
