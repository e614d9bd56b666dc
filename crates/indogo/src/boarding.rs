//! Boarding time derivation.
//!
//! Boarding opens a fixed number of minutes before departure. Departure times
//! are `HH:MM` on a 24-hour clock; boarding times are shown on a 12-hour
//! clock with an AM/PM suffix.

use tracing::warn;

use crate::error::{Error, Result};

/// Minutes between boarding and departure.
pub const DEFAULT_OFFSET_MINUTES: u32 = 45;

/// Shown when a departure time cannot be parsed.
pub const FALLBACK_BOARDING_TIME: &str = "08:15 AM";

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse `HH:MM` into minutes since midnight.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] unless the input is exactly two
/// `:`-separated integers with the hour in `0..=23` and minute in `0..=59`.
pub fn parse_clock(input: &str) -> Result<u32> {
    let (hour, minute) = input
        .split_once(':')
        .ok_or_else(|| Error::invalid_time(input, "expected HH:MM"))?;

    let hour: u32 = hour
        .trim()
        .parse()
        .map_err(|_| Error::invalid_time(input, "hour is not a number"))?;
    let minute: u32 = minute
        .trim()
        .parse()
        .map_err(|_| Error::invalid_time(input, "minute is not a number"))?;

    if hour > 23 {
        return Err(Error::invalid_time(input, "hour out of range"));
    }
    if minute > 59 {
        return Err(Error::invalid_time(input, "minute out of range"));
    }

    Ok(hour * 60 + minute)
}

/// Render minutes since midnight as `hh:mm AM|PM`.
#[must_use]
pub fn to_twelve_hour(minutes: u32) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let hour = minutes / 60;
    let minute = minutes % 60;

    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    format!("{display_hour:02}:{minute:02} {suffix}")
}

/// Boarding time for a departure, `offset_minutes` earlier, wrapping past
/// midnight into the previous day.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if `departure` is not a valid `HH:MM` time.
pub fn boarding_time_with_offset(departure: &str, offset_minutes: u32) -> Result<String> {
    let departs = parse_clock(departure)?;
    let offset = offset_minutes % MINUTES_PER_DAY;
    let boards = (departs + MINUTES_PER_DAY - offset) % MINUTES_PER_DAY;
    Ok(to_twelve_hour(boards))
}

/// Boarding time with the standard 45 minute offset.
///
/// # Errors
///
/// Returns [`Error::InvalidTime`] if `departure` is not a valid `HH:MM` time.
pub fn boarding_time(departure: &str) -> Result<String> {
    boarding_time_with_offset(departure, DEFAULT_OFFSET_MINUTES)
}

/// Like [`boarding_time_with_offset`], but a malformed departure yields
/// [`FALLBACK_BOARDING_TIME`] instead of an error.
#[must_use]
pub fn boarding_time_or_fallback(departure: &str, offset_minutes: u32) -> String {
    boarding_time_with_offset(departure, offset_minutes).unwrap_or_else(|err| {
        warn!(error = %err, "Using fallback boarding time");
        FALLBACK_BOARDING_TIME.to_string()
    })
}
