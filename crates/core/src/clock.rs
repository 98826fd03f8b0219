//! Minute-of-day arithmetic and the `"HH:MM"` clock format used on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{SalonError, SalonResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision.
///
/// Values range from `00:00` to `24:00` inclusive; `24:00` only ever appears
/// as the end of a booking that runs until midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes <= MINUTES_PER_DAY {
            Some(Self(minutes as u16))
        } else {
            None
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    /// Adds a duration, failing if the result would pass midnight.
    pub fn checked_add(self, minutes: u32) -> Option<Self> {
        self.minutes()
            .checked_add(minutes)
            .and_then(Self::from_minutes)
    }
}

/// Parses an `"HH:MM"` string into minutes since midnight.
pub fn parse_clock(value: &str) -> SalonResult<u32> {
    let invalid = || SalonError::Validation(format!("Invalid time '{}', expected HH:MM", value));

    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    match (hours, minutes) {
        (0..=23, 0..=59) => Ok(hours * 60 + minutes),
        (24, 0) => Ok(MINUTES_PER_DAY),
        _ => Err(invalid()),
    }
}

/// Formats minutes since midnight as a zero-padded `"HH:MM"` string.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl FromStr for ClockTime {
    type Err = SalonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let minutes = parse_clock(s)?;
        Ok(Self(minutes as u16))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&minutes_to_time(self.minutes()))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
