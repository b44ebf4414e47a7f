//! Core value types
//!
//! - `TimeOfDay`: minute-precision wall-clock time ("HH:MM")
//! - `AlarmId`: process-unique alarm identifier
//! - `WallInstant`: one clock reading (time + weekday) at minute resolution
//!
//! Boundary parsing lives here as total functions: malformed user input
//! becomes an [`AlarmError`], never a panic crossing the core boundary.

use crate::error::{AlarmError, Result};
use chrono::{Timelike, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Minutes in a full day, for wrapping clock arithmetic
const MINUTES_PER_DAY: i32 = 24 * 60;

/// Minute-precision time of day
///
/// Equality is exact field match; ordering follows the clock. Arithmetic
/// wraps around midnight and never carries into a day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Create a time of day, rejecting out-of-range fields
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(AlarmError::InvalidTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Add minutes with standard clock wrap-around (23:58 + 5 = 00:03)
    #[must_use]
    pub fn plus_minutes(&self, minutes: i32) -> Self {
        let total = (i32::from(self.hour) * 60 + i32::from(self.minute) + minutes)
            .rem_euclid(MINUTES_PER_DAY);
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = AlarmError;

    fn from_str(s: &str) -> Result<Self> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| AlarmError::InvalidTime(s.to_string()))?;
        let hour: u8 = h
            .trim()
            .parse()
            .map_err(|_| AlarmError::InvalidTime(s.to_string()))?;
        let minute: u8 = m
            .trim()
            .parse()
            .map_err(|_| AlarmError::InvalidTime(s.to_string()))?;
        Self::new(hour, minute).map_err(|_| AlarmError::InvalidTime(s.to_string()))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<chrono::NaiveTime> for TimeOfDay {
    /// Truncates to the minute; chrono guarantees in-range fields
    fn from(t: chrono::NaiveTime) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
        }
    }
}

/// Parse "HH:MM" user input
pub fn parse_time(s: &str) -> Result<TimeOfDay> {
    s.parse()
}

/// Parse a weekday name ("monday", "Mon", ...) case-insensitively
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| AlarmError::InvalidDay(s.to_string()))
}

/// Full English weekday name (chrono's `Display` uses the short form)
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Process-unique alarm identifier
///
/// Assigned once at creation and never reused for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AlarmId(Uuid);

impl AlarmId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlarmId {
    type Err = AlarmError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| AlarmError::InvalidId(s.to_string()))
    }
}

/// A wall-clock reading truncated to minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallInstant {
    pub time: TimeOfDay,
    pub day: Weekday,
}
