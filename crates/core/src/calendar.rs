//! Calendar settings shared by the trigger calculator and its callers.
//!
//! [`CalendarZone`] names the time zone a pattern is evaluated in and
//! [`WeekStart`] decides which day opens a week when a weekday field moves a
//! date "within the current week".

use std::fmt;
use std::str::FromStr;

use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ChimeError;

// ── Zone ──────────────────────────────────────────────────────

/// Time zone a pattern is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarZone {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
    /// A fixed UTC offset such as `+02:00`.
    Fixed(FixedOffset),
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarZone::Local => write!(f, "local"),
            CalendarZone::Utc => write!(f, "utc"),
            CalendarZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

impl FromStr for CalendarZone {
    type Err = ChimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(CalendarZone::Local),
            "utc" | "z" => Ok(CalendarZone::Utc),
            _ => parse_offset(trimmed)
                .map(CalendarZone::Fixed)
                .ok_or_else(|| ChimeError::InvalidZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for CalendarZone {
    type Error = ChimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarZone> for String {
    fn from(zone: CalendarZone) -> Self {
        zone.to_string()
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH` into a fixed offset.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60))
}

// ── Week start ────────────────────────────────────────────────

/// First day of a calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn first_day(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// Weekday number of the first day, counting 1 = Sunday … 7 = Saturday.
    pub fn number_from_sunday(self) -> i64 {
        i64::from(self.first_day().number_from_sunday())
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Sunday => write!(f, "sunday"),
            WeekStart::Monday => write!(f, "monday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = ChimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(ChimeError::InvalidWeekStart(s.to_string())),
        }
    }
}
