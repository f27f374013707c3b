//! Granularity of a pattern and the postponement step it implies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarsest calendar field present in a pattern.
///
/// The integer codes returned by [`Unit::code`] are persisted inside match
/// strings and must never change:
///
/// | unit         | code |
/// |--------------|------|
/// | `Year`       | 1    |
/// | `Month`      | 2    |
/// | `DayOfMonth` | 5    |
/// | `DayOfWeek`  | 7    |
/// | `HourOfDay`  | 11   |
/// | `Minute`     | 12   |
/// | `Second`     | 13   |
/// | `None`       | -1   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    Year,
    Month,
    DayOfMonth,
    DayOfWeek,
    HourOfDay,
    Minute,
    Second,
    #[default]
    None,
}

/// Field precedence used for unit derivation, candidate construction and
/// the match-string layout.
pub const FIELD_ORDER: [Unit; 7] = [
    Unit::Year,
    Unit::Month,
    Unit::DayOfMonth,
    Unit::DayOfWeek,
    Unit::HourOfDay,
    Unit::Minute,
    Unit::Second,
];

impl Unit {
    pub const fn code(self) -> i32 {
        match self {
            Unit::Year => 1,
            Unit::Month => 2,
            Unit::DayOfMonth => 5,
            Unit::DayOfWeek => 7,
            Unit::HourOfDay => 11,
            Unit::Minute => 12,
            Unit::Second => 13,
            Unit::None => -1,
        }
    }

    /// Inverse of [`Unit::code`]. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Unit::Year),
            2 => Some(Unit::Month),
            5 => Some(Unit::DayOfMonth),
            7 => Some(Unit::DayOfWeek),
            11 => Some(Unit::HourOfDay),
            12 => Some(Unit::Minute),
            13 => Some(Unit::Second),
            -1 => Some(Unit::None),
            _ => None,
        }
    }

    /// Step applied to a candidate that is not in the future.
    ///
    /// Always one level coarser than the unit, so a pattern keeps its
    /// cadence: a weekday pattern recurs next week, an hour pattern tomorrow.
    /// Year and month both step by a year.
    pub const fn postponement(self) -> Option<Step> {
        match self {
            Unit::Year | Unit::Month => Some(Step::Years),
            Unit::DayOfMonth => Some(Step::Months),
            Unit::DayOfWeek => Some(Step::Weeks),
            Unit::HourOfDay => Some(Step::Days),
            Unit::Minute => Some(Step::Hours),
            Unit::Second => Some(Step::Minutes),
            Unit::None => None,
        }
    }

    /// Field name as used in summaries and CLI output.
    pub const fn field_name(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::DayOfMonth => "day",
            Unit::DayOfWeek => "weekday",
            Unit::HourOfDay => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::None => "none",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Year => "YEAR",
            Unit::Month => "MONTH",
            Unit::DayOfMonth => "DAY_OF_MONTH",
            Unit::DayOfWeek => "DAY_OF_WEEK",
            Unit::HourOfDay => "HOUR_OF_DAY",
            Unit::Minute => "MINUTE",
            Unit::Second => "SECOND",
            Unit::None => "NONE",
        };
        f.write_str(name)
    }
}

/// One calendar increment applied during postponement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Years => "+1 year",
            Step::Months => "+1 month",
            Step::Weeks => "+1 week",
            Step::Days => "+1 day",
            Step::Hours => "+1 hour",
            Step::Minutes => "+1 minute",
        };
        f.write_str(name)
    }
}
