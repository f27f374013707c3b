//! Lenient civil date-time used to build trigger candidates.
//!
//! A [`CivilDateTime`] is a plain bag of calendar fields. Field setters accept
//! any value; [`CivilDateTime::normalize`] carries overflow and underflow into
//! coarser fields using real month lengths, so day 32 of January becomes
//! February 1 and month 13 becomes January of the following year. Every
//! computation builds its own value from a reference instant, mutates it and
//! resolves it back into a zone; nothing is shared between calls.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike,
};

use chime_core::WeekStart;

use crate::unit::Step;

const SECONDS_PER_DAY: i64 = 86_400;

/// Far beyond chrono's representable range; keeps `Duration::days` in bounds.
const MAX_DAY_OFFSET: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilDateTime {
    year: i64,
    /// 1-based.
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
}

impl CivilDateTime {
    pub fn new(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Copy the wall-clock fields of `naive`, dropping sub-second precision.
    pub fn from_naive(naive: &NaiveDateTime) -> Self {
        Self::new(
            i64::from(naive.year()),
            i64::from(naive.month()),
            i64::from(naive.day()),
            i64::from(naive.hour()),
            i64::from(naive.minute()),
            i64::from(naive.second()),
        )
    }

    /// Wall-clock fields of an instant in its own zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self::from_naive(&dt.naive_local())
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> i64 {
        self.month
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    pub fn hour(&self) -> i64 {
        self.hour
    }

    pub fn minute(&self) -> i64 {
        self.minute
    }

    pub fn second(&self) -> i64 {
        self.second
    }

    pub fn set_year(&mut self, year: i64) {
        self.year = year;
    }

    pub fn set_month(&mut self, month: i64) {
        self.month = month;
    }

    pub fn set_day(&mut self, day: i64) {
        self.day = day;
    }

    pub fn set_hour(&mut self, hour: i64) {
        self.hour = hour;
    }

    pub fn set_minute(&mut self, minute: i64) {
        self.minute = minute;
    }

    pub fn set_second(&mut self, second: i64) {
        self.second = second;
    }

    /// Move the date to `weekday` (1 = Sunday … 7 = Saturday) inside the week
    /// that currently contains it. Values outside 1..=7 land in earlier or
    /// later weeks: 8 is the first day numbered 1 of the next week cycle.
    ///
    /// Pending date fields are normalized first so the current week is known.
    pub fn set_weekday(&mut self, weekday: i64, week_start: WeekStart) {
        self.normalize();
        let start = week_start.number_from_sunday();
        let current = i64::from(self.date().weekday().number_from_sunday());
        let current_idx = (current - start).rem_euclid(7);
        let target_idx = (weekday - start).rem_euclid(7) + 7 * (weekday - 1).div_euclid(7);
        self.day += target_idx - current_idx;
        self.normalize();
    }

    /// Advance by one calendar step.
    ///
    /// Years and months bump the field and let the day roll over, so
    /// January 31 plus a month is March 2 or 3 and February 29 plus a year is
    /// March 1.
    pub fn add(&mut self, step: Step) {
        match step {
            Step::Years => self.year += 1,
            Step::Months => self.month += 1,
            Step::Weeks => self.day += 7,
            Step::Days => self.day += 1,
            Step::Hours => self.hour += 1,
            Step::Minutes => self.minute += 1,
        }
        self.normalize();
    }

    /// Carry out-of-range fields into coarser ones.
    ///
    /// Dates outside chrono's range saturate at `NaiveDate::MIN`/`MAX`.
    pub fn normalize(&mut self) {
        let total_secs = self.hour * 3_600 + self.minute * 60 + self.second;
        let day_carry = total_secs.div_euclid(SECONDS_PER_DAY);
        let secs_of_day = total_secs.rem_euclid(SECONDS_PER_DAY);

        let month_index = self.year * 12 + (self.month - 1);
        let year = month_index.div_euclid(12);
        let month = month_index.rem_euclid(12) + 1;
        let offset = (self.day - 1 + day_carry).clamp(-MAX_DAY_OFFSET, MAX_DAY_OFFSET);

        let date = i32::try_from(year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, month as u32, 1))
            .and_then(|first| first.checked_add_signed(Duration::days(offset)))
            .unwrap_or_else(|| {
                if year.saturating_mul(366).saturating_add(offset) >= 0 {
                    NaiveDate::MAX
                } else {
                    NaiveDate::MIN
                }
            });

        self.year = i64::from(date.year());
        self.month = i64::from(date.month());
        self.day = i64::from(date.day());
        self.hour = secs_of_day / 3_600;
        self.minute = secs_of_day % 3_600 / 60;
        self.second = secs_of_day % 60;
    }

    /// Normalized wall-clock value.
    pub fn to_naive(&self) -> NaiveDateTime {
        let mut normalized = *self;
        normalized.normalize();
        normalized.date().and_time(normalized.time())
    }

    /// Map the wall-clock value into `zone`.
    ///
    /// Ambiguous local times take the earlier instant. Local times skipped by
    /// a forward transition are pushed forward by an hour, the usual gap size.
    pub fn resolve<Tz: TimeZone>(&self, zone: &Tz) -> DateTime<Tz> {
        let naive = self.to_naive();
        match zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, _) => earliest,
            LocalResult::None => naive
                .checked_add_signed(Duration::hours(1))
                .and_then(|shifted| zone.from_local_datetime(&shifted).earliest())
                .unwrap_or_else(|| zone.from_utc_datetime(&naive)),
        }
    }

    /// Date part; only meaningful once normalized.
    fn date(&self) -> NaiveDate {
        i32::try_from(self.year)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, self.month as u32, self.day as u32))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Time part; only meaningful once normalized.
    fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour as u32, self.minute as u32, self.second as u32)
            .unwrap_or_default()
    }
}
