//! The recurrence pattern: seven optional calendar fields.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// A partially specified calendar pattern.
///
/// Present fields pin that component of the next trigger; absent fields keep
/// the reference instant's value. Months count 0 = January … 11 = December,
/// weekdays 1 = Sunday … 7 = Saturday, matching persisted match strings. Values are not range checked; the
/// calendar rolls them over when the trigger is computed.
///
/// Equality and hashing cover the seven fields only. The granularity
/// ([`TriggerSpec::unit`]) is derived from them on demand and is never
/// stored, so two equal specs always share a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    month: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    day: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weekday: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hour: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minute: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    second: Option<i32>,
}

impl TriggerSpec {
    /// Create an empty pattern (no field present, unit `NONE`).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Pin the month, 0 = January … 11 = December.
    pub fn with_month(mut self, month: i32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_day(mut self, day: i32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_weekday(mut self, weekday: i32) -> Self {
        self.weekday = Some(weekday);
        self
    }

    /// Pin the weekday using chrono's [`Weekday`].
    pub fn with_weekday_of(self, weekday: Weekday) -> Self {
        self.with_weekday(weekday.number_from_sunday() as i32)
    }

    pub fn with_hour(mut self, hour: i32) -> Self {
        self.hour = Some(hour);
        self
    }

    pub fn with_minute(mut self, minute: i32) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn with_second(mut self, second: i32) -> Self {
        self.second = Some(second);
        self
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<i32> {
        self.month
    }

    pub fn day(&self) -> Option<i32> {
        self.day
    }

    pub fn weekday(&self) -> Option<i32> {
        self.weekday
    }

    pub fn hour(&self) -> Option<i32> {
        self.hour
    }

    pub fn minute(&self) -> Option<i32> {
        self.minute
    }

    pub fn second(&self) -> Option<i32> {
        self.second
    }

    /// Set or clear the field that corresponds to `unit`.
    ///
    /// `Unit::None` names no field and is ignored.
    pub fn set_field(&mut self, unit: Unit, value: Option<i32>) {
        let slot = match unit {
            Unit::Year => &mut self.year,
            Unit::Month => &mut self.month,
            Unit::DayOfMonth => &mut self.day,
            Unit::DayOfWeek => &mut self.weekday,
            Unit::HourOfDay => &mut self.hour,
            Unit::Minute => &mut self.minute,
            Unit::Second => &mut self.second,
            Unit::None => return,
        };
        *slot = value;
    }

    /// All seven fields paired with their unit, coarsest first.
    pub fn fields(&self) -> [(Unit, Option<i32>); 7] {
        [
            (Unit::Year, self.year),
            (Unit::Month, self.month),
            (Unit::DayOfMonth, self.day),
            (Unit::DayOfWeek, self.weekday),
            (Unit::HourOfDay, self.hour),
            (Unit::Minute, self.minute),
            (Unit::Second, self.second),
        ]
    }

    /// Granularity of the pattern: the first present field in
    /// year → second order, or `Unit::None` when nothing is pinned.
    pub fn unit(&self) -> Unit {
        self.fields()
            .into_iter()
            .find_map(|(unit, value)| value.map(|_| unit))
            .unwrap_or(Unit::None)
    }

    /// True when no field is present. Such a pattern never recurs.
    pub fn is_empty(&self) -> bool {
        self.unit() == Unit::None
    }
}

impl fmt::Display for TriggerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerSpec{")?;
        for (i, (unit, value)) in self.fields().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(v) => write!(f, "{}={}", unit.field_name(), v)?,
                None => write!(f, "{}=*", unit.field_name())?,
            }
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash_of(spec: &TriggerSpec) -> u64 {
        let mut hasher = DefaultHasher::new();
        spec.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn empty_spec_has_no_unit() {
        let spec = TriggerSpec::new();
        assert_eq!(spec.unit(), Unit::None);
        assert!(spec.is_empty());
    }

    #[test]
    fn unit_is_coarsest_present_field() {
        assert_eq!(TriggerSpec::new().with_year(2030).with_second(5).unit(), Unit::Year);
        assert_eq!(TriggerSpec::new().with_month(5).with_day(1).unit(), Unit::Month);
        assert_eq!(TriggerSpec::new().with_day(15).with_hour(8).unit(), Unit::DayOfMonth);
        assert_eq!(TriggerSpec::new().with_weekday(2).with_hour(9).unit(), Unit::DayOfWeek);
        assert_eq!(TriggerSpec::new().with_hour(9).with_minute(0).unit(), Unit::HourOfDay);
        assert_eq!(TriggerSpec::new().with_minute(30).unit(), Unit::Minute);
        assert_eq!(TriggerSpec::new().with_second(10).unit(), Unit::Second);
    }

    #[test]
    fn unit_ignores_setter_call_order() {
        let fine_first = TriggerSpec::new().with_second(10).with_minute(5).with_hour(3);
        let coarse_first = TriggerSpec::new().with_hour(3).with_minute(5).with_second(10);
        assert_eq!(fine_first.unit(), Unit::HourOfDay);
        assert_eq!(fine_first.unit(), coarse_first.unit());
        assert_eq!(fine_first, coarse_first);
    }

    #[test]
    fn unit_follows_final_field_state() {
        let mut spec = TriggerSpec::new().with_day(3).with_minute(15);
        assert_eq!(spec.unit(), Unit::DayOfMonth);
        spec.set_field(Unit::DayOfMonth, None);
        assert_eq!(spec.unit(), Unit::Minute);
        spec.set_field(Unit::Year, Some(2031));
        assert_eq!(spec.unit(), Unit::Year);
    }

    #[test]
    fn set_field_none_unit_is_ignored() {
        let mut spec = TriggerSpec::new().with_hour(4);
        spec.set_field(Unit::None, Some(9));
        assert_eq!(spec, TriggerSpec::new().with_hour(4));
    }

    #[test]
    fn equality_and_hash_are_structural() {
        let a = TriggerSpec::new().with_month(5).with_hour(9);
        let b = TriggerSpec::new().with_hour(9).with_month(5);
        let c = TriggerSpec::new().with_month(5).with_hour(10);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn weekday_from_chrono() {
        assert_eq!(TriggerSpec::new().with_weekday_of(Weekday::Sun).weekday(), Some(1));
        assert_eq!(TriggerSpec::new().with_weekday_of(Weekday::Mon).weekday(), Some(2));
        assert_eq!(TriggerSpec::new().with_weekday_of(Weekday::Sat).weekday(), Some(7));
    }

    #[test]
    fn fields_are_listed_coarse_to_fine() {
        let spec = TriggerSpec::new().with_month(5).with_minute(0);
        let fields = spec.fields();
        assert_eq!(fields[0], (Unit::Year, None));
        assert_eq!(fields[1], (Unit::Month, Some(5)));
        assert_eq!(fields[5], (Unit::Minute, Some(0)));
        assert_eq!(fields[6], (Unit::Second, None));
    }

    #[test]
    fn display_marks_absent_fields() {
        let spec = TriggerSpec::new().with_month(5).with_hour(9);
        assert_eq!(
            spec.to_string(),
            "TriggerSpec{year=*, month=5, day=*, weekday=*, hour=9, minute=*, second=*}"
        );
    }

    #[test]
    fn serde_skips_absent_fields() {
        let spec = TriggerSpec::new().with_weekday(2).with_hour(9);
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json, serde_json::json!({ "weekday": 2, "hour": 9 }));

        let back: TriggerSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);

        let empty: TriggerSpec = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
