//! Next-trigger computation for recurrence patterns.
//!
//! A [`TriggerCalculator`] pins the present fields of a [`TriggerSpec`] onto
//! a reference instant and, when the resulting candidate is not strictly
//! after the reference, postpones it by one step of the granularity above the
//! pattern's unit (see [`Unit::postponement`](crate::Unit::postponement)).
//!
//! The calculator holds no mutable state. Each call builds a fresh
//! [`CivilDateTime`](crate::CivilDateTime) so one calculator can be shared
//! freely across threads.

mod engine;
mod policy;
mod upcoming;


use chrono::{DateTime, TimeZone};

use crate::spec::TriggerSpec;

pub use self::engine::TriggerCalculator;
pub use self::policy::PostponePolicy;
pub use self::upcoming::Upcoming;

/// Next trigger in epoch milliseconds, evaluated in the reference's own zone
/// with default settings (weeks start on Sunday, single-step postponement).
pub fn next_trigger<Tz: TimeZone>(spec: &TriggerSpec, reference: &DateTime<Tz>) -> i64 {
    TriggerCalculator::new(reference.timezone()).next_trigger(spec, reference)
}
