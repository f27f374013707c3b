//! Iterator over successive trigger instants.

use chrono::{DateTime, TimeZone};
use tracing::debug;

use super::engine::TriggerCalculator;
use crate::spec::TriggerSpec;

/// Yields the next trigger, then the trigger after that, using each result
/// as the reference for the following one. Ends when the pattern is empty or
/// a computation fails to move past its reference.
pub struct Upcoming<'a, Tz: TimeZone> {
    calculator: &'a TriggerCalculator<Tz>,
    spec: TriggerSpec,
    reference: DateTime<Tz>,
    done: bool,
}

impl<'a, Tz: TimeZone> Upcoming<'a, Tz> {
    pub(crate) fn new(
        calculator: &'a TriggerCalculator<Tz>,
        spec: TriggerSpec,
        reference: DateTime<Tz>,
    ) -> Self {
        Self {
            calculator,
            done: spec.is_empty(),
            spec,
            reference,
        }
    }
}

impl<Tz: TimeZone> Iterator for Upcoming<'_, Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.calculator.next_trigger_at(&self.spec, &self.reference);
        if next.timestamp_millis() <= self.reference.timestamp_millis() {
            debug!(
                reference_ms = self.reference.timestamp_millis(),
                next_ms = next.timestamp_millis(),
                "trigger did not advance; stopping"
            );
            self.done = true;
            return None;
        }
        self.reference = next.clone();
        Some(next)
    }
}
