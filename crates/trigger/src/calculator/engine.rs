//! The trigger calculator.

use chrono::{DateTime, SubsecRound, TimeZone};
use tracing::{debug, trace, warn};

use chime_core::{Config, WeekStart};

use super::policy::PostponePolicy;
use super::upcoming::Upcoming;
use crate::civil::CivilDateTime;
use crate::spec::TriggerSpec;
use crate::unit::Unit;

/// Computes next trigger instants in a fixed time zone.
#[derive(Debug, Clone)]
pub struct TriggerCalculator<Tz: TimeZone> {
    zone: Tz,
    week_start: WeekStart,
    policy: PostponePolicy,
}

impl<Tz: TimeZone> TriggerCalculator<Tz> {
    /// Calculator with Sunday-started weeks and single-step postponement.
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            week_start: WeekStart::default(),
            policy: PostponePolicy::default(),
        }
    }

    /// Calculator using the week start and postpone limit from `config`.
    /// The zone is chosen by the caller.
    pub fn configured(zone: Tz, config: &Config) -> Self {
        Self::new(zone)
            .with_week_start(config.calendar.week_start)
            .with_postpone_limit(config.trigger.postpone_limit)
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_policy(mut self, policy: PostponePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_postpone_limit(self, limit: u32) -> Self {
        self.with_policy(PostponePolicy::from_limit(limit))
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn policy(&self) -> PostponePolicy {
        self.policy
    }

    /// The reference in this calculator's zone, truncated to whole seconds.
    pub fn normalize_reference<T: TimeZone>(&self, reference: &DateTime<T>) -> DateTime<Tz> {
        reference.with_timezone(&self.zone).trunc_subsecs(0)
    }

    /// The naive candidate: the reference with every present field pinned,
    /// before any postponement.
    pub fn candidate<T: TimeZone>(&self, spec: &TriggerSpec, reference: &DateTime<T>) -> DateTime<Tz> {
        let reference = self.normalize_reference(reference);
        self.build_candidate(spec, &reference)
    }

    /// Next trigger strictly after `reference` as an instant in this zone.
    ///
    /// With [`PostponePolicy::SingleStep`] at most one postponement step is
    /// applied, so rare calendar rollovers may still yield a non-future
    /// instant. Empty patterns return the candidate untouched.
    pub fn next_trigger_at<T: TimeZone>(
        &self,
        spec: &TriggerSpec,
        reference: &DateTime<T>,
    ) -> DateTime<Tz> {
        let reference = self.normalize_reference(reference);
        let candidate = self.build_candidate(spec, &reference);
        self.postpone_if_needed(spec.unit(), &reference, candidate)
    }

    /// Next trigger in milliseconds since the Unix epoch.
    pub fn next_trigger<T: TimeZone>(&self, spec: &TriggerSpec, reference: &DateTime<T>) -> i64 {
        self.next_trigger_at(spec, reference).timestamp_millis()
    }

    /// Successive triggers, each computed from the previous one.
    pub fn upcoming<T: TimeZone>(&self, spec: &TriggerSpec, reference: &DateTime<T>) -> Upcoming<'_, Tz> {
        Upcoming::new(self, *spec, self.normalize_reference(reference))
    }

    fn build_candidate(&self, spec: &TriggerSpec, reference: &DateTime<Tz>) -> DateTime<Tz> {
        let mut civil = CivilDateTime::from_datetime(reference);
        for (unit, value) in spec.fields() {
            let Some(value) = value else { continue };
            trace!(field = unit.field_name(), value, "pinning field");
            let value = i64::from(value);
            match unit {
                Unit::Year => civil.set_year(value),
                Unit::Month => civil.set_month(value + 1),
                Unit::DayOfMonth => civil.set_day(value),
                Unit::DayOfWeek => civil.set_weekday(value, self.week_start),
                Unit::HourOfDay => civil.set_hour(value),
                Unit::Minute => civil.set_minute(value),
                Unit::Second => civil.set_second(value),
                Unit::None => {}
            }
        }
        let candidate = civil.resolve(&self.zone);
        debug!(
            reference_ms = reference.timestamp_millis(),
            candidate_ms = candidate.timestamp_millis(),
            "built trigger candidate"
        );
        candidate
    }

    fn postpone_if_needed(
        &self,
        unit: Unit,
        reference: &DateTime<Tz>,
        candidate: DateTime<Tz>,
    ) -> DateTime<Tz> {
        let reference_ms = reference.timestamp_millis();
        if candidate.timestamp_millis() > reference_ms {
            return candidate;
        }

        let Some(step) = unit.postponement() else {
            debug!(
                candidate_ms = candidate.timestamp_millis(),
                "empty pattern; returning candidate without postponement"
            );
            return candidate;
        };

        let max_steps = self.policy.max_steps();
        let mut next = candidate;
        for attempt in 1..=max_steps {
            let mut civil = CivilDateTime::from_datetime(&next);
            civil.add(step);
            next = civil.resolve(&self.zone);
            debug!(
                %unit,
                %step,
                attempt,
                next_ms = next.timestamp_millis(),
                "postponed trigger"
            );
            if next.timestamp_millis() > reference_ms {
                return next;
            }
        }

        if let PostponePolicy::Bounded(_) = self.policy {
            warn!(
                %unit,
                max_steps,
                reference_ms,
                next_ms = next.timestamp_millis(),
                "postponement limit reached before the trigger moved into the future"
            );
        }
        next
    }
}
