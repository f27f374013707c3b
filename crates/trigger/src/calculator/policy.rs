//! How far postponement may go to reach the future.

use chime_core::config::MAX_POSTPONE_LIMIT;

/// Postponement strategy for candidates that are not after the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostponePolicy {
    /// Apply exactly one step and return the result, even if it is still
    /// not in the future.
    #[default]
    SingleStep,
    /// Keep stepping while the result is not in the future, at most this
    /// many times (clamped to `1..=MAX_POSTPONE_LIMIT`).
    Bounded(u32),
}

impl PostponePolicy {
    /// Policy for a configured step limit; 0 and 1 mean single-step.
    pub fn from_limit(limit: u32) -> Self {
        if limit <= 1 {
            PostponePolicy::SingleStep
        } else {
            PostponePolicy::Bounded(limit.min(MAX_POSTPONE_LIMIT))
        }
    }

    pub fn max_steps(self) -> u32 {
        match self {
            PostponePolicy::SingleStep => 1,
            PostponePolicy::Bounded(n) => n.clamp(1, MAX_POSTPONE_LIMIT),
        }
    }
}
