//! Recurrence triggers for calendar patterns.
//!
//! This crate provides:
//! - [`TriggerSpec`]: a partial calendar pattern (year, month, day, weekday,
//!   hour, minute, second) with a derived granularity [`Unit`]
//! - [`TriggerCalculator`]: the next instant matching a pattern strictly
//!   after a reference, with unit-based postponement
//! - [`codec`]: the compact `* 5 * * 9 0 * 11` string form used to persist
//!   patterns, including the legacy 7-token layout
//! - [`CivilDateTime`]: the lenient calendar arithmetic behind all of it

pub mod calculator;
pub mod civil;
pub mod codec;
pub mod spec;
pub mod unit;

pub use calculator::{next_trigger, PostponePolicy, TriggerCalculator, Upcoming};
pub use civil::CivilDateTime;
pub use codec::{decode, encode, MatchFormat};
pub use spec::TriggerSpec;
pub use unit::{Step, Unit, FIELD_ORDER};
