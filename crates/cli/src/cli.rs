use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use chime_core::{CalendarZone, WeekStart};
use chime_trigger::TriggerSpec;

/// Compute and persist recurrence triggers.
///
/// Patterns are match strings such as `"* * * 2 9 0 * 7"`
/// (year month day weekday hour minute second unit, `*` = any).
#[derive(Parser, Debug)]
#[command(name = "chime", version, about = "Compute and persist recurrence triggers")]
pub struct CliArgs {
    /// Config profile (prefix for CHIME_* env vars)
    #[arg(long, global = true, env = "CHIME_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the next trigger instants for a match string
    Next {
        /// Match string (7 or 8 space-separated tokens)
        pattern: String,

        /// Reference instant in RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,

        /// Number of successive triggers to print (at least 1)
        #[arg(long, default_value_t = 1, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        count: usize,

        #[command(flatten)]
        calendar: CalendarArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a match string from individual fields
    Encode {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Show the fields, unit and layout of a match string
    Decode {
        /// Match string to inspect
        pattern: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Calendar overrides; unset flags fall back to the environment config.
#[derive(Args, Debug, Default, Clone)]
pub struct CalendarArgs {
    /// Time zone: local, utc or a fixed offset like +02:00
    #[arg(long, allow_hyphen_values = true)]
    pub zone: Option<CalendarZone>,

    /// First day of the week: sunday or monday
    #[arg(long)]
    pub week_start: Option<WeekStart>,

    /// Maximum postponement steps (1 = single step)
    #[arg(long)]
    pub postpone_limit: Option<u32>,
}

/// Pattern fields. Months count from 0 (January), weekdays 1 = Sunday … 7 = Saturday.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub month: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub day: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub weekday: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub hour: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub minute: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub second: Option<i32>,
}

impl FieldArgs {
    pub fn to_spec(&self) -> TriggerSpec {
        let mut spec = TriggerSpec::new();
        let values = [
            self.year,
            self.month,
            self.day,
            self.weekday,
            self.hour,
            self.minute,
            self.second,
        ];
        for (unit, value) in chime_trigger::FIELD_ORDER.into_iter().zip(values) {
            spec.set_field(unit, value);
        }
        spec
    }
}
