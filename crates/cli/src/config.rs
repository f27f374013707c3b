use anyhow::{Context, Result};
use tracing::debug;

use chime_core::config::validate_postpone_limit;
use chime_core::{CalendarZone, Config, WeekStart};

use crate::cli::CalendarArgs;

/// Effective calendar settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub zone: CalendarZone,
    pub week_start: WeekStart,
    pub postpone_limit: u32,
}

impl Settings {
    /// Resolve settings. Priority: cli flag > env config > built-in default.
    pub fn resolve(args: &CalendarArgs, config: &Config) -> Result<Self> {
        let postpone_limit = args
            .postpone_limit
            .unwrap_or(config.trigger.postpone_limit);
        let postpone_limit =
            validate_postpone_limit(postpone_limit).context("invalid --postpone-limit")?;

        let settings = Self {
            zone: args.zone.unwrap_or(config.calendar.zone),
            week_start: args.week_start.unwrap_or(config.calendar.week_start),
            postpone_limit,
        };
        debug!(?settings, "Resolved calendar settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chime_core::config::{CalendarConfig, TriggerConfig};

    fn env_config() -> Config {
        Config {
            profile: String::new(),
            calendar: CalendarConfig {
                zone: CalendarZone::Utc,
                week_start: WeekStart::Monday,
            },
            trigger: TriggerConfig { postpone_limit: 3 },
        }
    }

    #[test]
    fn test_resolve_from_config() {
        let settings = Settings::resolve(&CalendarArgs::default(), &env_config()).unwrap();
        assert_eq!(settings.zone, CalendarZone::Utc);
        assert_eq!(settings.week_start, WeekStart::Monday);
        assert_eq!(settings.postpone_limit, 3);
    }

    #[test]
    fn test_resolve_cli_override() {
        let args = CalendarArgs {
            zone: Some(CalendarZone::Local),
            week_start: Some(WeekStart::Sunday),
            postpone_limit: Some(1),
        };
        let settings = Settings::resolve(&args, &env_config()).unwrap();
        assert_eq!(settings.zone, CalendarZone::Local);
        assert_eq!(settings.week_start, WeekStart::Sunday);
        assert_eq!(settings.postpone_limit, 1);
    }

    #[test]
    fn test_resolve_rejects_out_of_range_limit() {
        let args = CalendarArgs {
            postpone_limit: Some(0),
            ..CalendarArgs::default()
        };
        assert!(Settings::resolve(&args, &env_config()).is_err());
    }
}
