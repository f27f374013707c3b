use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarZone, WeekStart};
use crate::error::{ChimeError, Result};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

/// Parse a profiled env var, logging and falling back to `default` when the
/// value is present but malformed.
fn profiled_env_parsed<T>(profile: &str, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match profiled_env_opt(profile, key) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, value = %raw, error = %e, "ignoring invalid config value");
                default
            }
        },
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub calendar: CalendarConfig,
    pub trigger: TriggerConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `CHIME_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("CHIME_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            calendar: CalendarConfig::from_env_profiled(p),
            trigger: TriggerConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  calendar:    zone={}, week_start={}", self.calendar.zone, self.calendar.week_start);
        tracing::info!("  trigger:     postpone_limit={}", self.trigger.postpone_limit);
    }

    /// Return the effective settings as JSON.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "calendar": {
                "zone": self.calendar.zone.to_string(),
                "week_start": self.calendar.week_start.to_string(),
            },
            "trigger": { "postpone_limit": self.trigger.postpone_limit },
        })
    }
}

// ── Calendar ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub zone: CalendarZone,
    pub week_start: WeekStart,
}

impl CalendarConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            zone: profiled_env_parsed(p, "CHIME_ZONE", CalendarZone::default()),
            week_start: profiled_env_parsed(p, "CHIME_WEEK_START", WeekStart::default()),
        }
    }
}

// ── Trigger ───────────────────────────────────────────────────

/// Upper bound for [`TriggerConfig::postpone_limit`].
pub const MAX_POSTPONE_LIMIT: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// How many postponement steps may be applied to reach the future.
    /// 1 keeps the single-step behavior.
    pub postpone_limit: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self { postpone_limit: 1 }
    }
}

impl TriggerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let raw: u32 = profiled_env_parsed(p, "CHIME_POSTPONE_LIMIT", 1);
        let postpone_limit = match validate_postpone_limit(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to single-step postponement");
                1
            }
        };
        Self { postpone_limit }
    }
}

/// Check that a postpone limit lies in `1..=MAX_POSTPONE_LIMIT`.
pub fn validate_postpone_limit(limit: u32) -> Result<u32> {
    if (1..=MAX_POSTPONE_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(ChimeError::InvalidPostponeLimit(format!(
            "{} (expected 1..={})",
            limit, MAX_POSTPONE_LIMIT
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_single_step_local_sunday() {
        let config = Config::default();
        assert_eq!(config.calendar.zone, CalendarZone::Local);
        assert_eq!(config.calendar.week_start, WeekStart::Sunday);
        assert_eq!(config.trigger.postpone_limit, 1);
        assert_eq!(config.profile_label(), "default");
    }

    #[test]
    fn postpone_limit_bounds() {
        assert!(validate_postpone_limit(0).is_err());
        assert_eq!(validate_postpone_limit(1).unwrap(), 1);
        assert_eq!(validate_postpone_limit(MAX_POSTPONE_LIMIT).unwrap(), MAX_POSTPONE_LIMIT);
        assert!(validate_postpone_limit(MAX_POSTPONE_LIMIT + 1).is_err());
    }

    #[test]
    fn summary_reports_effective_values() {
        let config = Config {
            profile: "PROD".to_string(),
            calendar: CalendarConfig {
                zone: CalendarZone::Utc,
                week_start: WeekStart::Monday,
            },
            trigger: TriggerConfig { postpone_limit: 4 },
        };
        let summary = config.summary();
        assert_eq!(summary["profile"], "PROD");
        assert_eq!(summary["calendar"]["zone"], "utc");
        assert_eq!(summary["calendar"]["week_start"], "monday");
        assert_eq!(summary["trigger"]["postpone_limit"], 4);
    }

    #[test]
    fn profiled_lookup_prefers_prefixed_key() {
        // Unique key names keep this test independent of other env readers.
        env::set_var("CHIMETEST_CHIME_TEST_ONLY_KEY", "prefixed");
        env::set_var("CHIME_TEST_ONLY_KEY", "plain");
        assert_eq!(
            profiled_env_opt("CHIMETEST", "CHIME_TEST_ONLY_KEY").as_deref(),
            Some("prefixed")
        );
        assert_eq!(profiled_env_opt("", "CHIME_TEST_ONLY_KEY").as_deref(), Some("plain"));
        env::remove_var("CHIMETEST_CHIME_TEST_ONLY_KEY");
        env::remove_var("CHIME_TEST_ONLY_KEY");
    }

    #[test]
    fn malformed_values_fall_back_to_default() {
        env::set_var("CHIME_TEST_ONLY_ZONE", "atlantis");
        let zone = profiled_env_parsed("", "CHIME_TEST_ONLY_ZONE", CalendarZone::Utc);
        assert_eq!(zone, CalendarZone::Utc);
        env::remove_var("CHIME_TEST_ONLY_ZONE");
    }
}
