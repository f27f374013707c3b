mod cli;
mod config;
mod output;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use clap::Parser;
use tracing::{info, warn};

use chime_core::{CalendarZone, ChimeError, Config};
use chime_trigger::{decode, TriggerCalculator, TriggerSpec};

use crate::cli::{CliArgs, Command};
use crate::config::Settings;
use crate::output::{DecodeReport, TriggerRow};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    chime_core::config::load_dotenv();
    let args = CliArgs::parse();

    let config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    match args.command {
        Command::Next {
            pattern,
            at,
            count,
            calendar,
            json,
        } => {
            let settings = Settings::resolve(&calendar, &config)?;
            let reference = parse_reference(at.as_deref())?;
            let spec = decode(&pattern);
            if spec.is_empty() {
                bail!("pattern {:?} pins no fields; nothing to schedule", pattern);
            }
            info!(%spec, unit = %spec.unit(), "Computing triggers");

            let rows = match settings.zone {
                CalendarZone::Local => upcoming_rows(Local, &settings, &spec, &reference, count),
                CalendarZone::Utc => upcoming_rows(Utc, &settings, &spec, &reference, count),
                CalendarZone::Fixed(offset) => {
                    upcoming_rows(offset, &settings, &spec, &reference, count)
                }
            };
            if rows.is_empty() {
                bail!(
                    "pattern {:?} does not produce a trigger after {}",
                    pattern,
                    reference.to_rfc3339()
                );
            }
            if rows.len() < count {
                warn!(requested = count, produced = rows.len(), "pattern stopped recurring");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{}", row.to_text());
                }
            }
        }
        Command::Encode { fields } => {
            let spec = fields.to_spec();
            if spec.is_empty() {
                warn!("no fields given; the match string describes no recurrence");
            }
            println!("{}", spec.to_match_string());
        }
        Command::Decode { pattern, json } => {
            let report = DecodeReport::new(&pattern, decode(&pattern));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.to_text());
            }
        }
    }

    Ok(())
}

/// Parse an RFC 3339 reference, defaulting to the current instant.
fn parse_reference(at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| ChimeError::InvalidReference(format!("{}: {}", raw, e)))
            .with_context(|| format!("failed to parse --at {:?}", raw)),
        None => Ok(Utc::now().into()),
    }
}

fn upcoming_rows<Tz>(
    zone: Tz,
    settings: &Settings,
    spec: &TriggerSpec,
    reference: &DateTime<FixedOffset>,
    count: usize,
) -> Vec<TriggerRow>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let calculator = TriggerCalculator::new(zone)
        .with_week_start(settings.week_start)
        .with_postpone_limit(settings.postpone_limit);
    calculator
        .upcoming(spec, reference)
        .take(count)
        .map(|dt| TriggerRow::from_datetime(&dt))
        .collect()
}
