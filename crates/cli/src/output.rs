//! Text and JSON rendering for CLI results.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use chime_trigger::{encode, MatchFormat, TriggerSpec, Unit};

/// One computed trigger.
#[derive(Debug, Serialize, PartialEq)]
pub struct TriggerRow {
    pub at: String,
    pub epoch_ms: i64,
}

impl TriggerRow {
    pub fn from_datetime<Tz>(dt: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            at: dt.to_rfc3339(),
            epoch_ms: dt.timestamp_millis(),
        }
    }

    pub fn to_text(&self) -> String {
        format!("{}  ({} ms)", self.at, self.epoch_ms)
    }
}

/// Everything known about a decoded match string.
#[derive(Debug, Serialize)]
pub struct DecodeReport {
    pub input: String,
    pub format: Option<&'static str>,
    pub spec: TriggerSpec,
    pub unit: Unit,
    pub unit_code: i32,
    pub match_string: String,
}

impl DecodeReport {
    pub fn new(input: &str, spec: TriggerSpec) -> Self {
        let format = MatchFormat::detect(input).map(|f| match f {
            MatchFormat::Legacy => "legacy",
            MatchFormat::Current => "current",
        });
        Self {
            input: input.to_string(),
            format,
            unit: spec.unit(),
            unit_code: spec.unit().code(),
            match_string: encode(&spec),
            spec,
        }
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("input:   {:?}", self.input)];
        lines.push(format!("format:  {}", self.format.unwrap_or("unrecognized (empty pattern)")));
        for (unit, value) in self.spec.fields() {
            let value = value.map_or_else(|| "*".to_string(), |v| v.to_string());
            lines.push(format!("{:<8} {}", format!("{}:", unit.field_name()), value));
        }
        lines.push(format!("unit:    {} ({})", self.unit, self.unit_code));
        lines.push(format!("encoded: {}", self.match_string));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_trigger_row() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 16, 9, 0, 0).unwrap();
        let row = TriggerRow::from_datetime(&dt);
        assert_eq!(row.at, "2024-03-16T09:00:00+00:00");
        assert_eq!(row.epoch_ms, 1_710_579_600_000);
        assert_eq!(row.to_text(), "2024-03-16T09:00:00+00:00  (1710579600000 ms)");
    }

    #[test]
    fn test_decode_report_legacy() {
        let input = "* * * * 9 0 11";
        let report = DecodeReport::new(input, chime_trigger::decode(input));
        assert_eq!(report.format, Some("legacy"));
        assert_eq!(report.unit, Unit::HourOfDay);
        assert_eq!(report.unit_code, 11);
        assert_eq!(report.match_string, "* * * * 9 0 * 11");

        let text = report.to_text();
        assert!(text.contains("hour:    9"));
        assert!(text.contains("second:  *"));
        assert!(text.contains("unit:    HOUR_OF_DAY (11)"));
    }

    #[test]
    fn test_decode_report_json() {
        let input = "nonsense";
        let report = DecodeReport::new(input, chime_trigger::decode(input));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["format"], serde_json::Value::Null);
        assert_eq!(json["unit"], "NONE");
        assert_eq!(json["unit_code"], -1);
        assert_eq!(json["spec"], serde_json::json!({}));
    }
}
