//! Compact string form of a [`TriggerSpec`].
//!
//! ```text
//! <year> <month> <day> <weekday> <hour> <minute> <second> <unit>   (current)
//! <year> <month> <day> <weekday> <hour> <minute> <unit>            (legacy)
//! ```
//!
//! Absent fields are written as `*`; the unit is written with its stable code
//! (see [`Unit::code`]). Strings persisted before the seconds field existed
//! use the 7-token legacy layout and must keep decoding. Decoding never fails:
//! unparseable tokens become absent fields and any other token count yields an
//! empty pattern.

use std::convert::Infallible;
use std::str::FromStr;

use tracing::debug;

use crate::spec::TriggerSpec;
use crate::unit::{Unit, FIELD_ORDER};

pub const SEPARATOR: char = ' ';

/// Placeholder for an absent field.
pub const ABSENT: &str = "*";

/// Layout of a persisted match string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFormat {
    /// Six fields without seconds, then the unit.
    Legacy,
    /// Seven fields, then the unit.
    Current,
}

impl MatchFormat {
    pub const fn token_count(self) -> usize {
        match self {
            MatchFormat::Legacy => 7,
            MatchFormat::Current => 8,
        }
    }

    /// Number of field tokens before the unit token.
    pub const fn field_count(self) -> usize {
        self.token_count() - 1
    }

    pub fn from_token_count(count: usize) -> Option<Self> {
        match count {
            7 => Some(MatchFormat::Legacy),
            8 => Some(MatchFormat::Current),
            _ => None,
        }
    }

    /// Layout of `s`, or `None` when it would decode to an empty pattern.
    pub fn detect(s: &str) -> Option<Self> {
        Self::from_token_count(tokenize(s).len())
    }
}

/// Render `spec` in the current 8-token layout.
pub fn encode(spec: &TriggerSpec) -> String {
    let mut tokens: Vec<String> = spec
        .fields()
        .into_iter()
        .map(|(_, value)| value.map_or_else(|| ABSENT.to_string(), |v| v.to_string()))
        .collect();
    tokens.push(spec.unit().code().to_string());
    tokens.join(&SEPARATOR.to_string())
}

/// Parse a match string in either layout.
///
/// The unit token is read but not trusted: the unit is always derived from
/// the decoded fields.
pub fn decode(s: &str) -> TriggerSpec {
    let tokens = tokenize(s);
    let Some(format) = MatchFormat::from_token_count(tokens.len()) else {
        debug!(tokens = tokens.len(), input = s, "unrecognized match string; using empty pattern");
        return TriggerSpec::default();
    };

    let (field_tokens, unit_token) = tokens.split_at(format.field_count());
    let mut spec = TriggerSpec::new();
    for (unit, token) in FIELD_ORDER.iter().zip(field_tokens) {
        spec.set_field(*unit, parse_token(token));
    }

    let stored = unit_token
        .first()
        .and_then(|t| parse_token(t))
        .and_then(Unit::from_code)
        .unwrap_or(Unit::None);
    if stored != spec.unit() {
        debug!(
            stored = %stored,
            derived = %spec.unit(),
            ?format,
            "persisted unit differs from derived unit; using derived"
        );
    }
    spec
}

/// Split on the separator, dropping trailing empty tokens.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split(SEPARATOR).collect();
    while tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// Base-10 integer, or `None` for the placeholder and anything unparseable.
fn parse_token(token: &str) -> Option<i32> {
    token.parse().ok()
}

impl TriggerSpec {
    /// Same as [`encode`].
    pub fn to_match_string(&self) -> String {
        encode(self)
    }

    /// Same as [`decode`].
    pub fn from_match_string(s: &str) -> Self {
        decode(s)
    }
}

impl FromStr for TriggerSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_marks_absent_fields() {
        let spec = TriggerSpec::new().with_month(5);
        assert_eq!(encode(&spec), "* 5 * * * * * 2");
    }

    #[test]
    fn encode_empty_spec() {
        assert_eq!(encode(&TriggerSpec::new()), "* * * * * * * -1");
    }

    #[test]
    fn encode_full_spec() {
        let spec = TriggerSpec::new()
            .with_year(2030)
            .with_month(12)
            .with_day(31)
            .with_weekday(3)
            .with_hour(23)
            .with_minute(59)
            .with_second(58);
        assert_eq!(encode(&spec), "2030 12 31 3 23 59 58 1");
    }

    #[test]
    fn encode_keeps_negative_values() {
        let spec = TriggerSpec::new().with_day(-1);
        assert_eq!(encode(&spec), "* * -1 * * * * 5");
    }

    #[test]
    fn decode_current_layout() {
        let spec = decode("* * * 2 9 30 15 7");
        assert_eq!(
            spec,
            TriggerSpec::new().with_weekday(2).with_hour(9).with_minute(30).with_second(15)
        );
        assert_eq!(spec.unit(), Unit::DayOfWeek);
    }

    #[test]
    fn decode_legacy_layout_leaves_second_absent() {
        let spec = decode("* * * * 9 0 11");
        assert_eq!(spec, TriggerSpec::new().with_hour(9).with_minute(0));
        assert_eq!(spec.second(), None);
        assert_eq!(spec.unit(), Unit::HourOfDay);
    }

    #[test]
    fn decode_other_token_counts_are_empty() {
        for input in ["", "1 2 3", "1 2 3 4 5", "1 2 3 4 5 6 7 8 9", "* * * * * * * * * *"] {
            let spec = decode(input);
            assert!(spec.is_empty(), "{input:?}");
            assert_eq!(spec.unit(), Unit::None);
        }
    }

    #[test]
    fn decode_garbage_tokens_become_absent() {
        let spec = decode("x 5 1.5 * 9 0x1 * 2");
        assert_eq!(spec, TriggerSpec::new().with_month(5).with_hour(9));
    }

    #[test]
    fn decode_ignores_stale_unit_token() {
        // Written before the unit was known.
        let spec = decode("* * * * 9 0 * -1");
        assert_eq!(spec.unit(), Unit::HourOfDay);
        // Unknown unit code.
        let spec = decode("* * 5 * * * * 42");
        assert_eq!(spec.unit(), Unit::DayOfMonth);
    }

    #[test]
    fn decode_drops_trailing_separators() {
        assert_eq!(decode("* 5 * * * * * 2 "), TriggerSpec::new().with_month(5));
    }

    #[test]
    fn decode_double_space_yields_empty_token() {
        // The extra empty token pushes the count to 9.
        assert!(decode("* 5  * * * * * 2").is_empty());
        // An empty field token parses as absent.
        assert_eq!(decode("* 5  * * * * 2"), TriggerSpec::new().with_month(5));
    }

    #[test]
    fn format_detection() {
        assert_eq!(MatchFormat::detect("* * * * 9 0 11"), Some(MatchFormat::Legacy));
        assert_eq!(MatchFormat::detect("* * * * 9 0 * 11"), Some(MatchFormat::Current));
        assert_eq!(MatchFormat::detect("* *"), None);
    }

    #[test]
    fn from_str_and_helpers_match_free_functions() {
        let raw = "2031 * 14 * * * * 1";
        let parsed: TriggerSpec = raw.parse().unwrap();
        assert_eq!(parsed, decode(raw));
        assert_eq!(TriggerSpec::from_match_string(raw), parsed);
        assert_eq!(parsed.to_match_string(), raw);
    }
}
