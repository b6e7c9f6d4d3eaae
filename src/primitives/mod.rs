//! # Primitive lexical codecs
//!
//! One parser and one emitter per [`ScalarKind`]. Parsers never fail
//! loudly: they return `None` when the literal's shape is wrong for the
//! kind, so resolution can move on to the next declared alternative.
//!
//! | Kind | Wire | Rust |
//! |------|------|------|
//! | `NonNegativeInteger` | integer ≥ 0, or its decimal string | `u64` |
//! | `Float` | any finite number, or its decimal string | `f64` |
//! | `Boolean` | `true` / `false` | `bool` |
//! | `DateTime` | RFC3339 string | `DateTime<FixedOffset>` |
//! | `Duration` | ISO 8601 string | [`IsoDuration`] |
//! | `String` | string | `String` |
//! | `LanguageTag` | BCP47 string | `String` |
//! | `MimeType` | `type/subtype[;params]` | `String` |
//! | `Units` | `cm`, `feet`, `inches`, `km`, `m`, `miles` | [`Units`] |
//! | `Iri` | absolute IRI string | [`Iri`] |
//!
//! `Float`, `DateTime` and `Duration` accept several spellings of one
//! value and are wrapped in [`Lexical`] so the spelling read is the
//! spelling written. A decimal string in a `NonNegativeInteger` slot is
//! the one literal that comes back in canonical form (`"42"` as `42`).

pub mod duration;
pub mod iri;
pub mod lexical;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};

pub use duration::IsoDuration;
pub use iri::Iri;
pub use lexical::Lexical;

use crate::model::{PropertyValue, Value};
use crate::schema::ScalarKind;
use crate::{Error, Result};

// ============================================================================
// Units
// ============================================================================

/// Distance units accepted by the `units` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Cm,
    Feet,
    Inches,
    Km,
    M,
    Miles,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Cm => "cm",
            Units::Feet => "feet",
            Units::Inches => "inches",
            Units::Km => "km",
            Units::M => "m",
            Units::Miles => "miles",
        }
    }
}

impl FromStr for Units {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s {
            "cm" => Ok(Units::Cm),
            "feet" => Ok(Units::Feet),
            "inches" => Ok(Units::Inches),
            "km" => Ok(Units::Km),
            "m" => Ok(Units::M),
            "miles" => Ok(Units::Miles),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Date-time
// ============================================================================

pub fn parse_date_time(input: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(input).map_err(|e| Error::InvalidDateTime {
        input: input.to_owned(),
        reason: e.to_string(),
    })
}

/// RFC3339 with `Z` for UTC and only as many fractional digits as needed.
pub fn format_date_time(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn encode_date_time(dt: &DateTime<FixedOffset>) -> Value {
    Value::String(format_date_time(dt))
}

// ============================================================================
// Lexical checks
// ============================================================================

/// BCP47 shape: alphanumeric subtags of 1–8 characters joined by `-`,
/// the first purely alphabetic.
pub fn is_language_tag(s: &str) -> bool {
    let mut subtags = s.split('-');
    let first_ok = subtags
        .next()
        .is_some_and(|t| (1..=8).contains(&t.len()) && t.bytes().all(|b| b.is_ascii_alphabetic()));
    first_ok && subtags.all(|t| (1..=8).contains(&t.len()) && t.bytes().all(|b| b.is_ascii_alphanumeric()))
}

fn is_mime_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_alphanumeric() || b"!#$&-^_.+".contains(&b))
}

/// `type/subtype` optionally followed by `;`-separated parameters.
pub fn is_mime_type(s: &str) -> bool {
    let essence = s.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some((ty, sub)) => is_mime_token(ty) && is_mime_token(sub),
        None => false,
    }
}

fn parse_non_negative_integer(value: &Value) -> Option<u64> {
    match value {
        Value::Int(i) => u64::try_from(*i).ok(),
        // only what `encode_non_negative_integer` writes for values past i64
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 && *f > i64::MAX as f64 && *f <= u64::MAX as f64 => {
            Some(*f as u64)
        }
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            s.parse::<i64>().ok().map(|i| i as u64)
        }
        _ => None,
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) if f.is_finite() => Some(*f),
        Value::String(s) => {
            // f64::from_str also takes "inf" and "NaN"; the wire form does not
            let numeric = !s.is_empty()
                && s.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
            if numeric { s.parse::<f64>().ok().filter(|f| f.is_finite()) } else { None }
        }
        _ => None,
    }
}

// ============================================================================
// Parse / emit
// ============================================================================

/// Try to read `value` as `kind`. `None` means the literal has the wrong
/// shape for this kind.
pub fn parse_scalar(kind: ScalarKind, value: &Value) -> Option<PropertyValue> {
    match kind {
        ScalarKind::NonNegativeInteger => {
            parse_non_negative_integer(value).map(PropertyValue::NonNegativeInteger)
        }
        ScalarKind::Float => {
            parse_float(value).map(|f| PropertyValue::Float(Lexical::read(f, value, encode_float)))
        }
        ScalarKind::Boolean => match value {
            Value::Bool(b) => Some(PropertyValue::Boolean(*b)),
            _ => None,
        },
        ScalarKind::DateTime => value
            .as_str()
            .and_then(|s| parse_date_time(s).ok())
            .map(|dt| PropertyValue::DateTime(Lexical::read(dt, value, encode_date_time))),
        ScalarKind::Duration => value
            .as_str()
            .and_then(|s| IsoDuration::parse(s).ok())
            .map(|d| PropertyValue::Duration(Lexical::read(d, value, encode_duration))),
        ScalarKind::String => value.as_str().map(|s| PropertyValue::String(s.to_owned())),
        ScalarKind::LanguageTag => value
            .as_str()
            .filter(|s| is_language_tag(s))
            .map(|s| PropertyValue::LanguageTag(s.to_owned())),
        ScalarKind::MimeType => value
            .as_str()
            .filter(|s| is_mime_type(s))
            .map(|s| PropertyValue::MimeType(s.to_owned())),
        ScalarKind::Units => value
            .as_str()
            .and_then(|s| s.parse::<Units>().ok())
            .map(PropertyValue::Units),
        ScalarKind::Iri => value
            .as_str()
            .and_then(|s| Iri::parse(s).ok())
            .map(PropertyValue::Iri),
    }
}

pub fn encode_float(f: &f64) -> Value {
    Value::Float(*f)
}

pub fn encode_duration(d: &IsoDuration) -> Value {
    Value::String(d.to_string())
}

pub fn encode_non_negative_integer(n: u64) -> Value {
    match i64::try_from(n) {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Float(n as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_shapes() {
        let p = |v: Value| parse_scalar(ScalarKind::NonNegativeInteger, &v);
        assert_eq!(p(Value::Int(50)), Some(PropertyValue::NonNegativeInteger(50)));
        // a float literal is not an integer, whatever its fraction
        assert_eq!(p(Value::Float(50.0)), None);
        assert_eq!(p(Value::Float(1.8e19)), Some(PropertyValue::NonNegativeInteger(18_000_000_000_000_000_000)));
        assert_eq!(p(Value::from("42")), Some(PropertyValue::NonNegativeInteger(42)));
        assert_eq!(p(Value::Int(-1)), None);
        assert_eq!(p(Value::Float(3.5)), None);
        assert_eq!(p(Value::from("3.5")), None);
        assert_eq!(p(Value::from("-3")), None);
        assert_eq!(p(Value::from("not-a-number")), None);
        assert_eq!(p(Value::Bool(true)), None);
    }

    #[test]
    fn test_float_shapes() {
        let p = |v: Value| parse_scalar(ScalarKind::Float, &v);
        assert_eq!(p(Value::Int(2)), Some(PropertyValue::Float(2.0.into())));
        assert_eq!(p(Value::from("-12.5e1")), Some(PropertyValue::Float((-125.0).into())));
        assert_eq!(p(Value::from("inf")), None);
        assert_eq!(p(Value::from("NaN")), None);
        assert_eq!(p(Value::from("")), None);
    }

    #[test]
    fn test_date_time_roundtrip() {
        let dt = parse_date_time("2015-02-10T15:04:55Z").unwrap();
        assert_eq!(format_date_time(&dt), "2015-02-10T15:04:55Z");
        let dt = parse_date_time("2015-02-10T15:04:55.250+02:00").unwrap();
        assert_eq!(format_date_time(&dt), "2015-02-10T15:04:55.250+02:00");
        assert!(parse_date_time("yesterday").is_err());
    }

    #[test]
    fn test_non_canonical_spellings_are_kept() {
        let read = |kind, v: Value| parse_scalar(kind, &v).map(|pv| pv.encode());
        for v in [Value::Int(36), Value::from("36.50"), Value::Float(36.5)] {
            assert_eq!(read(ScalarKind::Float, v.clone()), Some(v));
        }
        for s in ["2024-03-01T12:00:00+00:00", "2024-03-01T12:00:00.500Z", "2024-03-01T12:00:00Z"] {
            assert_eq!(read(ScalarKind::DateTime, Value::from(s)), Some(Value::from(s)));
        }
        for s in ["PT1.50S", "PT1,5S", "PT1.5S"] {
            assert_eq!(read(ScalarKind::Duration, Value::from(s)), Some(Value::from(s)));
        }
        // the integer kind alone canonicalizes
        assert_eq!(read(ScalarKind::NonNegativeInteger, Value::from("42")), Some(Value::Int(42)));
    }

    #[test]
    fn test_lexical_checks() {
        assert!(is_language_tag("en"));
        assert!(is_language_tag("zh-Hant-TW"));
        assert!(!is_language_tag("en_US"));
        assert!(!is_language_tag(""));
        assert!(!is_language_tag("1en"));
        assert!(is_mime_type("text/html"));
        assert!(is_mime_type("application/ld+json; profile=\"x\""));
        assert!(!is_mime_type("html"));
        assert!(!is_mime_type("text/"));
    }

    #[test]
    fn test_units() {
        assert_eq!(
            parse_scalar(ScalarKind::Units, &Value::from("km")),
            Some(PropertyValue::Units(Units::Km))
        );
        assert_eq!(parse_scalar(ScalarKind::Units, &Value::from("parsec")), None);
    }
}
