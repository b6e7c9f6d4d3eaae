//! ISO 8601 durations.
//!
//! Components are kept as written: `PT90M` stays ninety minutes rather
//! than being folded into `PT1H30M`. Fractions are allowed on seconds
//! only. `Display` writes the shortest spelling of the components; the
//! exact wire spelling travels in [`Lexical`](super::Lexical).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// ISO 8601 duration (`[-]PnYnMnWnDTnHnMnS`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IsoDuration {
    pub negative: bool,
    pub years: Option<u64>,
    pub months: Option<u64>,
    pub weeks: Option<u64>,
    pub days: Option<u64>,
    pub hours: Option<u64>,
    pub minutes: Option<u64>,
    pub seconds: Option<u64>,
    /// Fraction of `seconds`, in nanoseconds.
    pub nanoseconds: u32,
}

impl IsoDuration {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidDuration {
            input: input.to_owned(),
            reason: reason.to_owned(),
        };

        let mut d = IsoDuration::default();
        let mut rest = input;
        if let Some(r) = rest.strip_prefix('-') {
            d.negative = true;
            rest = r;
        }
        rest = rest.strip_prefix('P').ok_or_else(|| invalid("missing 'P' designator"))?;

        let (date_part, time_part) = match rest.split_once('T') {
            Some((date, time)) => {
                if time.is_empty() {
                    return Err(invalid("'T' without time components"));
                }
                (date, Some(time))
            }
            None => (rest, None),
        };

        // Designators must appear in this order, each at most once.
        let mut order = 0usize;
        for (number, designator) in components(date_part).map_err(|r| invalid(r))? {
            let rank = match designator {
                'Y' => 1,
                'M' => 2,
                'W' => 3,
                'D' => 4,
                _ => return Err(invalid("unknown date designator")),
            };
            if rank <= order {
                return Err(invalid("date designators out of order"));
            }
            order = rank;
            let n = whole(number).ok_or_else(|| invalid("fraction only allowed on seconds"))?;
            match designator {
                'Y' => d.years = Some(n),
                'M' => d.months = Some(n),
                'W' => d.weeks = Some(n),
                _ => d.days = Some(n),
            }
        }

        if let Some(time) = time_part {
            let mut order = 0usize;
            for (number, designator) in components(time).map_err(|r| invalid(r))? {
                let rank = match designator {
                    'H' => 1,
                    'M' => 2,
                    'S' => 3,
                    _ => return Err(invalid("unknown time designator")),
                };
                if rank <= order {
                    return Err(invalid("time designators out of order"));
                }
                order = rank;
                if designator == 'S' {
                    let (secs, nanos) = seconds(number).ok_or_else(|| invalid("bad seconds"))?;
                    d.seconds = Some(secs);
                    d.nanoseconds = nanos;
                } else {
                    let n = whole(number).ok_or_else(|| invalid("fraction only allowed on seconds"))?;
                    if designator == 'H' { d.hours = Some(n) } else { d.minutes = Some(n) }
                }
            }
        }

        if d.is_empty() {
            return Err(invalid("no components"));
        }
        Ok(d)
    }

    fn is_empty(&self) -> bool {
        [self.years, self.months, self.weeks, self.days, self.hours, self.minutes, self.seconds]
            .iter()
            .all(Option::is_none)
    }

    /// Approximate length, counting a year as 365 days and a month as 30.
    /// Saturates at `chrono::Duration::MAX`.
    pub fn to_chrono(&self) -> chrono::Duration {
        let secs = [
            (self.years, 365 * 86_400),
            (self.months, 30 * 86_400),
            (self.weeks, 7 * 86_400),
            (self.days, 86_400),
            (self.hours, 3_600),
            (self.minutes, 60),
            (self.seconds, 1),
        ]
        .iter()
        .fold(0u64, |acc, (n, unit)| acc.saturating_add(n.unwrap_or(0).saturating_mul(*unit)));

        let total = i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .and_then(|d| d.checked_add(&chrono::Duration::nanoseconds(self.nanoseconds as i64)))
            .unwrap_or(chrono::Duration::MAX);
        if self.negative { -total } else { total }
    }
}

/// Split `12Y3M` into `[("12", 'Y'), ("3", 'M')]`.
fn components(s: &str) -> std::result::Result<Vec<(&str, char)>, &'static str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            continue;
        }
        if i == start {
            return Err("designator without a number");
        }
        out.push((&s[start..i], c));
        start = i + c.len_utf8();
    }
    if start != s.len() {
        return Err("number without a designator");
    }
    Ok(out)
}

fn whole(number: &str) -> Option<u64> {
    if number.bytes().all(|b| b.is_ascii_digit()) { number.parse().ok() } else { None }
}

fn seconds(number: &str) -> Option<(u64, u32)> {
    let (int, frac) = match number.split_once(['.', ',']) {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    let secs = whole(int)?;
    if frac.is_empty() {
        return if number.len() == int.len() { Some((secs, 0)) } else { None };
    }
    if frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let nanos: u32 = format!("{frac:0<9}").parse().ok()?;
    Some((secs, nanos))
}

impl FromStr for IsoDuration {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> { IsoDuration::parse(s) }
}

impl fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative { write!(f, "-")?; }
        write!(f, "P")?;
        if let Some(n) = self.years { write!(f, "{n}Y")?; }
        if let Some(n) = self.months { write!(f, "{n}M")?; }
        if let Some(n) = self.weeks { write!(f, "{n}W")?; }
        if let Some(n) = self.days { write!(f, "{n}D")?; }
        if self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some() {
            write!(f, "T")?;
            if let Some(n) = self.hours { write!(f, "{n}H")?; }
            if let Some(n) = self.minutes { write!(f, "{n}M")?; }
            if let Some(n) = self.seconds {
                if self.nanoseconds == 0 {
                    write!(f, "{n}S")?;
                } else {
                    let frac = format!("{:09}", self.nanoseconds);
                    write!(f, "{n}.{}S", frac.trim_end_matches('0'))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let d = IsoDuration::parse("P1Y2M3DT4H5M6.5S").unwrap();
        assert_eq!(d.years, Some(1));
        assert_eq!(d.months, Some(2));
        assert_eq!(d.days, Some(3));
        assert_eq!(d.hours, Some(4));
        assert_eq!(d.minutes, Some(5));
        assert_eq!(d.seconds, Some(6));
        assert_eq!(d.nanoseconds, 500_000_000);
        assert_eq!(d.to_string(), "P1Y2M3DT4H5M6.5S");
    }

    #[test]
    fn test_lexical_form_is_preserved() {
        for text in ["PT90M", "P2W", "-P1D", "PT0S", "PT1.25S"] {
            assert_eq!(IsoDuration::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "P", "PT", "1D", "P1H", "PT1D", "P1M1Y", "P1.5D", "PT1.S", "P-1D", "PTM", "P1DT"] {
            assert!(IsoDuration::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_to_chrono() {
        let d = IsoDuration::parse("P1DT1H").unwrap();
        assert_eq!(d.to_chrono(), chrono::Duration::hours(25));
        assert_eq!(IsoDuration::parse("-PT30S").unwrap().to_chrono(), chrono::Duration::seconds(-30));
    }
}
