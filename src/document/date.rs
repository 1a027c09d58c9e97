//! Date recognition for string values.
//!
//! Two shapes are accepted: an ISO-like `YYYY-MM-DD` prefix with an optional
//! time and offset, and US-style `M/D/YYYY`. Both must name a real calendar day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// A recognized date, with the parts that were actually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    /// Explicit UTC offset, if one was written (`Z` counts as +00:00).
    pub offset: Option<FixedOffset>,
}

impl ParsedDate {
    fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }

    /// Instant in UTC. Dates without an offset are taken as UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        let Some(offset) = self.offset else {
            return Utc.from_utc_datetime(&self.naive());
        };
        match offset.from_local_datetime(&self.naive()).single() {
            Some(dt) => dt.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&self.naive()),
        }
    }

    /// RFC 3339 form of the instant in UTC.
    pub fn iso(&self) -> String {
        self.to_utc().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    pub fn unix_seconds(&self) -> i64 {
        self.to_utc().timestamp()
    }

    pub fn unix_millis(&self) -> i64 {
        self.to_utc().timestamp_millis()
    }

    /// Human readable form, e.g. `Tuesday, 12 March 2024`.
    pub fn long_form(&self) -> String {
        self.date.format("%A, %-d %B %Y").to_string()
    }
}

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.(\d{1,9}))?)?\s*(Z|[+-]\d{2}:?\d{2})?)?",
        )
        .unwrap()
    })
}

fn us_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap())
}

pub fn is_date(s: &str) -> bool {
    parse(s).is_some()
}

/// Parse a date string, rejecting impossible calendar dates such as `2023-02-30`.
///
/// ISO forms only need a date prefix: `2024-03-12 is a Tuesday` parses, with
/// whatever follows the date (and optional time) ignored. A digit right after
/// the match rejects the string, so `2024-03-123` is not a date.
pub fn parse(s: &str) -> Option<ParsedDate> {
    let s = s.trim();
    if let Some(caps) = iso_re().captures(s)
        && !s[caps[0].len()..].starts_with(|c: char| c.is_ascii_digit())
    {
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?;
        let time = match (num(4), num(5)) {
            (Some(h), Some(m)) => {
                let nanos = caps
                    .get(7)
                    .map(|f| format!("{:0<9}", f.as_str()).parse::<u32>().unwrap_or(0))
                    .unwrap_or(0);
                Some(NaiveTime::from_hms_nano_opt(h, m, num(6).unwrap_or(0), nanos)?)
            }
            _ => None,
        };
        let offset = match caps.get(8).map(|m| m.as_str()) {
            Some(tz) => Some(parse_offset(tz)?),
            None => None,
        };
        return Some(ParsedDate { date, time, offset });
    }
    if let Some(caps) = us_re().captures(s) {
        let date = NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
        )?;
        return Some(ParsedDate {
            date,
            time: None,
            offset: None,
        });
    }
    None
}

fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let digits: String = tz[1..].chars().filter(|c| c.is_ascii_digit()).collect();
    let hours: i32 = digits.get(0..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..4)?.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_dates() {
        assert!(is_date("2024-03-12"));
        assert!(is_date("2024-03-12T10:30:00Z"));
        assert!(is_date("2024-03-12 10:30"));
        assert!(is_date("2024-03-12T10:30:00.123+02:00"));
        assert!(!is_date("2023-02-30"));
        assert!(!is_date("2024-13-01"));
        assert!(!is_date("2024-3-12"));
    }

    #[test]
    fn test_iso_date_prefix() {
        let parsed = parse("2024-03-12 is a Tuesday").unwrap();
        assert_eq!(parsed.long_form(), "Tuesday, 12 March 2024");
        assert!(parsed.time.is_none());

        let with_time = parse("2024-03-12T10:30:00Z (deploy window)").unwrap();
        assert_eq!(with_time.iso(), "2024-03-12T10:30:00.000Z");

        assert!(!is_date("2024-03-123"));
        assert!(!is_date("2023-02-30 is not a day"));
    }

    #[test]
    fn test_us_dates() {
        assert!(is_date("3/12/2024"));
        assert!(is_date("12/31/1999"));
        assert!(!is_date("31/12/1999"));
        assert!(!is_date("2/30/2024"));
    }

    #[test]
    fn test_timestamps() {
        let parsed = parse("1970-01-02").unwrap();
        assert_eq!(parsed.unix_seconds(), 86_400);
        assert_eq!(parsed.unix_millis(), 86_400_000);

        let with_offset = parse("1970-01-01T02:00:00+02:00").unwrap();
        assert_eq!(with_offset.unix_seconds(), 0);
        assert_eq!(with_offset.iso(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_long_form() {
        assert_eq!(parse("3/12/2024").unwrap().long_form(), "Tuesday, 12 March 2024");
    }
}
