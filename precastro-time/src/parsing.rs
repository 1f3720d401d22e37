//! ISO 8601 style date/time parsing.
//!
//! Accepts `YYYY-MM-DDTHH:MM:SS[.fff][Z]`, a space instead of `T`, `/` as the
//! date separator (the form [`CivilDateTime`](crate::CivilDateTime) prints),
//! and a bare `YYYY-MM-DD` meaning midnight. Seconds may reach 60.999... so
//! that leap seconds can be written; whether the minute really has 61 seconds
//! is decided when the fields are converted with a leap-second table.

use crate::calendar::calendar_to_julian_date;
use crate::julian::JulianDate;
use crate::leap_seconds::LeapSecondTable;
use crate::scales::TimeScale;
use crate::validity::Validated;
use crate::{TimeError, TimeResult};

const MAX_ISO8601_LENGTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl ParsedDateTime {
    /// Julian Date of these fields read in `scale`.
    pub fn to_julian_date(&self, scale: TimeScale, table: &LeapSecondTable) -> TimeResult<Validated<JulianDate>> {
        calendar_to_julian_date(
            scale,
            table,
            self.year,
            self.month as i32,
            self.day as i32,
            self.hour as i32,
            self.minute as i32,
            self.second,
        )
    }
}

pub fn parse_iso8601(s: &str) -> TimeResult<ParsedDateTime> {
    let s = s.trim();
    if s.len() > MAX_ISO8601_LENGTH {
        return Err(TimeError::ParseError("Input too long".to_string()));
    }
    let s = s.strip_suffix('Z').unwrap_or(s);

    let (date_part, time_part) = match s.find(|c: char| c == 'T' || c == ' ') {
        Some(pos) => (&s[..pos], Some(&s[pos + 1..])),
        None => (s, None),
    };

    let (year, month, day) = parse_date(date_part)?;
    let (hour, minute, second) = match time_part {
        Some(time) => parse_time(time.trim_start())?,
        None => (0, 0, 0.0),
    };

    Ok(ParsedDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

fn parse_date(date: &str) -> TimeResult<(i32, u8, u8)> {
    let (negative, unsigned) = match date.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, date.strip_prefix('+').unwrap_or(date)),
    };

    let separator = if unsigned.contains('/') { '/' } else { '-' };
    let fields: Vec<&str> = unsigned.split(separator).collect();
    if fields.len() != 3 {
        return Err(TimeError::ParseError(format!(
            "Invalid date format: '{}'. Expected YYYY-MM-DD",
            date
        )));
    }

    if fields[0].len() != 4 {
        return Err(TimeError::ParseError(format!(
            "Invalid year format: '{}'",
            fields[0]
        )));
    }
    let year = parse_digits(fields[0], "year", 4)? as i32;
    let year = if negative { -year } else { year };

    let month = parse_digits(fields[1], "month", 2)? as u8;
    let day = parse_digits(fields[2], "day", 2)? as u8;

    if !(1..=12).contains(&month) {
        return Err(TimeError::ParseError(format!("Month out of range: {}", month)));
    }
    if !(1..=31).contains(&day) {
        return Err(TimeError::ParseError(format!("Day out of range: {}", day)));
    }

    Ok((year, month, day))
}

fn parse_time(time: &str) -> TimeResult<(u8, u8, f64)> {
    let fields: Vec<&str> = time.split(':').collect();
    if fields.len() != 3 {
        return Err(TimeError::ParseError(format!(
            "Invalid time format: '{}'. Expected HH:MM:SS",
            time
        )));
    }

    let hour = parse_digits(fields[0], "hour", 2)? as u8;
    let minute = parse_digits(fields[1], "minute", 2)? as u8;

    let seconds = fields[2];
    if seconds.is_empty() || !seconds.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return Err(TimeError::ParseError(format!("Invalid second: '{}'", seconds)));
    }
    let second = seconds
        .parse::<f64>()
        .map_err(|_| TimeError::ParseError(format!("Invalid second: '{}'", seconds)))?;

    if hour > 23 {
        return Err(TimeError::ParseError(format!("Hour out of range: {}", hour)));
    }
    if minute > 59 {
        return Err(TimeError::ParseError(format!("Minute out of range: {}", minute)));
    }
    if second >= 61.0 {
        return Err(TimeError::ParseError(format!("Second out of range: {}", second)));
    }

    Ok((hour, minute, second))
}

fn parse_digits(field: &str, name: &str, max_len: usize) -> TimeResult<u32> {
    if field.is_empty() || field.len() > max_len {
        return Err(TimeError::ParseError(format!(
            "Invalid {} format: '{}'",
            name, field
        )));
    }
    field.bytes().try_fold(0u32, |acc, b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + (b - b'0') as u32)
        } else {
            Err(TimeError::ParseError(format!("Invalid {}: '{}'", name, field)))
        }
    })
}
