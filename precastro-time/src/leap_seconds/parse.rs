//! Readers for the two published leap-second file formats.
//!
//! - IERS `Leap_Second.dat`: `MJD day month year TAI-UTC` rows, expiry in a
//!   `# File expires on 28 June 2026` comment.
//! - NIST/IETF `leap-seconds.list`: `NTP-seconds TAI-UTC # comment` rows,
//!   last update on a `#$` line and expiry on a `#@` line, both in NTP seconds.
//!
//! Both files start in 1972. The pre-1972 drift entries of the builtin table
//! are kept in front of the file's entries.

use super::builtin::drift_era;
use super::table::{LeapSecondEntry, LeapSecondTable, LeapSecondTableBuilder};
use crate::calendar::{cal2jd, CalendarDate};
use crate::julian::JulianDate;
use crate::{TimeError, TimeResult};
use precastro_core::constants::SECONDS_PER_DAY;

/// MJD of 1900-01-01, the NTP epoch.
const NTP_EPOCH_MJD: i64 = 15020;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FileFormat {
    Iers,
    Nist,
}

impl FileFormat {
    fn label(self) -> &'static str {
        match self {
            FileFormat::Iers => "IERS Leap_Second.dat",
            FileFormat::Nist => "NIST leap-seconds.list",
        }
    }
}

/// Contents of a leap-second file before table validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondFile {
    pub format: FileFormat,
    pub entries: Vec<LeapSecondEntry>,
    pub updated: Option<CalendarDate>,
    pub expires: Option<CalendarDate>,
}

impl LeapSecondFile {
    /// Builder holding the drift era followed by this file's entries.
    pub fn into_builder(self) -> TimeResult<LeapSecondTableBuilder> {
        let expires = self.expires.ok_or_else(|| {
            TimeError::TableError(format!("{} has no expiry date", self.format.label()))
        })?;
        let first = self.entries.first().map(LeapSecondEntry::epoch).ok_or_else(|| {
            TimeError::TableError(format!("{} has no entries", self.format.label()))
        })?;

        let mut builder = LeapSecondTable::builder()
            .entries(drift_era().iter().copied().filter(|e| e.epoch() < first))
            .entries(self.entries)
            .label(self.format.label())
            .expires(expires);
        if let Some(updated) = self.updated {
            builder = builder.updated(updated);
        }
        Ok(builder)
    }
}

impl LeapSecondTable {
    /// Table from the text of an IERS `Leap_Second.dat` file.
    pub fn from_iers(content: &str) -> TimeResult<Self> {
        parse_iers(content)?.into_builder()?.build()
    }

    /// Table from the text of a NIST `leap-seconds.list` file.
    pub fn from_nist(content: &str) -> TimeResult<Self> {
        parse_nist(content)?.into_builder()?.build()
    }
}

pub fn parse_iers(content: &str) -> TimeResult<LeapSecondFile> {
    let mut entries = Vec::new();
    let mut expires = None;

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(comment) = line.strip_prefix('#') {
            if let Some(rest) = comment.trim().strip_prefix("File expires on") {
                expires = Some(parse_day_month_name_year(rest.trim(), index + 1)?);
            }
            continue;
        }
        entries.push(parse_iers_line(line, index + 1)?);
    }

    if entries.is_empty() {
        return Err(TimeError::TableError(
            "no leap second entries found in IERS data".to_string(),
        ));
    }

    Ok(LeapSecondFile {
        format: FileFormat::Iers,
        entries,
        updated: None,
        expires,
    })
}

fn parse_iers_line(line: &str, line_no: usize) -> TimeResult<LeapSecondEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 5 {
        return Err(line_error(line_no, "expected MJD, day, month, year and TAI-UTC"));
    }

    let mjd: f64 = parse_field(fields[0], line_no)?;
    let day: i32 = parse_field(fields[1], line_no)?;
    let month: i32 = parse_field(fields[2], line_no)?;
    let year: i32 = parse_field(fields[3], line_no)?;
    let offset: f64 = parse_field(fields[4], line_no)?;

    if day != 1 {
        return Err(line_error(line_no, "leap second steps fall on the first of a month"));
    }
    let (_, expected_mjd) = cal2jd(year, month, day).map_err(|e| line_error(line_no, &e.to_string()))?;
    if mjd != expected_mjd {
        return Err(line_error(
            line_no,
            &format!("MJD {} does not match {:04}-{:02}-01 (MJD {})", mjd, year, month, expected_mjd),
        ));
    }

    Ok(LeapSecondEntry::new(year, month as u8, offset))
}

fn parse_day_month_name_year(text: &str, line_no: usize) -> TimeResult<CalendarDate> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(line_error(line_no, "expected an expiry date like '28 June 2026'"));
    }

    let day: u8 = parse_field(fields[0], line_no)?;
    let month = MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(fields[1]))
        .map(|i| i as u8 + 1)
        .ok_or_else(|| line_error(line_no, &format!("unknown month '{}'", fields[1])))?;
    let year: i32 = parse_field(fields[2], line_no)?;

    CalendarDate::new(year, month, day).map_err(|e| line_error(line_no, &e.to_string()))
}

pub fn parse_nist(content: &str) -> TimeResult<LeapSecondFile> {
    let mut entries = Vec::new();
    let mut updated = None;
    let mut expires = None;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = line.strip_prefix("#$") {
            updated = Some(ntp_to_date(parse_field(value.trim(), line_no)?, line_no)?);
            continue;
        }
        if let Some(value) = line.strip_prefix("#@") {
            expires = Some(ntp_to_date(parse_field(value.trim(), line_no)?, line_no)?);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let data = line.split('#').next().unwrap_or("");
        let fields: Vec<&str> = data.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(line_error(line_no, "expected NTP seconds and TAI-UTC"));
        }
        let date = ntp_to_date(parse_field(fields[0], line_no)?, line_no)?;
        if date.day != 1 {
            return Err(line_error(line_no, "leap second steps fall on the first of a month"));
        }
        let offset: f64 = parse_field(fields[1], line_no)?;
        entries.push(LeapSecondEntry::new(date.year, date.month, offset));
    }

    if entries.is_empty() {
        return Err(TimeError::TableError(
            "no leap second entries found in NIST data".to_string(),
        ));
    }

    Ok(LeapSecondFile {
        format: FileFormat::Nist,
        entries,
        updated,
        expires,
    })
}

fn ntp_to_date(ntp_seconds: i64, line_no: usize) -> TimeResult<CalendarDate> {
    if ntp_seconds < 0 || ntp_seconds % SECONDS_PER_DAY != 0 {
        return Err(line_error(
            line_no,
            &format!("NTP timestamp {} is not a whole day", ntp_seconds),
        ));
    }
    let mjd = NTP_EPOCH_MJD + ntp_seconds / SECONDS_PER_DAY;
    CalendarDate::from_julian_date(JulianDate::from_mjd(mjd as f64))
}

fn parse_field<T: std::str::FromStr>(field: &str, line_no: usize) -> TimeResult<T> {
    field
        .parse::<T>()
        .map_err(|_| line_error(line_no, &format!("cannot parse '{}'", field)))
}

fn line_error(line_no: usize, message: &str) -> TimeError {
    TimeError::TableError(format!("line {}: {}", line_no, message))
}
