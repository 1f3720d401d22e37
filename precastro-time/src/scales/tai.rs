//! International Atomic Time.
//!
//! TAI has uniform 86400 s days and serves as the hub between UTC and the
//! dynamical scales: `TT = TAI + 32.184 s`, `UTC = TAI - (TAI-UTC)`.

use crate::calendar::calendar_to_julian_date;
use crate::civil::{julian_date_to_civil, CivilDateTime};
use crate::julian::JulianDate;
use crate::leap_seconds::builtin_table;
use crate::parsing::parse_iso8601;
use crate::scales::TimeScale;
use crate::{TimeError, TimeResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TAI(JulianDate);

impl TAI {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    pub fn from_calendar(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> TimeResult<Self> {
        let jd = calendar_to_julian_date(TimeScale::TAI, builtin_table(), year, month, day, hour, minute, second)?;
        Ok(Self(jd.into_value()))
    }

    pub fn to_civil(&self, digits: i32) -> TimeResult<CivilDateTime> {
        Ok(julian_date_to_civil(TimeScale::TAI, builtin_table(), self.0, digits)?.into_value())
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0.add_seconds(seconds))
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0.add_days(days))
    }
}

impl fmt::Display for TAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TAI {}", self.0)
    }
}

impl From<JulianDate> for TAI {
    fn from(jd: JulianDate) -> Self {
        Self(jd)
    }
}

impl FromStr for TAI {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        let parsed = parse_iso8601(s)?;
        let jd = parsed.to_julian_date(TimeScale::TAI, builtin_table())?;
        Ok(Self(jd.into_value()))
    }
}
