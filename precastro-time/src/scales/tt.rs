//! Terrestrial Time.
//!
//! `TT = TAI + 32.184 s`. TT is the argument of geocentric ephemerides, and
//! Julian epochs (`J2000.0`, `J2024.5`...) are conventionally TT.
//!
//! ```
//! use precastro_time::TT;
//!
//! let tt: TT = "2000-01-01T12:00:00".parse().unwrap();
//! assert_eq!(tt, TT::j2000());
//! assert_eq!(tt.centuries_since_j2000(), 0.0);
//! ```

use crate::calendar::calendar_to_julian_date;
use crate::civil::{julian_date_to_civil, CivilDateTime};
use crate::julian::JulianDate;
use crate::leap_seconds::builtin_table;
use crate::parsing::parse_iso8601;
use crate::scales::TimeScale;
use crate::{TimeError, TimeResult};
use precastro_core::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TT(JulianDate);

impl TT {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    /// 2000-01-01T12:00:00 TT, JD 2451545.0.
    pub fn j2000() -> Self {
        Self(JulianDate::j2000())
    }

    /// From a Julian epoch such as 2024.5.
    pub fn from_julian_epoch(epoch: f64) -> Self {
        Self(JulianDate::from_julian_epoch(epoch))
    }

    pub fn julian_epoch(&self) -> f64 {
        self.0.julian_epoch()
    }

    pub fn from_calendar(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> TimeResult<Self> {
        let jd = calendar_to_julian_date(TimeScale::TT, builtin_table(), year, month, day, hour, minute, second)?;
        Ok(Self(jd.into_value()))
    }

    pub fn to_civil(&self, digits: i32) -> TimeResult<CivilDateTime> {
        Ok(julian_date_to_civil(TimeScale::TT, builtin_table(), self.0, digits)?.into_value())
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self(self.0.add_seconds(seconds))
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0.add_days(days))
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        ((self.0.jd1() - J2000_JD) + self.0.jd2()) / DAYS_PER_JULIAN_CENTURY
    }
}

impl fmt::Display for TT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TT {}", self.0)
    }
}

impl From<JulianDate> for TT {
    fn from(jd: JulianDate) -> Self {
        Self(jd)
    }
}

impl FromStr for TT {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        let parsed = parse_iso8601(s)?;
        let jd = parsed.to_julian_date(TimeScale::TT, builtin_table())?;
        Ok(Self(jd.into_value()))
    }
}
