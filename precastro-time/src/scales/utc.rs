//! Coordinated Universal Time.
//!
//! A UTC Julian Date counts UTC days: the fraction of a day containing a leap
//! second is scaled by 86401 s, so `23:59:60.5` is representable and sorts
//! before the next midnight. Building or reading one therefore needs a
//! leap-second table.
//!
//! ```
//! use precastro_time::leap_seconds::builtin_table;
//! use precastro_time::UTC;
//!
//! let leap = UTC::from_calendar(2016, 12, 31, 23, 59, 60.25, builtin_table()).unwrap();
//! assert!(!leap.is_dubious());
//! let civil = leap.into_value().to_civil(2, builtin_table()).unwrap().into_value();
//! assert_eq!(civil.to_string(), "2016/12/31 23:59:60.25");
//! ```

use crate::calendar::calendar_to_julian_date;
use crate::civil::{julian_date_to_civil, CivilDateTime};
use crate::constants::UNIX_EPOCH_JD;
use crate::julian::JulianDate;
use crate::leap_seconds::{builtin_table, LeapSecondTable};
use crate::parsing::parse_iso8601;
use crate::scales::TimeScale;
use crate::validity::Validated;
use crate::{TimeError, TimeResult};
use precastro_core::constants::{NANOSECONDS_PER_SECOND_F64, SECONDS_PER_DAY, SECONDS_PER_DAY_F64};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UTC(JulianDate);

impl UTC {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    /// From POSIX seconds and nanoseconds since 1970-01-01T00:00:00 UTC.
    ///
    /// POSIX time has no leap seconds, so a timestamp inside one maps onto the
    /// following second.
    pub fn from_posix(seconds: i64, nanos: u32) -> Self {
        let days = seconds.div_euclid(SECONDS_PER_DAY);
        let remainder = seconds.rem_euclid(SECONDS_PER_DAY);
        let jd1 = UNIX_EPOCH_JD + days as f64;
        let jd2 = (remainder as f64 + nanos as f64 / NANOSECONDS_PER_SECOND_F64) / SECONDS_PER_DAY_F64;
        Self(JulianDate::new(jd1, jd2))
    }

    /// The system clock.
    pub fn now() -> Self {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Self::from_posix(elapsed.as_secs() as i64, elapsed.subsec_nanos())
    }

    /// From calendar fields; `second` may reach 60.999... on a leap second day.
    pub fn from_calendar(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: f64,
        table: &LeapSecondTable,
    ) -> TimeResult<Validated<Self>> {
        Ok(calendar_to_julian_date(TimeScale::UTC, table, year, month, day, hour, minute, second)?.map(Self))
    }

    /// Broken-down date and time rounded to `digits` decimal places of a
    /// second.
    pub fn to_civil(&self, digits: i32, table: &LeapSecondTable) -> TimeResult<Validated<CivilDateTime>> {
        julian_date_to_civil(TimeScale::UTC, table, self.0, digits)
    }
}

impl fmt::Display for UTC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC {}", self.0)
    }
}

impl From<JulianDate> for UTC {
    fn from(jd: JulianDate) -> Self {
        Self(jd)
    }
}

/// ISO 8601 in UTC, checked against the builtin table. Dates past the
/// table's expiry are rejected.
impl FromStr for UTC {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        let parsed = parse_iso8601(s)?;
        let jd = parsed.to_julian_date(TimeScale::UTC, builtin_table())?.strict()?;
        Ok(Self(jd))
    }
}
