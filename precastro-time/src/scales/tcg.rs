//! Geocentric Coordinate Time.

use crate::calendar::calendar_to_julian_date;
use crate::civil::{julian_date_to_civil, CivilDateTime};
use crate::julian::JulianDate;
use crate::leap_seconds::builtin_table;
use crate::parsing::parse_iso8601;
use crate::scales::TimeScale;
use crate::{TimeError, TimeResult};
use std::fmt;
use std::str::FromStr;

/// TCG, the coordinate time of the geocentric reference system. Runs ahead of
/// TT by about 22 ms per year since 1977.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TCG(JulianDate);

impl TCG {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    pub fn from_calendar(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64) -> TimeResult<Self> {
        let jd = calendar_to_julian_date(TimeScale::TCG, builtin_table(), year, month, day, hour, minute, second)?;
        Ok(Self(jd.into_value()))
    }

    pub fn to_civil(&self, digits: i32) -> TimeResult<CivilDateTime> {
        Ok(julian_date_to_civil(TimeScale::TCG, builtin_table(), self.0, digits)?.into_value())
    }
}

impl fmt::Display for TCG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TCG {}", self.0)
    }
}

impl From<JulianDate> for TCG {
    fn from(jd: JulianDate) -> Self {
        Self(jd)
    }
}

impl FromStr for TCG {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        let parsed = parse_iso8601(s)?;
        let jd = parsed.to_julian_date(TimeScale::TCG, builtin_table())?;
        Ok(Self(jd.into_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::conversions::ToTT;
    use precastro_core::constants::SECONDS_PER_DAY_F64;

    #[test]
    fn test_calendar_round_trip() {
        let tcg = TCG::from_calendar(2020, 1, 1, 0, 0, 0.945_671_319).unwrap();
        let tt = tcg.to_tt().unwrap();
        let civil = tt.to_civil(3).unwrap();
        assert_eq!(civil.to_string(), "2020/01/01 00:00:00.000");
        assert!(tcg.to_julian_date().days_since(&tt.to_julian_date()) * SECONDS_PER_DAY_F64 > 0.9);
    }

    #[test]
    fn test_parse_and_display() {
        let tcg: TCG = "1977-01-01T00:00:32.184".parse().unwrap();
        assert!(tcg.to_string().starts_with("TCG JD 2443144.5003"));
    }
}
