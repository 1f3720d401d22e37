//! A two-part Julian Date tagged with its time scale.
//!
//! [`Time`] is the dynamic counterpart of the [`UTC`](crate::UTC)/[`TT`](crate::TT)
//! newtypes: the scale is a value, so one type can hold an instant in any
//! scale and convert it on request. Operations that consult the leap-second
//! table take a `dubious_ok` flag; without it, dates past the table's expiry
//! are refused with [`TimeError::DubiousYear`].
//!
//! ```
//! use precastro_time::{Time, TimeScale};
//!
//! let t: Time = "2016-12-31T23:59:60.25 UTC".parse().unwrap();
//! let tt = t.to_tt(false).unwrap();
//! assert_eq!(tt.format_calendar(2, false).unwrap(), "2017/01/01 00:01:08.43");
//! assert_eq!(tt.scale(), TimeScale::TT);
//! ```

use crate::calendar::{calendar_to_julian_date, jd2cal};
use crate::civil::{julian_date_to_civil, CivilDateTime};
use crate::constants::{SECONDS_TO_DAYS, UNIX_EPOCH_JD};
use crate::julian::JulianDate;
use crate::leap_seconds::{builtin_table, LeapSecondTable};
use crate::parsing::parse_iso8601;
use crate::scales::{convert_time_scale, TimeScale, UTC};
use crate::validity::Validated;
use crate::{TimeError, TimeResult};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    jd: JulianDate,
    scale: TimeScale,
}

impl Time {
    /// The system clock, in UTC.
    ///
    /// Goes through POSIX time, so on a leap second day the result can be
    /// off by up to a second.
    pub fn now() -> Self {
        Self::from_jd(UTC::now().to_julian_date(), TimeScale::UTC)
    }

    /// POSIX seconds since 1970-01-01T00:00:00 UTC.
    pub fn from_posix(seconds: f64) -> Self {
        Self::from_jd(
            JulianDate::new(UNIX_EPOCH_JD, seconds * SECONDS_TO_DAYS),
            TimeScale::UTC,
        )
    }

    pub fn from_jd(jd: JulianDate, scale: TimeScale) -> Self {
        Self { jd, scale }
    }

    pub fn from_mjd(mjd: f64, scale: TimeScale) -> Self {
        Self::from_jd(JulianDate::from_mjd(mjd), scale)
    }

    /// Gregorian calendar fields in `scale`.
    ///
    /// In UTC, `second` may reach 60.999... at the end of a leap second day.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calendar(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: f64,
        scale: TimeScale,
        dubious_ok: bool,
    ) -> TimeResult<Self> {
        let jd = calendar_to_julian_date(scale, builtin_table(), year, month, day, hour, minute, second)?
            .accept(dubious_ok)?;
        Ok(Self::from_jd(jd, scale))
    }

    /// Calendar date plus a day fraction. `fday` is not range checked and is
    /// not scaled for leap seconds.
    pub fn from_fractional_day(
        year: i32,
        month: i32,
        day: i32,
        fday: f64,
        scale: TimeScale,
        dubious_ok: bool,
    ) -> TimeResult<Self> {
        let midnight = calendar_to_julian_date(scale, builtin_table(), year, month, day, 0, 0, 0.0)?
            .accept(dubious_ok)?;
        Ok(Self::from_jd(
            JulianDate::new(midnight.jd1(), midnight.jd2() + fday),
            scale,
        ))
    }

    /// A Julian epoch such as 2005.37, in TT.
    pub fn from_julian_epoch(epoch: f64) -> Self {
        Self::from_jd(JulianDate::from_julian_epoch(epoch), TimeScale::TT)
    }

    pub fn julian_date(&self) -> JulianDate {
        self.jd
    }

    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    /// Single-value Julian Date.
    pub fn as_jd(&self) -> f64 {
        self.jd.to_f64()
    }

    pub fn as_mjd(&self) -> f64 {
        self.jd.to_mjd()
    }

    pub fn julian_epoch(&self) -> f64 {
        self.jd.julian_epoch()
    }

    /// The same instant in `target`, using the builtin leap-second table.
    pub fn to_scale(&self, target: TimeScale, dubious_ok: bool) -> TimeResult<Self> {
        let jd = convert_time_scale(self.jd, self.scale, target, builtin_table())?.accept(dubious_ok)?;
        Ok(Self::from_jd(jd, target))
    }

    /// Like [`Time::to_scale`] with an explicit table; the validity is
    /// returned instead of checked.
    pub fn to_scale_with(&self, target: TimeScale, table: &LeapSecondTable) -> TimeResult<Validated<Self>> {
        Ok(convert_time_scale(self.jd, self.scale, target, table)?.map(|jd| Self::from_jd(jd, target)))
    }

    pub fn to_tt(&self, dubious_ok: bool) -> TimeResult<Self> {
        self.to_scale(TimeScale::TT, dubious_ok)
    }

    /// TDB, approximated by TT when `tt_ok` is set.
    ///
    /// TT and TDB differ by less than 2 ms. A time already in TDB is
    /// returned unchanged; any other scale fails unless `tt_ok` allows the
    /// TT stand-in, which is labelled TT.
    pub fn to_tdb(&self, tt_ok: bool, dubious_ok: bool) -> TimeResult<Self> {
        if self.scale == TimeScale::TDB {
            return Ok(*self);
        }
        if !tt_ok {
            return Err(TimeError::UnsupportedTimescale(self.scale));
        }
        self.to_tt(dubious_ok)
    }

    /// `(year, month, day, fraction_of_day)`, unrounded.
    pub fn calendar(&self) -> TimeResult<(i32, i32, i32, f64)> {
        jd2cal(self.jd.jd1(), self.jd.jd2())
    }

    /// Broken-down date and time, seconds rounded to `digits` places.
    pub fn civil(&self, digits: i32, dubious_ok: bool) -> TimeResult<CivilDateTime> {
        julian_date_to_civil(self.scale, builtin_table(), self.jd, digits)?.accept(dubious_ok)
    }

    /// `YYYY/MM/DD HH:MM:SS.fff`. With `digits <= 0` the decimal point is
    /// dropped; negative values round to 10 s, minutes and so on.
    pub fn format_calendar(&self, digits: i32, dubious_ok: bool) -> TimeResult<String> {
        Ok(self.civil(digits, dubious_ok)?.to_string())
    }
}

/// Civil time to milliseconds followed by the scale, or the Julian Date when
/// the instant cannot be broken down.
impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_calendar(3, true) {
            Ok(civil) => write!(f, "{} {}", civil, self.scale),
            Err(_) => write!(f, "{} {}", self.jd, self.scale),
        }
    }
}

/// `"<ISO 8601> [SCALE]"`; the scale defaults to UTC. Dubious UTC dates are
/// refused.
impl FromStr for Time {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        let s = s.trim();
        let (iso, scale) = match s.rsplit_once(char::is_whitespace) {
            Some((iso, name)) => match name.parse::<TimeScale>() {
                Ok(scale) => (iso.trim_end(), scale),
                Err(_) => (s, TimeScale::UTC),
            },
            None => (s, TimeScale::UTC),
        };

        let parsed = parse_iso8601(iso)?;
        let jd = parsed.to_julian_date(scale, builtin_table())?.strict()?;
        Ok(Self::from_jd(jd, scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leap_seconds::FuturePolicy;
    use precastro_core::constants::J2000_JD;

    #[test]
    fn test_constructors() {
        let t = Time::from_posix(946_728_000.0);
        assert_eq!(t.as_jd(), J2000_JD);
        assert_eq!(t.scale(), TimeScale::UTC);

        let t = Time::from_mjd(51544.5, TimeScale::TT);
        assert_eq!(t.as_jd(), J2000_JD);
        assert_eq!(t.as_mjd(), 51544.5);

        let t = Time::from_julian_epoch(2000.0);
        assert_eq!((t.as_jd(), t.scale()), (J2000_JD, TimeScale::TT));
        assert_eq!(t.julian_epoch(), 2000.0);

        assert!(Time::now().as_jd() > 2_460_000.0);
    }

    #[test]
    fn test_from_calendar_dubious_flag() {
        assert!(matches!(
            Time::from_calendar(2050, 1, 1, 0, 0, 0.0, TimeScale::UTC, false),
            Err(TimeError::DubiousYear(_))
        ));
        assert!(Time::from_calendar(2050, 1, 1, 0, 0, 0.0, TimeScale::UTC, true).is_ok());
        // No table involved outside UTC.
        assert!(Time::from_calendar(2050, 1, 1, 0, 0, 0.0, TimeScale::TT, false).is_ok());
        assert!(matches!(
            Time::from_calendar(1950, 1, 1, 0, 0, 0.0, TimeScale::UTC, true),
            Err(TimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_fractional_day() {
        let t = Time::from_fractional_day(2000, 1, 1, 0.5, TimeScale::TT, false).unwrap();
        assert_eq!(t.as_jd(), J2000_JD);
        assert_eq!(t.calendar().unwrap(), (2000, 1, 1, 0.5));

        // Past the end of the day is not checked.
        let t = Time::from_fractional_day(2000, 1, 1, 1.25, TimeScale::TAI, false).unwrap();
        assert_eq!(t.calendar().unwrap(), (2000, 1, 2, 0.25));

        assert!(Time::from_fractional_day(2000, 2, 30, 0.5, TimeScale::TT, false).is_err());
    }

    #[test]
    fn test_leap_second_to_tai() {
        let utc = Time::from_calendar(2012, 6, 30, 23, 59, 60.5, TimeScale::UTC, false).unwrap();
        let tai = utc.to_scale(TimeScale::TAI, false).unwrap();
        assert_eq!(tai.scale(), TimeScale::TAI);
        assert_eq!(tai.format_calendar(3, false).unwrap(), "2012/07/01 00:00:34.500");
        assert_eq!(utc.format_calendar(1, false).unwrap(), "2012/06/30 23:59:60.5");
    }

    #[test]
    fn test_to_scale_identity_and_unsupported() {
        let t = Time::from_jd(JulianDate::new(2451545.0, 0.123), TimeScale::TDB);
        assert_eq!(t.to_scale(TimeScale::TDB, false).unwrap(), t);
        assert_eq!(
            t.to_scale(TimeScale::TT, false),
            Err(TimeError::UnsupportedTimescale(TimeScale::TDB))
        );
    }

    #[test]
    fn test_to_tdb() {
        let tdb = Time::from_jd(JulianDate::new(2451545.0, 0.25), TimeScale::TDB);
        assert_eq!(tdb.to_tdb(false, false).unwrap(), tdb);

        let utc = Time::from_calendar(2017, 1, 1, 0, 0, 0.0, TimeScale::UTC, false).unwrap();
        assert_eq!(
            utc.to_tdb(false, false),
            Err(TimeError::UnsupportedTimescale(TimeScale::UTC))
        );

        let approx = utc.to_tdb(true, false).unwrap();
        assert_eq!(approx.scale(), TimeScale::TT);
        assert_eq!(approx, utc.to_tt(false).unwrap());
        assert_eq!(approx.format_calendar(3, false).unwrap(), "2017/01/01 00:01:09.184");

        let far = Time::from_mjd(70000.0, TimeScale::UTC);
        assert!(matches!(far.to_tdb(true, false), Err(TimeError::DubiousYear(_))));
        assert!(far.to_tdb(true, true).is_ok());
    }

    #[test]
    fn test_to_scale_with_table() {
        let table = builtin_table().with_policy(FuturePolicy::Reject);
        let t = Time::from_mjd(70000.0, TimeScale::UTC);
        assert!(matches!(
            t.to_scale_with(TimeScale::TAI, &table),
            Err(TimeError::OutOfRange(_))
        ));

        let held = t.to_scale_with(TimeScale::TAI, builtin_table()).unwrap();
        assert!(held.is_dubious());
        assert!(t.to_tt(false).is_err());
        assert!(t.to_tt(true).is_ok());
    }

    #[test]
    fn test_parse() {
        let t: Time = "2000-01-01T12:00:00 TT".parse().unwrap();
        assert_eq!((t.as_jd(), t.scale()), (J2000_JD, TimeScale::TT));

        let t: Time = "2000-01-01 12:00:00".parse().unwrap();
        assert_eq!(t.scale(), TimeScale::UTC);

        let t: Time = "2012-06-30T23:59:60.5Z utc".parse().unwrap();
        assert_eq!(t.julian_date().jd2(), 86400.5 / 86401.0);

        assert!("2012-06-30T23:59:60.5 TAI".parse::<Time>().is_err());
        assert!("2050-01-01T00:00:00".parse::<Time>().is_err());
        assert!("not a time".parse::<Time>().is_err());
    }

    #[test]
    fn test_display() {
        let t = Time::from_jd(JulianDate::j2000(), TimeScale::TT);
        assert_eq!(t.to_string(), "2000/01/01 12:00:00.000 TT");

        let far = Time::from_jd(JulianDate::new(1e10, 0.0), TimeScale::TAI);
        assert!(far.to_string().starts_with("JD "));
    }
}
