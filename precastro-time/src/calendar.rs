//! Gregorian calendar <-> two-part Julian Date conversion.
//!
//! All calendar arithmetic uses the proleptic Gregorian calendar with the
//! 4/100/400 leap-year rules, valid from -4799 January 1 onward. The Julian
//! Date side is always split in two so that whole days and the time of day
//! keep their own precision.
//!
//! # Directions
//!
//! | Function | Direction | Notes |
//! |----------|-----------|-------|
//! | [`cal2jd`] | date -> JD at 0h | `(2400000.5, MJD)` split |
//! | [`calendar_to_julian_date`] | date + clock -> JD | leap-second aware for UTC |
//! | [`fractional_day_to_julian_date`] | date + day fraction -> JD | fraction added unchecked |
//! | [`jd2cal`] | JD -> date + day fraction | compensated summation |
//! | [`julian_date_to_calendar`] | JD -> date + rounded fraction | never rolls into an invalid date |
//!
//! For broken-down hours/minutes/seconds see [`crate::civil`].
//!
//! # UTC Days
//!
//! A UTC day containing a leap second is 86401 seconds long (86399 for a
//! removed one). [`calendar_to_julian_date`] detects this from the leap-second
//! table and scales the time of day by the real day length, so
//! `23:59:60.5` on such a day maps to a fraction just below 1.0 rather than
//! spilling into the next day.

use crate::constants::{CALENDAR_MIN_YEAR, JD_MAX, JD_MIN, MAX_DECIMAL_PLACES};
use crate::julian::JulianDate;
use crate::leap_seconds::LeapSecondTable;
use crate::scales::TimeScale;
use crate::validity::{Validated, Validity};
use crate::{TimeError, TimeResult};
use precastro_core::constants::{
    DBL_EPSILON, MJD_ZERO_POINT, SECONDS_PER_DAY_F64, SECONDS_PER_MINUTE_F64,
};
use precastro_core::math::{dnint, two_sum};
use std::fmt;

/// A calendar day without a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDate {
    /// Validated constructor.
    pub fn new(year: i32, month: u8, day: u8) -> TimeResult<Self> {
        cal2jd(year, month as i32, day as i32)?;
        Ok(Self { year, month, day })
    }

    /// Calendar date containing the given Julian Date.
    pub fn from_julian_date(jd: JulianDate) -> TimeResult<Self> {
        let (year, month, day, _) = jd2cal(jd.jd1(), jd.jd2())?;
        Ok(Self {
            year,
            month: month as u8,
            day: day as u8,
        })
    }

    /// Modified Julian Date at 0h.
    pub fn mjd(&self) -> f64 {
        modified_julian_day(self.year, self.month as i32, self.day as i32) as f64
    }

    /// Julian Date at 0h, split as `(2400000.5, MJD)`.
    pub fn to_julian_date(&self) -> JulianDate {
        JulianDate::new(MJD_ZERO_POINT, self.mjd())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Calendar date with the day fraction rounded to `digits` decimal places.
///
/// Produced by [`julian_date_to_calendar`]. `fraction` is the day fraction
/// scaled by `10^digits`, so `digits = 4, fraction = 5000` means 0.5 day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDayFraction {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub fraction: u64,
    pub digits: u8,
}

impl CalendarDayFraction {
    pub fn fraction_of_day(&self) -> f64 {
        self.fraction as f64 / 10f64.powi(self.digits as i32)
    }
}

impl fmt::Display for CalendarDayFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.digits > 0 {
            write!(f, ".{:0width$}", self.fraction, width = self.digits as usize)?;
        }
        Ok(())
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0) && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: i32) -> TimeResult<i32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 => Ok(if is_leap_year(year) { 29 } else { 28 }),
        _ => Err(TimeError::invalid_date(year, month, 1, "month out of range")),
    }
}

pub fn next_calendar_day(year: i32, month: i32, day: i32) -> TimeResult<(i32, i32, i32)> {
    let days = days_in_month(year, month)?;

    if day < days {
        Ok((year, month, day + 1))
    } else if month < 12 {
        Ok((year, month + 1, 1))
    } else {
        Ok((year + 1, 1, 1))
    }
}

// Gregorian date to MJD; no validation.
fn modified_julian_day(year: i32, month: i32, day: i32) -> i64 {
    let (year, month, day) = (year as i64, month as i64, day as i64);
    let my = (month - 14) / 12;
    let iypmy = year + my;

    (1461 * (iypmy + 4800)) / 4 + (367 * (month - 2 - 12 * my)) / 12
        - (3 * ((iypmy + 4900) / 100)) / 4
        + day
        - 2432076
}

/// Calendar date to a two-part Julian Date at 0h: `(2400000.5, MJD)`.
///
/// # Errors
///
/// [`TimeError::InvalidDate`] for a year before -4799, a month outside
/// 1..=12, or a day not in the month.
pub fn cal2jd(year: i32, month: i32, day: i32) -> TimeResult<(f64, f64)> {
    if year < CALENDAR_MIN_YEAR {
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            "year precedes -4799",
        ));
    }
    let days = days_in_month(year, month)?;
    if day < 1 || day > days {
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            "day out of range for month",
        ));
    }

    Ok((MJD_ZERO_POINT, modified_julian_day(year, month, day) as f64))
}

/// Two-part Julian Date to `(year, month, day, day_fraction)`.
///
/// Integer arithmetic handles the calendar; the two fractional parts (plus the
/// half day separating noon-based JD from midnight) are combined with
/// compensated summation so that a split like `(2451544.5, 0.9999999999)` does
/// not collapse into the next day.
///
/// # Errors
///
/// [`TimeError::OutOfRange`] if `jd1 + jd2` is outside `[-68569.5, 1e9]`.
pub fn jd2cal(jd1: f64, jd2: f64) -> TimeResult<(i32, i32, i32, f64)> {
    let dj = jd1 + jd2;
    if !(JD_MIN..=JD_MAX).contains(&dj) {
        return Err(TimeError::OutOfRange(format!(
            "Julian Date {} out of valid range [{}, {}]",
            dj, JD_MIN, JD_MAX
        )));
    }

    let day_int_1 = dnint(jd1);
    let frac_1 = jd1 - day_int_1;
    let mut jd = day_int_1 as i64;

    let day_int_2 = dnint(jd2);
    let frac_2 = jd2 - day_int_2;
    jd += day_int_2 as i64;

    let mut sum = 0.5;
    let mut correction = 0.0;

    for frac in [frac_1, frac_2] {
        let (temp, error) = two_sum(sum, frac);
        correction += error;
        sum = temp;

        if sum >= 1.0 {
            jd += 1;
            sum -= 1.0;
        }
    }
    let mut fraction = sum + correction;
    correction = fraction - sum;

    if fraction < 0.0 {
        fraction = sum + 1.0;
        correction += (1.0 - fraction) + sum;
        sum = fraction;
        fraction = sum + correction;
        correction = fraction - sum;
        jd -= 1;
    }

    if (fraction - 1.0) >= -DBL_EPSILON / 4.0 {
        let (temp, error) = two_sum(sum, -1.0);
        correction += error;
        sum = temp;
        fraction = sum + correction;

        if (-DBL_EPSILON / 2.0) < fraction {
            jd += 1;
            fraction = fraction.max(0.0);
        }
    }

    let mut l = jd + 68569;
    let n = (4 * l) / 146097;
    l -= (146097 * n + 3) / 4;
    let i = (4000 * (l + 1)) / 1461001;
    l -= (1461 * i) / 4 - 31;
    let k = (80 * l) / 2447;
    let day = (l - (2447 * k) / 80) as i32;
    let l_final = k / 11;
    let month = (k + 2 - 12 * l_final) as i32;
    let year = (100 * (n - 49) + i + l_final) as i32;

    Ok((year, month, day, fraction))
}

/// Two-part Julian Date to a calendar date with the day fraction rounded to
/// `digits` decimal places (0..=9).
///
/// Rounding happens before the calendar date is formed, so a fraction that
/// rounds up to 1.0 yields 0 on the following day instead of an out-of-range
/// value.
pub fn julian_date_to_calendar(jd1: f64, jd2: f64, digits: i32) -> TimeResult<CalendarDayFraction> {
    if !(0..=MAX_DECIMAL_PLACES).contains(&digits) {
        return Err(TimeError::InvalidPrecision(digits));
    }
    let denom = 10f64.powi(digits);

    let (mut year, mut month, mut day, fraction) = jd2cal(jd1, jd2)?;

    let mut scaled = dnint(fraction * denom);
    if scaled >= denom {
        (year, month, day) = next_calendar_day(year, month, day)?;
        scaled = 0.0;
    }

    Ok(CalendarDayFraction {
        year,
        month: month as u8,
        day: day as u8,
        fraction: scaled as u64,
        digits: digits as u8,
    })
}

/// Calendar date plus clock time in `scale` to a two-part Julian Date.
///
/// The result is split as `(JD at 0h, fraction of day)`. For UTC the length of
/// the day comes from `table`, so the final minute of a leap-second day
/// accepts seconds up to 60.999... and the fraction is scaled by 86401 s.
///
/// # Errors
///
/// - [`TimeError::InvalidDate`] for invalid calendar fields, hour outside
///   0..=23, minute outside 0..=59, negative seconds, or seconds at or beyond
///   the end of the minute.
/// - [`TimeError::OutOfRange`] for UTC dates before the table starts.
#[allow(clippy::too_many_arguments)]
pub fn calendar_to_julian_date(
    scale: TimeScale,
    table: &LeapSecondTable,
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: f64,
) -> TimeResult<Validated<JulianDate>> {
    let (djm0, djm) = cal2jd(year, month, day)?;
    let dj = djm0 + djm;

    let mut day_length = SECONDS_PER_DAY_F64;
    let mut minute_length = SECONDS_PER_MINUTE_F64;
    let mut validity = Validity::Exact;

    if scale == TimeScale::UTC {
        let dleap = table.leap_at_end_of_day(year, month, day)?;
        validity = dleap.validity();
        let dleap = dleap.into_value();
        day_length += dleap;
        if hour == 23 && minute == 59 {
            minute_length += dleap;
        }
    }

    if !(0..=23).contains(&hour) {
        return Err(TimeError::invalid_date(year, month, day, &format!("hour {} out of range", hour)));
    }
    if !(0..=59).contains(&minute) {
        return Err(TimeError::invalid_date(year, month, day, &format!("minute {} out of range", minute)));
    }
    if !second.is_finite() || second < 0.0 || second >= minute_length {
        return Err(TimeError::invalid_date(
            year,
            month,
            day,
            &format!(
                "second {} out of range for {:02}:{:02} (minute has {} s)",
                second, hour, minute, minute_length
            ),
        ));
    }

    let time = (SECONDS_PER_MINUTE_F64 * (60 * hour + minute) as f64 + second) / day_length;

    Ok(Validated::new(JulianDate::new(dj, time), validity))
}

/// Calendar date plus an unchecked day fraction to a two-part Julian Date.
///
/// `fday` is added to the 0h Julian Date as-is; values outside `[0, 1)` land
/// on neighbouring days. No leap-second scaling is applied, so for UTC this
/// inherits the usual ambiguity of fractional-day UTC.
pub fn fractional_day_to_julian_date(year: i32, month: i32, day: i32, fday: f64) -> TimeResult<JulianDate> {
    let (djm0, djm) = cal2jd(year, month, day)?;
    Ok(JulianDate::new(djm0 + djm, fday))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leap_seconds::builtin_table;
    use precastro_core::constants::J2000_JD;

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn test_next_calendar_day() {
        let cases: &[(i32, i32, i32, (i32, i32, i32))] = &[
            (2000, 1, 31, (2000, 2, 1)),
            (2000, 2, 28, (2000, 2, 29)),
            (1999, 2, 28, (1999, 3, 1)),
            (1900, 2, 28, (1900, 3, 1)),
            (2000, 4, 30, (2000, 5, 1)),
            (2000, 12, 31, (2001, 1, 1)),
        ];

        for &(y, m, d, expected) in cases {
            assert_eq!(next_calendar_day(y, m, d).unwrap(), expected);
        }

        assert!(next_calendar_day(2000, 0, 1).is_err());
        assert!(next_calendar_day(2000, 13, 1).is_err());
    }

    #[test]
    fn test_cal2jd_known_dates() {
        assert_eq!(cal2jd(2000, 1, 1).unwrap(), (MJD_ZERO_POINT, 51544.0));
        assert_eq!(cal2jd(1858, 11, 17).unwrap(), (MJD_ZERO_POINT, 0.0));
        assert_eq!(cal2jd(1970, 1, 1).unwrap(), (MJD_ZERO_POINT, 40587.0));
        assert_eq!(cal2jd(2003, 6, 1).unwrap(), (MJD_ZERO_POINT, 52791.0));
    }

    #[test]
    fn test_cal2jd_rejects_bad_fields() {
        for (y, m, d) in [
            (-4800, 1, 1),
            (2000, 0, 1),
            (2000, 13, 1),
            (2000, 1, 0),
            (2000, 1, 32),
            (2001, 2, 29),
            (2000, 4, 31),
        ] {
            assert!(
                matches!(cal2jd(y, m, d), Err(TimeError::InvalidDate(_))),
                "{}-{}-{} should be rejected",
                y,
                m,
                d
            );
        }
        assert!(cal2jd(2000, 2, 29).is_ok());
        assert!(cal2jd(-4799, 1, 1).is_ok());
    }

    #[test]
    fn test_jd2cal_known_dates() {
        let (y, m, d, frac) = jd2cal(J2000_JD, 0.0).unwrap();
        assert_eq!((y, m, d), (2000, 1, 1));
        assert_eq!(frac, 0.5);

        let (y, m, d, frac) = jd2cal(2400000.5, 50123.9999).unwrap();
        assert_eq!((y, m, d), (1996, 2, 10));
        assert!((frac - 0.9999).abs() < 1e-7);
    }

    #[test]
    fn test_jd2cal_edge_paths() {
        assert!(jd2cal(1e10, 0.0).is_err());
        assert!(jd2cal(-1e6, 0.0).is_err());

        let (y, m, d, frac) = jd2cal(J2000_JD, -0.6).unwrap();
        assert!(y > 0 && (1..=12).contains(&m) && (1..=31).contains(&d) && frac >= 0.0);

        let (y, m, d, frac) = jd2cal(2451544.6, 0.2).unwrap();
        assert!(y > 0 && (1..=12).contains(&m) && (1..=31).contains(&d));
        assert!((0.0..=1.0).contains(&frac));

        let (y, m, d, frac) = jd2cal(2451544.75, 0.75).unwrap();
        assert_eq!((y, m, d), (2000, 1, 2));
        assert!((0.0..1.0).contains(&frac));
    }

    #[test]
    fn test_cal2jd_jd2cal_agree() {
        for (y, m, d) in [(1972, 1, 1), (2012, 6, 30), (2016, 12, 31), (-1000, 3, 1), (2400, 2, 29)] {
            let (jd1, jd2) = cal2jd(y, m, d).unwrap();
            let (y2, m2, d2, frac) = jd2cal(jd1, jd2).unwrap();
            assert_eq!((y2, m2, d2), (y, m, d));
            assert_eq!(frac, 0.0);
        }
    }

    #[test]
    fn test_julian_date_to_calendar_rounding() {
        let r = julian_date_to_calendar(2400000.5, 50123.9999, 4).unwrap();
        assert_eq!((r.year, r.month, r.day, r.fraction), (1996, 2, 10, 9999));
        assert_eq!(r.to_string(), "1996-02-10.9999");

        // Rounds up into the next day rather than producing fraction 1.0.
        let r = julian_date_to_calendar(2400000.5, 50123.99999, 4).unwrap();
        assert_eq!((r.year, r.month, r.day, r.fraction), (1996, 2, 11, 0));

        let r = julian_date_to_calendar(2451544.5, 0.9999999, 3).unwrap();
        assert_eq!((r.year, r.month, r.day, r.fraction), (2000, 1, 2, 0));

        // Year boundary.
        let (jd1, jd2) = cal2jd(1999, 12, 31).unwrap();
        let r = julian_date_to_calendar(jd1, jd2 + 0.99996, 4).unwrap();
        assert_eq!((r.year, r.month, r.day, r.fraction), (2000, 1, 1, 0));
    }

    #[test]
    fn test_julian_date_to_calendar_split_order() {
        let a = julian_date_to_calendar(J2000_JD, 0.25, 6).unwrap();
        let b = julian_date_to_calendar(0.25, J2000_JD, 6).unwrap();
        assert_eq!(a, b);
        assert_eq!((a.year, a.month, a.day, a.fraction), (2000, 1, 1, 750000));
        assert_eq!(a.fraction_of_day(), 0.75);
    }

    #[test]
    fn test_julian_date_to_calendar_rejects_precision() {
        assert_eq!(
            julian_date_to_calendar(J2000_JD, 0.0, 10),
            Err(TimeError::InvalidPrecision(10))
        );
        assert_eq!(
            julian_date_to_calendar(J2000_JD, 0.0, -1),
            Err(TimeError::InvalidPrecision(-1))
        );
    }

    #[test]
    fn test_calendar_to_julian_date_tt() {
        let table = builtin_table();
        let jd = calendar_to_julian_date(TimeScale::TT, table, 2000, 1, 1, 12, 0, 0.0)
            .unwrap()
            .into_value();
        assert_eq!(jd.to_f64(), J2000_JD);
        assert_eq!(jd.jd1(), 2451544.5);
        assert_eq!(jd.jd2(), 0.5);
    }

    #[test]
    fn test_calendar_to_julian_date_validates_clock() {
        let table = builtin_table();
        let bad = [
            (24, 0, 0.0),
            (-1, 0, 0.0),
            (12, 60, 0.0),
            (12, 0, -0.1),
            (12, 0, 60.0),
            (23, 59, 60.0),
        ];
        for (h, mi, s) in bad {
            assert!(
                matches!(
                    calendar_to_julian_date(TimeScale::TAI, table, 2010, 3, 4, h, mi, s),
                    Err(TimeError::InvalidDate(_))
                ),
                "{:02}:{:02}:{} should be rejected",
                h,
                mi,
                s
            );
        }
        assert!(calendar_to_julian_date(TimeScale::TAI, table, 2010, 2, 30, 0, 0, 0.0).is_err());
        assert!(calendar_to_julian_date(TimeScale::TT, table, 2010, 3, 4, 12, 0, f64::NAN).is_err());
    }

    #[test]
    fn test_calendar_to_julian_date_leap_second_day() {
        let table = builtin_table();

        let leap = calendar_to_julian_date(TimeScale::UTC, table, 2012, 6, 30, 23, 59, 60.5).unwrap();
        assert_eq!(leap.validity(), Validity::Exact);
        let jd = leap.into_value();
        assert_eq!(jd.jd2(), 86400.5 / 86401.0);

        assert!(calendar_to_julian_date(TimeScale::UTC, table, 2012, 6, 30, 23, 59, 61.0).is_err());
        // Only the last minute of the day stretches.
        assert!(calendar_to_julian_date(TimeScale::UTC, table, 2012, 6, 30, 23, 58, 60.5).is_err());
        // Not a leap second day.
        assert!(calendar_to_julian_date(TimeScale::UTC, table, 2012, 6, 29, 23, 59, 60.5).is_err());
        // TAI days never have leap seconds.
        assert!(calendar_to_julian_date(TimeScale::TAI, table, 2012, 6, 30, 23, 59, 60.5).is_err());
    }

    #[test]
    fn test_calendar_to_julian_date_utc_before_table() {
        let table = builtin_table();
        assert!(matches!(
            calendar_to_julian_date(TimeScale::UTC, table, 1959, 6, 1, 0, 0, 0.0),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(calendar_to_julian_date(TimeScale::TT, table, 1959, 6, 1, 0, 0, 0.0).is_ok());
    }

    #[test]
    fn test_fractional_day() {
        let jd = fractional_day_to_julian_date(2000, 1, 1, 0.5).unwrap();
        assert_eq!(jd.to_f64(), J2000_JD);
        assert!(fractional_day_to_julian_date(2000, 2, 30, 0.5).is_err());
    }

    #[test]
    fn test_calendar_date() {
        let date = CalendarDate::new(2017, 1, 1).unwrap();
        assert_eq!(date.mjd(), 57754.0);
        assert_eq!(date.to_string(), "2017-01-01");
        assert_eq!(
            CalendarDate::from_julian_date(date.to_julian_date()).unwrap(),
            date
        );
        assert!(CalendarDate::new(2017, 2, 29).is_err());
        assert!(CalendarDate::new(2017, 1, 1).unwrap() < CalendarDate::new(2017, 1, 2).unwrap());
    }
}
