//! Broken-down date and time with leap-second aware rounding.
//!
//! [`julian_date_to_civil`] turns a two-part Julian Date into
//! `year/month/day hour:minute:second.fraction`, rounded to a chosen number
//! of decimal places. Rounding never produces `24:00:00`: a time that rounds
//! up past the end of the day becomes `00:00:00` of the next day, except on a
//! UTC leap second day, where it becomes `23:59:60`.
//!
//! Decimal places run from 9 (nanoseconds) down to -5 (nearest hour); the
//! negative values round to 10 s, 1 min, 10 min, 1 h in the usual sexagesimal
//! steps.

use crate::calendar::{jd2cal, next_calendar_day};
use crate::constants::{MAX_DECIMAL_PLACES, MIN_DECIMAL_PLACES};
use crate::julian::JulianDate;
use crate::leap_seconds::LeapSecondTable;
use crate::scales::TimeScale;
use crate::validity::{Validated, Validity};
use crate::{TimeError, TimeResult};
use precastro_core::constants::SECONDS_PER_DAY_F64;
use precastro_core::math::{dint, dnint};
use std::fmt;

/// Days split into rounded hours, minutes, seconds and a decimal fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmsFields {
    pub negative: bool,
    pub hours: i64,
    pub minutes: u8,
    pub seconds: u8,
    /// Fraction of a second scaled by `10^digits` (0 when `digits <= 0`).
    pub fraction: u32,
}

/// Rounds an interval in days to hours, minutes, seconds and fraction.
///
/// `digits` may be negative for coarser rounding: -1 rounds to 10 s, -2 to
/// 1 min, -3 to 10 min, -4 to 1 h, -5 to 10 h. Hours are not wrapped, so
/// `days >= 1` gives 24 or more.
pub fn days_to_hms(digits: i32, days: f64) -> TimeResult<HmsFields> {
    check_digits(digits)?;

    let mut a = SECONDS_PER_DAY_F64 * days.abs();

    if digits < 0 {
        let step: f64 = (1..=-digits)
            .map(|n| if n == 2 || n == 4 { 6.0 } else { 10.0 })
            .product();
        a = step * dnint(a / step);
    }

    let rs = 10f64.powi(digits.max(0));
    let rm = rs * 60.0;
    let rh = rm * 60.0;

    a = dnint(rs * a);
    let hours = dint(a / rh);
    a -= hours * rh;
    let minutes = dint(a / rm);
    a -= minutes * rm;
    let seconds = dint(a / rs);
    let fraction = a - seconds * rs;

    Ok(HmsFields {
        negative: days < 0.0,
        hours: hours as i64,
        minutes: minutes as u8,
        seconds: seconds as u8,
        fraction: fraction as u32,
    })
}

fn check_digits(digits: i32) -> TimeResult<()> {
    if (MIN_DECIMAL_PLACES..=MAX_DECIMAL_PLACES).contains(&digits) {
        Ok(())
    } else {
        Err(TimeError::InvalidPrecision(digits))
    }
}

/// A rounded calendar date and clock time in some time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// 0..=59, or 60 during a UTC leap second.
    pub second: u8,
    /// Fraction of a second scaled by `10^digits`.
    pub fraction: u32,
    pub digits: i32,
    pub scale: TimeScale,
}

impl CivilDateTime {
    /// Seconds including the fraction.
    pub fn seconds(&self) -> f64 {
        if self.digits > 0 {
            self.second as f64 + self.fraction as f64 / 10f64.powi(self.digits)
        } else {
            self.second as f64
        }
    }

    pub fn is_leap_second(&self) -> bool {
        self.second >= 60
    }
}

/// `YYYY/MM/DD HH:MM:SS.fff`, with as many fraction digits as were requested.
impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}/{:02}/{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.digits > 0 {
            write!(f, ".{:0width$}", self.fraction, width = self.digits as usize)?;
        }
        Ok(())
    }
}

/// Two-part Julian Date in `scale` to a rounded calendar date and time.
///
/// For UTC the table decides whether the day ends in a leap second; such a
/// day is 86401 s long and its last second reads `23:59:60`. The result is
/// dubious when that lookup was.
///
/// # Errors
///
/// - [`TimeError::InvalidPrecision`] for `digits` outside -5..=9.
/// - [`TimeError::OutOfRange`] for Julian Dates outside the calendar range,
///   or UTC dates the table cannot cover.
pub fn julian_date_to_civil(
    scale: TimeScale,
    table: &LeapSecondTable,
    jd: JulianDate,
    digits: i32,
) -> TimeResult<Validated<CivilDateTime>> {
    check_digits(digits)?;

    let (mut year, mut month, mut day, mut fd) = jd2cal(jd.jd1(), jd.jd2())?;

    let mut leap = false;
    let mut validity = Validity::Exact;
    if scale == TimeScale::UTC {
        let (day_info, day_validity) = table.utc_day(year, month, day)?.into_parts();
        validity = day_validity;
        leap = day_info.has_leap_second();
        if leap {
            fd += fd * day_info.leap / SECONDS_PER_DAY_F64;
        }
    }

    let mut hms = days_to_hms(digits, fd)?;

    if hms.hours > 23 {
        let next = next_calendar_day(year, month, day)?;
        let roll_over = if !leap {
            true
        } else if hms.seconds > 0 {
            // Rounded past the leap second itself.
            true
        } else {
            hms.hours = 23;
            hms.minutes = 59;
            hms.seconds = 60;
            // Coarse rounding never shows the leap second.
            digits < 0
        };

        if roll_over {
            (year, month, day) = next;
            hms.hours = 0;
            hms.minutes = 0;
            hms.seconds = 0;
            hms.fraction = 0;
        }
    }

    Ok(Validated::new(
        CivilDateTime {
            year,
            month: month as u8,
            day: day as u8,
            hour: hms.hours as u8,
            minute: hms.minutes,
            second: hms.seconds,
            fraction: hms.fraction,
            digits,
            scale,
        },
        validity,
    ))
}
