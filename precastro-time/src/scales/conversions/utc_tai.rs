//! UTC <-> TAI.
//!
//! UTC is TAI minus a table-driven offset, and a UTC day can be 86400 s,
//! 86401 s (leap second inserted) or, before 1972, 86400 s plus a fraction
//! of drift. Julian Dates in UTC follow the usual convention of counting
//! days, so the fraction of a long day is scaled to its real length:
//!
//! ```text
//! TAI = 0h(UTC day) + fd * (86400 + leap)/86400 * (86400 + drift)/86400 + dat0/86400
//! ```
//!
//! where `dat0` is TAI-UTC at 0h and `leap`/`drift` come from
//! [`LeapSecondTable::utc_day`]. The inverse has no closed form across a
//! discontinuity and is solved by fixed-point iteration.

use super::{ToTAI, ToTCG, ToTT, ToUTC};
use crate::calendar::{cal2jd, jd2cal};
use crate::julian::JulianDate;
use crate::leap_seconds::{builtin_table, LeapSecondTable};
use crate::scales::{TAI, TCG, TT, UTC};
use crate::validity::{Validated, Validity};
use crate::TimeResult;
use precastro_core::constants::SECONDS_PER_DAY_F64;

const TAI_TO_UTC_ITERATIONS: usize = 3;

/// UTC Julian Date to TAI.
///
/// The larger-magnitude part of the input is passed through unchanged; the
/// correction lands on the other part.
pub fn utc_to_tai(utc: JulianDate, table: &LeapSecondTable) -> TimeResult<Validated<JulianDate>> {
    let big1 = utc.jd1_is_larger();
    let (u1, u2) = if big1 { (utc.jd1(), utc.jd2()) } else { (utc.jd2(), utc.jd1()) };

    let (year, month, day, mut fd) = jd2cal(u1, u2)?;
    let (day_info, validity) = table.utc_day(year, month, day)?.into_parts();

    fd *= (SECONDS_PER_DAY_F64 + day_info.leap) / SECONDS_PER_DAY_F64;
    fd *= (SECONDS_PER_DAY_F64 + day_info.drift) / SECONDS_PER_DAY_F64;

    let (z1, z2) = cal2jd(year, month, day)?;
    let mut a2 = z1 - u1;
    a2 += z2;
    a2 += fd + day_info.offset_at_start / SECONDS_PER_DAY_F64;

    let tai = if big1 { JulianDate::new(u1, a2) } else { JulianDate::new(a2, u1) };
    Ok(Validated::new(tai, validity))
}

/// TAI Julian Date to UTC.
///
/// Starts from UTC = TAI and corrects by the residual of [`utc_to_tai`]
/// three times, which converges well below a nanosecond including inside a
/// leap second. The validity is that of the final iteration.
pub fn tai_to_utc(tai: JulianDate, table: &LeapSecondTable) -> TimeResult<Validated<JulianDate>> {
    let big1 = tai.jd1_is_larger();
    let (a1, a2) = if big1 { (tai.jd1(), tai.jd2()) } else { (tai.jd2(), tai.jd1()) };

    let u1 = a1;
    let mut u2 = a2;
    let mut validity = Validity::Exact;

    for _ in 0..TAI_TO_UTC_ITERATIONS {
        let guess = utc_to_tai(JulianDate::new(u1, u2), table)?;
        validity = guess.validity();
        let guess = guess.into_value();
        u2 += a1 - guess.jd1();
        u2 += a2 - guess.jd2();
    }

    let utc = if big1 { JulianDate::new(u1, u2) } else { JulianDate::new(u2, u1) };
    Ok(Validated::new(utc, validity))
}

impl UTC {
    pub fn to_tai_with_table(&self, table: &LeapSecondTable) -> TimeResult<Validated<TAI>> {
        Ok(utc_to_tai(self.to_julian_date(), table)?.map(TAI::from_julian_date))
    }
}

impl TAI {
    pub fn to_utc_with_table(&self, table: &LeapSecondTable) -> TimeResult<Validated<UTC>> {
        Ok(tai_to_utc(self.to_julian_date(), table)?.map(UTC::from_julian_date))
    }
}

impl ToUTC for UTC {
    fn to_utc(&self) -> TimeResult<UTC> {
        Ok(*self)
    }
}

impl ToTAI for UTC {
    fn to_tai(&self) -> TimeResult<TAI> {
        self.to_tai_with_table(builtin_table())?.strict()
    }
}

impl ToUTC for TAI {
    fn to_utc(&self) -> TimeResult<UTC> {
        self.to_utc_with_table(builtin_table())?.strict()
    }
}

impl ToTT for UTC {
    fn to_tt(&self) -> TimeResult<TT> {
        self.to_tai()?.to_tt()
    }
}

impl ToUTC for TT {
    fn to_utc(&self) -> TimeResult<UTC> {
        self.to_tai()?.to_utc()
    }
}

impl ToTCG for UTC {
    fn to_tcg(&self) -> TimeResult<TCG> {
        self.to_tt()?.to_tcg()
    }
}

impl ToUTC for TCG {
    fn to_utc(&self) -> TimeResult<UTC> {
        self.to_tt()?.to_utc()
    }
}
