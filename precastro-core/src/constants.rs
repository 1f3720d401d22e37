//! Fundamental constants shared by the precastro crates.
//!
//! Day and second conversions, the J2000.0 and MJD reference points, and the
//! Julian year/century lengths used by epoch arithmetic. Values are exact by
//! definition unless noted otherwise.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT).
pub const J2000_JD: f64 = 2451545.0;

/// Modified Julian Date of J2000.0.
pub const J2000_MJD: f64 = 51544.5;

/// Offset between Julian Date and Modified Julian Date: MJD = JD - 2400000.5.
pub const MJD_ZERO_POINT: f64 = 2_400_000.5;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const SECONDS_PER_DAY_F64: f64 = 86_400.0;

pub const SECONDS_PER_MINUTE_F64: f64 = 60.0;

pub const NANOSECONDS_PER_SECOND_F64: f64 = 1_000_000_000.0;

/// Machine epsilon for `f64`.
#[allow(clippy::excessive_precision)]
pub const DBL_EPSILON: f64 = 2.220_446_049_250_313_1e-16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mjd_relationships() {
        assert_eq!(J2000_JD - MJD_ZERO_POINT, J2000_MJD);
        assert_eq!(DAYS_PER_JULIAN_CENTURY, 100.0 * DAYS_PER_JULIAN_YEAR);
        assert_eq!(SECONDS_PER_DAY as f64, SECONDS_PER_DAY_F64);
        assert_eq!(DBL_EPSILON, f64::EPSILON);
    }
}
