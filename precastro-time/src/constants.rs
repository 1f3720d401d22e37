//! Time-scale constants.

use precastro_core::constants::SECONDS_PER_DAY_F64;

/// Julian Date of the Unix epoch, 1970-01-01T00:00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_TO_DAYS: f64 = 1.0 / SECONDS_PER_DAY_F64;

/// TT - TAI in seconds, exact by definition.
pub const TT_TAI_OFFSET: f64 = 32.184;

/// L_G, the TCG/TT rate difference (IAU 2000 Resolution B1.9).
pub const TCG_RATE_LG: f64 = 6.969290134e-10;

/// L_G / (1 - L_G), used when computing TCG from TT.
pub const TCG_RATE_RATIO: f64 = TCG_RATE_LG / (1.0 - TCG_RATE_LG);

/// MJD (TT) of 1977-01-01T00:00:32.184, where TCG and TT coincide.
pub const TCG_REFERENCE_EPOCH: f64 = 43144.0003725;

/// Supported range of `jd1 + jd2` for calendar conversion.
pub const JD_MIN: f64 = -68569.5;
pub const JD_MAX: f64 = 1e9;

/// Earliest year accepted by the Gregorian calendar algorithm.
pub const CALENDAR_MIN_YEAR: i32 = -4799;

/// Most decimal places accepted when rounding seconds or day fractions.
pub const MAX_DECIMAL_PLACES: i32 = 9;

/// Coarsest rounding accepted for seconds (-4 rounds to the hour, -5 to 10 h).
pub const MIN_DECIMAL_PLACES: i32 = -5;
