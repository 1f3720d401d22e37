use crate::constants::{SECONDS_TO_DAYS, UNIX_EPOCH_JD};
use precastro_core::constants::{
    DAYS_PER_JULIAN_YEAR, J2000_JD, J2000_MJD, MJD_ZERO_POINT,
};
use std::fmt;

/// A Julian Date split into two `f64` parts whose sum is the date.
///
/// Any split is valid. Conventional choices are whole days + fraction,
/// `MJD_ZERO_POINT` + MJD, or J2000.0 + days since J2000.0. Arithmetic applies
/// offsets to the smaller-magnitude part so the large part stays exact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    /// `(MJD_ZERO_POINT, mjd)`.
    pub fn from_mjd(mjd: f64) -> Self {
        Self::new(MJD_ZERO_POINT, mjd)
    }

    /// Julian epoch (e.g. 2005.37) to a Julian Date split as `(MJD_ZERO_POINT, MJD)`.
    pub fn from_julian_epoch(epoch: f64) -> Self {
        Self::new(
            MJD_ZERO_POINT,
            J2000_MJD + (epoch - 2000.0) * DAYS_PER_JULIAN_YEAR,
        )
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn unix_epoch() -> Self {
        Self::new(UNIX_EPOCH_JD, 0.0)
    }

    pub fn jd1(&self) -> f64 {
        self.jd1
    }

    pub fn jd2(&self) -> f64 {
        self.jd2
    }

    /// Single-value Julian Date. Limited to roughly 20 microseconds near the present.
    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn to_mjd(&self) -> f64 {
        (self.jd1 - MJD_ZERO_POINT) + self.jd2
    }

    pub fn julian_epoch(&self) -> f64 {
        2000.0 + ((self.jd1 - J2000_JD) + self.jd2) / DAYS_PER_JULIAN_YEAR
    }

    /// True when `jd1` carries at least as much magnitude as `jd2`.
    pub fn jd1_is_larger(&self) -> bool {
        self.jd1.abs() >= self.jd2.abs()
    }

    /// Adds `days` to whichever part has the smaller magnitude.
    pub fn add_days(&self, days: f64) -> Self {
        if self.jd1_is_larger() {
            Self::new(self.jd1, self.jd2 + days)
        } else {
            Self::new(self.jd1 + days, self.jd2)
        }
    }

    pub fn add_seconds(&self, seconds: f64) -> Self {
        self.add_days(seconds * SECONDS_TO_DAYS)
    }

    pub fn is_finite(&self) -> bool {
        self.jd1.is_finite() && self.jd2.is_finite()
    }

    /// Difference `self - other` in days, formed part by part.
    pub fn days_since(&self, other: &JulianDate) -> f64 {
        (self.jd1 - other.jd1) + (self.jd2 - other.jd2)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

impl From<f64> for JulianDate {
    fn from(jd: f64) -> Self {
        Self::from_f64(jd)
    }
}
