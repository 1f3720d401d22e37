//! Time scales and conversions between them.
//!
//! | Scale | Name | Relation | Supported |
//! |-------|------|----------|-----------|
//! | UTC | Coordinated Universal Time | TAI - (TAI-UTC from the leap-second table) | yes |
//! | TAI | International Atomic Time | hub | yes |
//! | TT | Terrestrial Time | TAI + 32.184 s | yes |
//! | TCG | Geocentric Coordinate Time | TT + L_G rate | yes |
//! | UT1, TDB, TCB | | need Earth rotation or ephemeris data | no |
//!
//! Conversions follow the chain `UTC <-> TAI <-> TT <-> TCG`, one step at a
//! time. Only the UTC step consults the leap-second table, so only it can
//! produce a [`Validity::DubiousYear`](crate::Validity) result.
//!
//! Two interfaces are offered:
//!
//! - [`convert_time_scale`] takes scales as values and an explicit table, and
//!   returns a [`Validated`](crate::Validated) Julian Date.
//! - The [`UTC`], [`TAI`], [`TT`] and [`TCG`] newtypes implement the
//!   [`conversions`] traits (`to_tai()`, `to_utc()`...). These use the builtin
//!   table and reject dubious results with [`TimeError::DubiousYear`].

pub mod conversions;
mod convert;
pub mod tai;
pub mod tcg;
pub mod tt;
pub mod utc;

pub use convert::{convert_time_scale, CONVERSION_CHAIN};
pub use tai::TAI;
pub use tcg::TCG;
pub use tt::TT;
pub use utc::UTC;

use crate::TimeError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[allow(clippy::upper_case_acronyms)]
pub enum TimeScale {
    TAI,
    UTC,
    UT1,
    TT,
    TCG,
    TCB,
    TDB,
}

impl TimeScale {
    pub const ALL: [TimeScale; 7] = [
        TimeScale::TAI,
        TimeScale::UTC,
        TimeScale::UT1,
        TimeScale::TT,
        TimeScale::TCG,
        TimeScale::TCB,
        TimeScale::TDB,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeScale::TAI => "TAI",
            TimeScale::UTC => "UTC",
            TimeScale::UT1 => "UT1",
            TimeScale::TT => "TT",
            TimeScale::TCG => "TCG",
            TimeScale::TCB => "TCB",
            TimeScale::TDB => "TDB",
        }
    }

    /// True for scales [`convert_time_scale`] can reach.
    pub fn is_supported(self) -> bool {
        CONVERSION_CHAIN.contains(&self)
    }

    /// UTC is the only scale whose days can have 86401 seconds.
    pub fn has_leap_seconds(self) -> bool {
        self == TimeScale::UTC
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        TimeScale::ALL
            .into_iter()
            .find(|scale| scale.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TimeError::ParseError(format!("Unknown time scale: '{}'", s)))
    }
}
