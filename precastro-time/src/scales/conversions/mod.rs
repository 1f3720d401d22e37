//! Conversion traits for the scale newtypes, plus the raw Julian Date steps
//! they are built on.
//!
//! | From \ To | UTC | TAI | TT | TCG |
//! |-----------|-----|-----|----|-----|
//! | UTC | identity | table | via TAI | via TAI, TT |
//! | TAI | table, iterative | identity | +32.184 s | via TT |
//! | TT | via TAI | -32.184 s | identity | L_G rate |
//! | TCG | via TT, TAI | via TT | L_G rate | identity |
//!
//! The traits use the builtin leap-second table and are strict: a date past
//! the table's expiry fails with [`TimeError::DubiousYear`](crate::TimeError).
//! For another table, or to accept extrapolated offsets, use the
//! `*_with_table` methods on [`UTC`] and [`TAI`] or
//! [`convert_time_scale`](crate::convert_time_scale).
//!
//! ```
//! use precastro_time::scales::{TAI, TT, UTC};
//! use precastro_time::scales::conversions::{ToTAI, ToTT, ToUTC};
//! use precastro_time::JulianDate;
//!
//! let utc = UTC::from_julian_date(JulianDate::new(2457754.5, 0.5));
//! let tt = utc.to_tt().unwrap();
//! let back = tt.to_utc().unwrap();
//! assert!((back.to_julian_date().jd2() - 0.5).abs() < 1e-12);
//! ```

mod tai_tt;
mod tt_tcg;
mod utc_tai;

pub use tai_tt::{tai_to_tt, tt_to_tai};
pub use tt_tcg::{tcg_to_tt, tt_to_tcg};
pub use utc_tai::{tai_to_utc, utc_to_tai};

use crate::scales::{TAI, TCG, TT, UTC};
use crate::TimeResult;

pub trait ToTAI {
    fn to_tai(&self) -> TimeResult<TAI>;
}

pub trait ToTT {
    fn to_tt(&self) -> TimeResult<TT>;
}

pub trait ToUTC {
    fn to_utc(&self) -> TimeResult<UTC>;
}

pub trait ToTCG {
    fn to_tcg(&self) -> TimeResult<TCG>;
}
