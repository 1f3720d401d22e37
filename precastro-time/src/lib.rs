//! Precision astronomical time: leap seconds, calendars, and time scales.
//!
//! Instants are stored as two-part Julian Dates (`jd1 + jd2`) so that a whole
//! day count and a time-of-day fraction each keep their full `f64` precision.
//! On top of that representation this crate provides:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`leap_seconds`] | Versioned, immutable TAI-UTC table with an explicit extrapolation policy |
//! | [`calendar`] | Gregorian calendar <-> Julian Date (`cal2jd`, `jd2cal`, rounded day fractions) |
//! | [`civil`] | Broken-down date/time with leap-second aware rounding |
//! | [`scales`] | `UTC`, `TAI`, `TT`, `TCG` newtypes and conversions |
//! | [`time`] | [`Time`], a two-part Julian Date tagged with its [`TimeScale`] |
//! | [`parsing`] | ISO 8601 date/time parsing |
//!
//! # Quick Start
//!
//! ```
//! use precastro_time::{Time, TimeScale};
//!
//! // The leap second at the end of June 2012.
//! let utc = Time::from_calendar(2012, 6, 30, 23, 59, 60.5, TimeScale::UTC, false).unwrap();
//! let tai = utc.to_scale(TimeScale::TAI, false).unwrap();
//! assert_eq!(tai.format_calendar(3, false).unwrap(), "2012/07/01 00:00:34.500");
//! ```
//!
//! # Status Reporting
//!
//! Conversions that depend on the leap-second table return
//! [`Validated<T>`](Validated): the value plus a [`Validity`] telling whether the
//! date lies inside the well-established record or had to be extrapolated.
//! Hard failures (bad calendar fields, dates before 1960 UTC, unsupported
//! scales) are [`TimeError`]s.
//!
//! # Features
//!
//! - **`serde`**: `Serialize`/`Deserialize` for the public value types.
//! - **`cli`**: builds the `precastro` command-line tool.

pub mod calendar;
pub mod civil;
pub mod constants;
pub mod julian;
pub mod leap_seconds;
pub mod parsing;
pub mod scales;
pub mod time;
pub mod validity;

pub use civil::CivilDateTime;
pub use julian::JulianDate;
pub use leap_seconds::{FuturePolicy, LeapSecondTable, TableVersion};
pub use scales::conversions::{ToTAI, ToTCG, ToTT, ToUTC};
pub use scales::{convert_time_scale, TimeScale, TAI, TCG, TT, UTC};
pub use time::Time;
pub use validity::{Validated, Validity};

use thiserror::Error;

pub type TimeResult<T> = Result<T, TimeError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeError {
    /// Calendar or clock fields out of range (month 13, February 30, 61 seconds...).
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Date outside the supported era or outside the leap-second table.
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// Date usable but outside the well-validated leap-second record.
    ///
    /// Only raised by strict call sites; lenient ones report
    /// [`Validity::DubiousYear`] instead.
    #[error("Dubious year: {0}")]
    DubiousYear(String),

    /// A computation produced a non-finite value. Indicates a defect.
    #[error("Internal precision loss: {0}")]
    InternalPrecisionLoss(String),

    #[error("Unsupported number of decimal places: {0}")]
    InvalidPrecision(i32),

    #[error("Operation not supported with timescale {0}")]
    UnsupportedTimescale(TimeScale),

    #[error("Parse error: {0}")]
    ParseError(String),

    /// Leap-second data that violates the table invariants.
    #[error("Leap second table error: {0}")]
    TableError(String),

    /// File access failure while loading external data.
    #[error("Data error ({operation}): {message}")]
    DataError { operation: String, message: String },
}

impl TimeError {
    pub fn invalid_date(year: i32, month: i32, day: i32, reason: &str) -> Self {
        Self::InvalidDate(format!("{:04}-{:02}-{:02}: {}", year, month, day, reason))
    }

    pub fn data_error(operation: &str, message: impl std::fmt::Display) -> Self {
        Self::DataError {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }
}
