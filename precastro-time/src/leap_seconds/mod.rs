//! TAI-UTC leap-second table.
//!
//! A [`LeapSecondTable`] is an immutable, ordered list of TAI-UTC steps with
//! a [`TableVersion`] (label, update date, expiry date) and a
//! [`FuturePolicy`] for dates past the expiry. Lookups return
//! [`Validated`](crate::Validated) offsets:
//!
//! | Date | Result |
//! |------|--------|
//! | before 1960-01-01 (first entry) | `Err(OutOfRange)` |
//! | 1960-1971 | drift-corrected offset, exact |
//! | 1972 up to expiry | tabulated integer offset, exact |
//! | after expiry, `HoldLastOffset` | last offset, dubious year |
//! | after expiry, `Reject` | `Err(OutOfRange)` |
//!
//! The compiled-in table is available process-wide through [`builtin_table`].
//! Newer data can be loaded from IERS or NIST files via [`LeapSecondConfig`]
//! and passed explicitly to conversions; tables are never mutated in place.
//!
//! ```
//! use precastro_time::leap_seconds::builtin_table;
//!
//! let dat = builtin_table().offset_at(2017, 1, 1, 0.0).unwrap();
//! assert_eq!(dat.into_value(), 37.0);
//! ```

mod builtin;
mod config;
mod parse;
mod table;

pub use builtin::{builtin_table, BUILTIN_ENTRIES, BUILTIN_EXPIRES, BUILTIN_LABEL, BUILTIN_UPDATED};
pub use config::{LeapSecondConfig, TableSource};
pub use parse::{parse_iers, parse_nist, FileFormat, LeapSecondFile};
pub use table::{
    DriftTerm, FuturePolicy, LeapSecondEntry, LeapSecondTable, LeapSecondTableBuilder, TableVersion, UtcDay,
};
