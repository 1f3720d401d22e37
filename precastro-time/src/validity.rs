//! Success statuses for table-dependent results.
//!
//! A leap-second lookup can succeed in two ways: inside the record the table
//! was built from, or by extrapolation past the table's expiry date. Both are
//! usable, but callers that care (ephemeris code, anything archived) need to
//! tell them apart without paying for an error path in tight loops.

use crate::{TimeError, TimeResult};
use std::fmt;

/// How much a table-dependent result can be trusted.
///
/// Ordered so that `max` of two validities is the weaker one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validity {
    /// Inside the tabulated, well-validated record.
    #[default]
    Exact,
    /// Plausible but extrapolated beyond the table's expiry date.
    DubiousYear,
}

impl Validity {
    /// The weaker of two validities.
    pub fn combine(self, other: Validity) -> Validity {
        self.max(other)
    }

    pub fn is_dubious(self) -> bool {
        self == Validity::DubiousYear
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Exact => write!(f, "exact"),
            Validity::DubiousYear => write!(f, "dubious year"),
        }
    }
}

/// A value together with its [`Validity`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Validated<T> {
    value: T,
    validity: Validity,
}

impl<T> Validated<T> {
    pub fn new(value: T, validity: Validity) -> Self {
        Self { value, validity }
    }

    pub fn exact(value: T) -> Self {
        Self::new(value, Validity::Exact)
    }

    pub fn dubious(value: T) -> Self {
        Self::new(value, Validity::DubiousYear)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn is_dubious(&self) -> bool {
        self.validity.is_dubious()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Splits into value and validity.
    pub fn into_parts(self) -> (T, Validity) {
        (self.value, self.validity)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated::new(f(self.value), self.validity)
    }

    /// Chains a fallible, table-dependent step; the result carries the weaker
    /// of the two validities.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> TimeResult<Validated<U>>) -> TimeResult<Validated<U>> {
        let validity = self.validity;
        let next = f(self.value)?;
        Ok(Validated::new(next.value, validity.combine(next.validity)))
    }

    /// Downgrades the validity if `other` is weaker.
    pub fn with_validity(self, other: Validity) -> Self {
        Self::new(self.value, self.validity.combine(other))
    }

    /// Accepts the value when `dubious_ok` is set or the value is exact.
    pub fn accept(self, dubious_ok: bool) -> TimeResult<T> {
        if dubious_ok {
            Ok(self.value)
        } else {
            self.strict()
        }
    }

    /// Rejects dubious values with [`TimeError::DubiousYear`].
    pub fn strict(self) -> TimeResult<T> {
        match self.validity {
            Validity::Exact => Ok(self.value),
            Validity::DubiousYear => Err(TimeError::DubiousYear(
                "date lies beyond the leap second table's expiry".to_string(),
            )),
        }
    }
}
