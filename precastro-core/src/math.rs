//! Floating-point helpers with C semantics.
//!
//! The calendar and rounding algorithms are specified in terms of truncation
//! toward zero and round-half-away-from-zero. `f64::round_ties_even` has
//! different tie behaviour, so the C-flavoured versions live here.

/// Truncates toward zero.
#[inline]
pub fn dint(a: f64) -> f64 {
    libm::trunc(a)
}

/// Rounds to the nearest whole number, halfway cases away from zero.
#[inline]
pub fn dnint(a: f64) -> f64 {
    if a.abs() < 0.5 {
        0.0
    } else if a < 0.0 {
        libm::ceil(a - 0.5)
    } else {
        libm::floor(a + 0.5)
    }
}

/// Error-free sum of two doubles (Knuth's two-sum).
///
/// Returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e` exactly.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let e = (a - (s - bb)) + (b - bb);
    (s, e)
}
