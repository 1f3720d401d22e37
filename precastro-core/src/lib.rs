//! Foundational pieces shared by the precastro crates.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Epochs, day/second conversions, Julian year lengths |
//! | [`math`] | C-semantics rounding (`dint`, `dnint`) and `two_sum` |

pub mod constants;
pub mod math;
