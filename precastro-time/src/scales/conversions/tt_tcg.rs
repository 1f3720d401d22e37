//! TT <-> TCG.
//!
//! TCG runs faster than TT by the defining rate L_G (IAU 2000 B1.9):
//!
//! ```text
//! TCG - TT = L_G * (JD_TT - T0) * 86400 s,   T0 = MJD 43144.0003725 (1977-01-01T00:00:32.184 TT)
//! ```
//!
//! Forward uses `L_G / (1 - L_G)` so that the inverse can use `L_G` on TCG
//! directly. At J2000.0 TCG is about 0.506 s ahead of TT.

use super::{ToTCG, ToTT};
use crate::constants::{TCG_RATE_LG, TCG_RATE_RATIO, TCG_REFERENCE_EPOCH};
use crate::julian::JulianDate;
use crate::scales::{TCG, TT};
use crate::TimeResult;
use precastro_core::constants::MJD_ZERO_POINT;

pub fn tt_to_tcg(tt: JulianDate) -> JulianDate {
    let (jd1, jd2) = (tt.jd1(), tt.jd2());
    if jd1.abs() > jd2.abs() {
        let correction = ((jd1 - MJD_ZERO_POINT) + (jd2 - TCG_REFERENCE_EPOCH)) * TCG_RATE_RATIO;
        JulianDate::new(jd1, jd2 + correction)
    } else {
        let correction = ((jd2 - MJD_ZERO_POINT) + (jd1 - TCG_REFERENCE_EPOCH)) * TCG_RATE_RATIO;
        JulianDate::new(jd1 + correction, jd2)
    }
}

pub fn tcg_to_tt(tcg: JulianDate) -> JulianDate {
    let (jd1, jd2) = (tcg.jd1(), tcg.jd2());
    if jd1.abs() > jd2.abs() {
        let correction = ((jd1 - MJD_ZERO_POINT) + (jd2 - TCG_REFERENCE_EPOCH)) * TCG_RATE_LG;
        JulianDate::new(jd1, jd2 - correction)
    } else {
        let correction = ((jd2 - MJD_ZERO_POINT) + (jd1 - TCG_REFERENCE_EPOCH)) * TCG_RATE_LG;
        JulianDate::new(jd1 - correction, jd2)
    }
}

impl ToTCG for TCG {
    fn to_tcg(&self) -> TimeResult<TCG> {
        Ok(*self)
    }
}

impl ToTCG for TT {
    fn to_tcg(&self) -> TimeResult<TCG> {
        Ok(TCG::from_julian_date(tt_to_tcg(self.to_julian_date())))
    }
}

impl ToTT for TCG {
    fn to_tt(&self) -> TimeResult<TT> {
        Ok(TT::from_julian_date(tcg_to_tt(self.to_julian_date())))
    }
}
