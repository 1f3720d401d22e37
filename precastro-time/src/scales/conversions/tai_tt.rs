//! TAI <-> TT: a fixed 32.184 s, applied to the smaller Julian Date part.

use super::{ToTAI, ToTCG, ToTT};
use crate::constants::TT_TAI_OFFSET;
use crate::julian::JulianDate;
use crate::scales::{TAI, TCG, TT};
use crate::TimeResult;
use precastro_core::constants::SECONDS_PER_DAY_F64;

const TT_MINUS_TAI_DAYS: f64 = TT_TAI_OFFSET / SECONDS_PER_DAY_F64;

pub fn tai_to_tt(tai: JulianDate) -> JulianDate {
    tai.add_days(TT_MINUS_TAI_DAYS)
}

pub fn tt_to_tai(tt: JulianDate) -> JulianDate {
    tt.add_days(-TT_MINUS_TAI_DAYS)
}

impl ToTAI for TAI {
    fn to_tai(&self) -> TimeResult<TAI> {
        Ok(*self)
    }
}

impl ToTT for TT {
    fn to_tt(&self) -> TimeResult<TT> {
        Ok(*self)
    }
}

impl ToTT for TAI {
    fn to_tt(&self) -> TimeResult<TT> {
        Ok(TT::from_julian_date(tai_to_tt(self.to_julian_date())))
    }
}

impl ToTAI for TT {
    fn to_tai(&self) -> TimeResult<TAI> {
        Ok(TAI::from_julian_date(tt_to_tai(self.to_julian_date())))
    }
}

impl ToTCG for TAI {
    fn to_tcg(&self) -> TimeResult<TCG> {
        self.to_tt()?.to_tcg()
    }
}

impl ToTAI for TCG {
    fn to_tai(&self) -> TimeResult<TAI> {
        self.to_tt()?.to_tai()
    }
}
