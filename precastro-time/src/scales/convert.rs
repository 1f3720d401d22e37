use super::conversions::{tai_to_tt, tai_to_utc, tcg_to_tt, tt_to_tai, tt_to_tcg, utc_to_tai};
use super::TimeScale;
use crate::julian::JulianDate;
use crate::leap_seconds::LeapSecondTable;
use crate::validity::Validated;
use crate::{TimeError, TimeResult};

/// Scales reachable by [`convert_time_scale`], in chain order.
pub const CONVERSION_CHAIN: [TimeScale; 4] = [TimeScale::UTC, TimeScale::TAI, TimeScale::TT, TimeScale::TCG];

/// Converts a two-part Julian Date between time scales.
///
/// Walks `UTC <-> TAI <-> TT <-> TCG` one step at a time; the result carries
/// the weakest validity met on the way. Converting a scale to itself returns
/// `jd` unchanged.
///
/// # Errors
///
/// - [`TimeError::UnsupportedTimescale`] when either scale is off the chain.
/// - [`TimeError::OutOfRange`] for a non-finite input or a UTC step before the
///   table starts (or after expiry under [`FuturePolicy::Reject`](crate::FuturePolicy)).
/// - [`TimeError::InternalPrecisionLoss`] if the result is not finite.
pub fn convert_time_scale(
    jd: JulianDate,
    from: TimeScale,
    to: TimeScale,
    table: &LeapSecondTable,
) -> TimeResult<Validated<JulianDate>> {
    if from == to {
        return Ok(Validated::exact(jd));
    }

    let start = chain_position(from)?;
    let end = chain_position(to)?;

    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(format!(
            "non-finite Julian Date ({}, {})",
            jd.jd1(),
            jd.jd2()
        )));
    }

    let mut current = Validated::exact(jd);
    if start < end {
        for &scale in &CONVERSION_CHAIN[start..end] {
            current = current.and_then(|jd| step_forward(scale, jd, table))?;
        }
    } else {
        for &scale in CONVERSION_CHAIN[end + 1..=start].iter().rev() {
            current = current.and_then(|jd| step_back(scale, jd, table))?;
        }
    }

    let result = current.value();
    if !result.is_finite() {
        return Err(TimeError::InternalPrecisionLoss(format!(
            "{} -> {} produced ({}, {})",
            from,
            to,
            result.jd1(),
            result.jd2()
        )));
    }

    tracing::trace!(%from, %to, validity = %current.validity(), "converted time scale");
    Ok(current)
}

fn chain_position(scale: TimeScale) -> TimeResult<usize> {
    CONVERSION_CHAIN
        .iter()
        .position(|&s| s == scale)
        .ok_or(TimeError::UnsupportedTimescale(scale))
}

// One step towards TCG from `scale`.
fn step_forward(scale: TimeScale, jd: JulianDate, table: &LeapSecondTable) -> TimeResult<Validated<JulianDate>> {
    match scale {
        TimeScale::UTC => utc_to_tai(jd, table),
        TimeScale::TAI => Ok(Validated::exact(tai_to_tt(jd))),
        TimeScale::TT => Ok(Validated::exact(tt_to_tcg(jd))),
        other => Err(TimeError::UnsupportedTimescale(other)),
    }
}

// One step towards UTC from `scale`.
fn step_back(scale: TimeScale, jd: JulianDate, table: &LeapSecondTable) -> TimeResult<Validated<JulianDate>> {
    match scale {
        TimeScale::TAI => tai_to_utc(jd, table),
        TimeScale::TT => Ok(Validated::exact(tt_to_tai(jd))),
        TimeScale::TCG => Ok(Validated::exact(tcg_to_tt(jd))),
        other => Err(TimeError::UnsupportedTimescale(other)),
    }
}
