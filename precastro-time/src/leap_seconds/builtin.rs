use super::table::{FuturePolicy, LeapSecondEntry, LeapSecondTable, TableVersion};
use crate::calendar::CalendarDate;
use once_cell::sync::Lazy;

/// Label reported by [`TableVersion`] for the compiled-in table.
pub const BUILTIN_LABEL: &str = "builtin-2026-01";

pub const BUILTIN_UPDATED: CalendarDate = CalendarDate {
    year: 2026,
    month: 1,
    day: 5,
};

/// Offsets for later dates are extrapolated.
pub const BUILTIN_EXPIRES: CalendarDate = CalendarDate {
    year: 2026,
    month: 12,
    day: 28,
};

/// TAI-UTC since 1960. The first 14 entries carry the linear drift of the
/// pre-1972 definition of UTC.
pub const BUILTIN_ENTRIES: [LeapSecondEntry; 42] = [
    LeapSecondEntry::with_drift(1960, 1, 1.417_818_0, 37300.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1961, 1, 1.422_818_0, 37300.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1961, 8, 1.372_818_0, 37300.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1962, 1, 1.845_858_0, 37665.0, 0.001_123_2),
    LeapSecondEntry::with_drift(1963, 11, 1.945_858_0, 37665.0, 0.001_123_2),
    LeapSecondEntry::with_drift(1964, 1, 3.240_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1964, 4, 3.340_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1964, 9, 3.440_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1965, 1, 3.540_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1965, 3, 3.640_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1965, 7, 3.740_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1965, 9, 3.840_130_0, 38761.0, 0.001_296_0),
    LeapSecondEntry::with_drift(1966, 1, 4.313_170_0, 39126.0, 0.002_592_0),
    LeapSecondEntry::with_drift(1968, 2, 4.213_170_0, 39126.0, 0.002_592_0),
    LeapSecondEntry::new(1972, 1, 10.0),
    LeapSecondEntry::new(1972, 7, 11.0),
    LeapSecondEntry::new(1973, 1, 12.0),
    LeapSecondEntry::new(1974, 1, 13.0),
    LeapSecondEntry::new(1975, 1, 14.0),
    LeapSecondEntry::new(1976, 1, 15.0),
    LeapSecondEntry::new(1977, 1, 16.0),
    LeapSecondEntry::new(1978, 1, 17.0),
    LeapSecondEntry::new(1979, 1, 18.0),
    LeapSecondEntry::new(1980, 1, 19.0),
    LeapSecondEntry::new(1981, 7, 20.0),
    LeapSecondEntry::new(1982, 7, 21.0),
    LeapSecondEntry::new(1983, 7, 22.0),
    LeapSecondEntry::new(1985, 7, 23.0),
    LeapSecondEntry::new(1988, 1, 24.0),
    LeapSecondEntry::new(1990, 1, 25.0),
    LeapSecondEntry::new(1991, 1, 26.0),
    LeapSecondEntry::new(1992, 7, 27.0),
    LeapSecondEntry::new(1993, 7, 28.0),
    LeapSecondEntry::new(1994, 7, 29.0),
    LeapSecondEntry::new(1996, 1, 30.0),
    LeapSecondEntry::new(1997, 7, 31.0),
    LeapSecondEntry::new(1999, 1, 32.0),
    LeapSecondEntry::new(2006, 1, 33.0),
    LeapSecondEntry::new(2009, 1, 34.0),
    LeapSecondEntry::new(2012, 7, 35.0),
    LeapSecondEntry::new(2015, 7, 36.0),
    LeapSecondEntry::new(2017, 1, 37.0),
];

/// Number of leading entries in [`BUILTIN_ENTRIES`] that carry drift.
pub(crate) const DRIFT_ERA_ENTRIES: usize = 14;

static BUILTIN_TABLE: Lazy<LeapSecondTable> = Lazy::new(|| {
    LeapSecondTable::from_validated(
        BUILTIN_ENTRIES.to_vec(),
        TableVersion {
            label: BUILTIN_LABEL.to_string(),
            updated: Some(BUILTIN_UPDATED),
            expires: BUILTIN_EXPIRES,
        },
        FuturePolicy::HoldLastOffset,
    )
});

/// The compiled-in table, shared by the whole process.
pub fn builtin_table() -> &'static LeapSecondTable {
    &BUILTIN_TABLE
}

/// The pre-1972 drift entries, prepended to tables loaded from files that
/// start at 1972.
pub(crate) fn drift_era() -> &'static [LeapSecondEntry] {
    &BUILTIN_ENTRIES[..DRIFT_ERA_ENTRIES]
}
