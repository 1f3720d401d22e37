use crate::calendar::{cal2jd, jd2cal, next_calendar_day, CalendarDate};
use crate::julian::JulianDate;
use crate::validity::Validated;
use crate::{TimeError, TimeResult};
use std::fmt;

/// Linear drift of TAI-UTC during the 1960-1971 rubber-second era.
///
/// `TAI-UTC = offset + (MJD - reference_mjd) * rate`, with `rate` in seconds
/// per day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftTerm {
    pub reference_mjd: f64,
    pub rate: f64,
}

/// One step of the table, effective from 0h UTC on the first of `month`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeapSecondEntry {
    pub year: i32,
    pub month: u8,
    /// TAI-UTC in seconds at the step (before drift).
    pub offset: f64,
    pub drift: Option<DriftTerm>,
}

impl LeapSecondEntry {
    pub const fn new(year: i32, month: u8, offset: f64) -> Self {
        Self {
            year,
            month,
            offset,
            drift: None,
        }
    }

    pub const fn with_drift(year: i32, month: u8, offset: f64, reference_mjd: f64, rate: f64) -> Self {
        Self {
            year,
            month,
            offset,
            drift: Some(DriftTerm {
                reference_mjd,
                rate,
            }),
        }
    }

    pub fn epoch(&self) -> CalendarDate {
        CalendarDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    fn month_index(&self) -> i64 {
        month_index(self.year, self.month as i32)
    }
}

fn month_index(year: i32, month: i32) -> i64 {
    12 * year as i64 + month as i64
}

/// What to do for dates after the table's expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FuturePolicy {
    /// Keep using the last tabulated offset and mark results
    /// [`Validity::DubiousYear`](crate::Validity::DubiousYear).
    #[default]
    HoldLastOffset,
    /// Fail with [`TimeError::OutOfRange`]; the table needs updating.
    Reject,
}

/// Provenance of a table, inspectable so that stale data is visible.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableVersion {
    pub label: String,
    pub updated: Option<CalendarDate>,
    /// Last date through which no unlisted leap second can have occurred.
    pub expires: CalendarDate,
}

impl fmt::Display for TableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if let Some(updated) = self.updated {
            write!(f, " (updated {})", updated)?;
        }
        write!(f, ", expires {}", self.expires)
    }
}

/// TAI-UTC bookkeeping for one UTC calendar day.
///
/// Derived from the offsets at 0h, 12h and 0h of the following day: the
/// 0h/12h difference exposes drift, and whatever is left at the end of the
/// day is a leap second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcDay {
    /// TAI-UTC at 0h, seconds.
    pub offset_at_start: f64,
    /// Drift accumulated over the day, seconds.
    pub drift: f64,
    /// Step at the end of the day: +1 for an inserted leap second, -1 for a
    /// removed one, 0 otherwise.
    pub leap: f64,
}

impl UtcDay {
    pub fn has_leap_second(&self) -> bool {
        self.leap.abs() > 0.5
    }
}

/// Immutable, versioned table of TAI-UTC.
///
/// Build one with [`LeapSecondTable::builder`], load one from a leap-second
/// file (see [`crate::leap_seconds::LeapSecondConfig`]), or use the process-wide
/// [`builtin_table`](crate::leap_seconds::builtin_table).
#[derive(Debug, Clone, PartialEq)]
pub struct LeapSecondTable {
    entries: Vec<LeapSecondEntry>,
    version: TableVersion,
    policy: FuturePolicy,
}

impl LeapSecondTable {
    pub fn builder() -> LeapSecondTableBuilder {
        LeapSecondTableBuilder::new()
    }

    // Entries must already satisfy the builder's invariants.
    pub(crate) fn from_validated(entries: Vec<LeapSecondEntry>, version: TableVersion, policy: FuturePolicy) -> Self {
        Self {
            entries,
            version,
            policy,
        }
    }

    pub fn entries(&self) -> &[LeapSecondEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self) -> &TableVersion {
        &self.version
    }

    pub fn policy(&self) -> FuturePolicy {
        self.policy
    }

    /// Copy of this table with a different future policy.
    pub fn with_policy(&self, policy: FuturePolicy) -> Self {
        Self {
            policy,
            ..self.clone()
        }
    }

    /// First date the table covers; earlier dates are out of range.
    pub fn first_epoch(&self) -> CalendarDate {
        self.entries[0].epoch()
    }

    pub fn last_entry(&self) -> &LeapSecondEntry {
        &self.entries[self.entries.len() - 1]
    }

    pub fn is_expired_on(&self, date: CalendarDate) -> bool {
        date > self.version.expires
    }

    /// TAI-UTC in seconds at `fraction` of the given UTC day.
    ///
    /// # Errors
    ///
    /// - [`TimeError::InvalidDate`] for invalid calendar fields or a fraction
    ///   outside `[0, 1]`.
    /// - [`TimeError::OutOfRange`] before the first entry, or after expiry
    ///   under [`FuturePolicy::Reject`].
    pub fn offset_at(&self, year: i32, month: i32, day: i32, fraction: f64) -> TimeResult<Validated<f64>> {
        let tai_minus_utc = self.tabulated_offset(year, month, day, fraction)?;

        let date = CalendarDate {
            year,
            month: month as u8,
            day: day as u8,
        };
        if !self.is_expired_on(date) {
            return Ok(Validated::exact(tai_minus_utc));
        }

        match self.policy {
            FuturePolicy::HoldLastOffset => {
                tracing::debug!(
                    %date,
                    expires = %self.version.expires,
                    offset = tai_minus_utc,
                    "holding last TAI-UTC offset beyond table expiry"
                );
                Ok(Validated::dubious(tai_minus_utc))
            }
            FuturePolicy::Reject => Err(TimeError::OutOfRange(format!(
                "{} is after the leap second table expiry {}; table needs updating",
                date, self.version.expires
            ))),
        }
    }

    /// Table lookup plus drift, without the expiry check.
    fn tabulated_offset(&self, year: i32, month: i32, day: i32, fraction: f64) -> TimeResult<f64> {
        let (_, mjd) = cal2jd(year, month, day)?;

        if !(0.0..=1.0).contains(&fraction) {
            return Err(TimeError::invalid_date(
                year,
                month,
                day,
                &format!("day fraction {} outside [0, 1]", fraction),
            ));
        }

        let m = month_index(year, month);
        let i = match self.entries.binary_search_by(|entry| entry.month_index().cmp(&m)) {
            Ok(idx) => idx,
            Err(0) => {
                return Err(TimeError::OutOfRange(format!(
                    "{:04}-{:02}-{:02} precedes the leap second table (starts {})",
                    year,
                    month,
                    day,
                    self.first_epoch()
                )))
            }
            Err(idx) => idx - 1,
        };

        let entry = &self.entries[i];
        let mut tai_minus_utc = entry.offset;
        if let Some(drift) = entry.drift {
            tai_minus_utc += (mjd + fraction - drift.reference_mjd) * drift.rate;
        }
        Ok(tai_minus_utc)
    }

    /// TAI-UTC at the instant given by a UTC Julian Date.
    pub fn offset_at_jd(&self, utc: JulianDate) -> TimeResult<Validated<f64>> {
        let (year, month, day, fraction) = jd2cal(utc.jd1(), utc.jd2())?;
        self.offset_at(year, month, day, fraction)
    }

    /// Offsets at the start, middle and end of a UTC day.
    ///
    /// The end of the expiry day is still covered by the table, so the
    /// following midnight is only checked against the policy when the day
    /// itself is past expiry.
    pub fn utc_day(&self, year: i32, month: i32, day: i32) -> TimeResult<Validated<UtcDay>> {
        let dat0 = self.offset_at(year, month, day, 0.0)?;
        let dat12 = self.offset_at(year, month, day, 0.5)?;
        let (next_year, next_month, next_day) = next_calendar_day(year, month, day)?;
        let dat24 = if dat0.is_dubious() {
            self.offset_at(next_year, next_month, next_day, 0.0)?
        } else {
            Validated::exact(self.tabulated_offset(next_year, next_month, next_day, 0.0)?)
        };

        let validity = dat0
            .validity()
            .combine(dat12.validity())
            .combine(dat24.validity());
        let (dat0, dat12, dat24) = (dat0.into_value(), dat12.into_value(), dat24.into_value());

        let drift = 2.0 * (dat12 - dat0);
        Ok(Validated::new(
            UtcDay {
                offset_at_start: dat0,
                drift,
                leap: dat24 - (dat0 + drift),
            },
            validity,
        ))
    }

    /// Seconds added to (or removed from) the end of a UTC day.
    pub fn leap_at_end_of_day(&self, year: i32, month: i32, day: i32) -> TimeResult<Validated<f64>> {
        Ok(self.utc_day(year, month, day)?.map(|d| d.leap))
    }
}

/// Validating builder for [`LeapSecondTable`].
///
/// Invariants checked by [`build`](Self::build):
/// - at least one entry, months in 1..=12, finite offsets;
/// - epochs strictly ascending;
/// - drift entries only before the first plain entry;
/// - plain offsets non-decreasing, unless
///   [`allow_negative_steps`](Self::allow_negative_steps) is set;
/// - an expiry date no earlier than the last epoch.
#[derive(Debug, Clone, Default)]
pub struct LeapSecondTableBuilder {
    entries: Vec<LeapSecondEntry>,
    label: Option<String>,
    updated: Option<CalendarDate>,
    expires: Option<CalendarDate>,
    policy: FuturePolicy,
    allow_negative_steps: bool,
}

impl LeapSecondTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, year: i32, month: u8, offset: f64) -> Self {
        self.entries.push(LeapSecondEntry::new(year, month, offset));
        self
    }

    pub fn drift_entry(mut self, year: i32, month: u8, offset: f64, reference_mjd: f64, rate: f64) -> Self {
        self.entries
            .push(LeapSecondEntry::with_drift(year, month, offset, reference_mjd, rate));
        self
    }

    pub fn entries(mut self, entries: impl IntoIterator<Item = LeapSecondEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn updated(mut self, date: CalendarDate) -> Self {
        self.updated = Some(date);
        self
    }

    pub fn expires(mut self, date: CalendarDate) -> Self {
        self.expires = Some(date);
        self
    }

    pub fn policy(mut self, policy: FuturePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Permit plain entries whose offset decreases (a removed leap second).
    pub fn allow_negative_steps(mut self, allow: bool) -> Self {
        self.allow_negative_steps = allow;
        self
    }

    pub fn build(self) -> TimeResult<LeapSecondTable> {
        if self.entries.is_empty() {
            return Err(TimeError::TableError("table has no entries".to_string()));
        }

        let mut previous: Option<&LeapSecondEntry> = None;
        let mut last_plain_offset: Option<f64> = None;

        for entry in &self.entries {
            if !(1..=12).contains(&entry.month) {
                return Err(TimeError::TableError(format!(
                    "entry {}-{:02} has an invalid month",
                    entry.year, entry.month
                )));
            }
            if !entry.offset.is_finite() {
                return Err(TimeError::TableError(format!(
                    "entry {} has a non-finite offset",
                    entry.epoch()
                )));
            }

            if let Some(prev) = previous {
                if entry.month_index() <= prev.month_index() {
                    return Err(TimeError::TableError(format!(
                        "entry {} does not follow {}",
                        entry.epoch(),
                        prev.epoch()
                    )));
                }
            }

            match entry.drift {
                Some(_) if last_plain_offset.is_some() => {
                    return Err(TimeError::TableError(format!(
                        "drift entry {} follows a leap second entry",
                        entry.epoch()
                    )));
                }
                Some(_) => {}
                None => {
                    if let Some(last) = last_plain_offset {
                        if entry.offset < last && !self.allow_negative_steps {
                            return Err(TimeError::TableError(format!(
                                "offset decreases at {} ({} -> {})",
                                entry.epoch(),
                                last,
                                entry.offset
                            )));
                        }
                    }
                    last_plain_offset = Some(entry.offset);
                }
            }

            previous = Some(entry);
        }

        let last_epoch = self.entries[self.entries.len() - 1].epoch();
        let expires = self.expires.ok_or_else(|| {
            TimeError::TableError("table has no expiry date".to_string())
        })?;
        if expires < last_epoch {
            return Err(TimeError::TableError(format!(
                "expiry {} precedes the last entry {}",
                expires, last_epoch
            )));
        }

        let version = TableVersion {
            label: self.label.unwrap_or_else(|| "custom".to_string()),
            updated: self.updated,
            expires,
        };

        tracing::debug!(
            entries = self.entries.len(),
            version = %version,
            "built leap second table"
        );

        Ok(LeapSecondTable::from_validated(
            self.entries,
            version,
            self.policy,
        ))
    }
}
