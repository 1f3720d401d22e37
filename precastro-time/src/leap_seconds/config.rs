use super::builtin::builtin_table;
use super::parse::{parse_iers, parse_nist, LeapSecondFile};
use super::table::{FuturePolicy, LeapSecondTable};
use crate::calendar::CalendarDate;
use crate::julian::JulianDate;
use crate::{TimeError, TimeResult};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the leap-second table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TableSource {
    #[default]
    Builtin,
    /// IERS `Leap_Second.dat`.
    IersFile(PathBuf),
    /// NIST `leap-seconds.list`.
    NistFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeapSecondConfig {
    pub source: TableSource,

    pub future_policy: FuturePolicy,

    /// Accept tables whose offset decreases (removed leap seconds).
    pub allow_negative_steps: bool,
}

impl LeapSecondConfig {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn iers_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TableSource::IersFile(path.into()),
            ..Self::default()
        }
    }

    pub fn nist_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: TableSource::NistFile(path.into()),
            ..Self::default()
        }
    }

    pub fn with_future_policy(mut self, policy: FuturePolicy) -> Self {
        self.future_policy = policy;
        self
    }

    pub fn with_negative_steps(mut self, allow: bool) -> Self {
        self.allow_negative_steps = allow;
        self
    }

    /// Builds the configured table.
    ///
    /// Logs a warning when the table's expiry date has already passed on the
    /// system clock; lookups beyond it follow `future_policy`.
    pub fn load(&self) -> TimeResult<LeapSecondTable> {
        let table = match &self.source {
            TableSource::Builtin => builtin_table().with_policy(self.future_policy),
            TableSource::IersFile(path) => self.load_file(path, parse_iers)?,
            TableSource::NistFile(path) => self.load_file(path, parse_nist)?,
        };

        if let Some(today) = today_utc() {
            if table.is_expired_on(today) {
                tracing::warn!(
                    version = %table.version(),
                    %today,
                    "leap second table has expired; later dates are extrapolated"
                );
            }
        }

        Ok(table)
    }

    fn load_file(
        &self,
        path: &Path,
        parse: fn(&str) -> TimeResult<LeapSecondFile>,
    ) -> TimeResult<LeapSecondTable> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimeError::data_error("read leap second file", format!("{}: {}", path.display(), e))
        })?;

        let table = parse(&content)?
            .into_builder()?
            .policy(self.future_policy)
            .allow_negative_steps(self.allow_negative_steps)
            .build()?;

        tracing::info!(
            path = %path.display(),
            entries = table.len(),
            version = %table.version(),
            "loaded leap second table"
        );
        Ok(table)
    }
}

fn today_utc() -> Option<CalendarDate> {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let days = (elapsed.as_secs() / 86_400) as f64;
    CalendarDate::from_julian_date(JulianDate::unix_epoch().add_days(days)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const IERS: &str = "\
#  File expires on 28 June 2026
    41317.0    1  1 1972       10
    41499.0    1  7 1972       11
    57754.0    1  1 2017       37
";

    #[test]
    fn test_default_is_builtin() {
        let config = LeapSecondConfig::default();
        assert_eq!(config.source, TableSource::Builtin);
        assert_eq!(config.future_policy, FuturePolicy::HoldLastOffset);
        assert_eq!(&config.load().unwrap(), builtin_table());
    }

    #[test]
    fn test_builtin_with_reject_policy() {
        let table = LeapSecondConfig::builtin()
            .with_future_policy(FuturePolicy::Reject)
            .load()
            .unwrap();
        assert_eq!(table.policy(), FuturePolicy::Reject);
        assert!(matches!(
            table.offset_at(2040, 1, 1, 0.0),
            Err(TimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_load_iers_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(IERS.as_bytes()).unwrap();

        let table = LeapSecondConfig::iers_file(file.path()).load().unwrap();
        assert_eq!(table.len(), 14 + 3);
        assert_eq!(table.offset_at(2000, 1, 1, 0.0).unwrap().into_value(), 11.0);
        assert_eq!(table.offset_at(2017, 1, 1, 0.0).unwrap().into_value(), 37.0);
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = LeapSecondConfig::nist_file("/nonexistent/leap-seconds.list")
            .load()
            .unwrap_err();
        assert!(matches!(err, TimeError::DataError { .. }));
    }

    #[test]
    fn test_malformed_file_is_table_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not a leap second file\n").unwrap();

        let err = LeapSecondConfig::iers_file(file.path()).load().unwrap_err();
        assert!(matches!(err, TimeError::TableError(_)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_from_json() {
        let config: LeapSecondConfig = serde_json::from_str(
            r#"{"source": {"nist_file": "/data/leap-seconds.list"}, "future_policy": "reject"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            LeapSecondConfig::nist_file("/data/leap-seconds.list")
                .with_future_policy(FuturePolicy::Reject)
        );

        let empty: LeapSecondConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LeapSecondConfig::default());
    }
}
