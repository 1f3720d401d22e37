use precastro_time::calendar::{calendar_to_julian_date, cal2jd, CalendarDate};
use precastro_time::civil::julian_date_to_civil;
use precastro_time::leap_seconds::{builtin_table, LeapSecondConfig};
use precastro_time::scales::conversions::{tai_to_tt, tai_to_utc, utc_to_tai};
use precastro_time::{
    convert_time_scale, FuturePolicy, JulianDate, LeapSecondTable, Time, TimeError, TimeScale,
    Validity, ToTAI, ToUTC, UTC,
};
use std::io::Write;
use tempfile::NamedTempFile;

const IERS_FILE: &str = include_str!("data/Leap_Second.dat");
const NIST_FILE: &str = include_str!("data/leap-seconds.list");

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_leap_second_2012_to_tai() {
    let table = builtin_table();
    let utc = calendar_to_julian_date(TimeScale::UTC, table, 2012, 6, 30, 23, 59, 60.5).unwrap();
    assert_eq!(utc.validity(), Validity::Exact);

    let tai = convert_time_scale(utc.into_value(), TimeScale::UTC, TimeScale::TAI, table).unwrap();
    assert_eq!(tai.validity(), Validity::Exact);

    let civil = julian_date_to_civil(TimeScale::TAI, table, tai.into_value(), 1)
        .unwrap()
        .into_value();
    assert_eq!(
        (civil.year, civil.month, civil.day, civil.hour, civil.minute, civil.second, civil.fraction),
        (2012, 7, 1, 0, 0, 34, 5)
    );
}

#[test]
fn test_civil_round_trip() {
    let table = builtin_table();
    let cases = [
        (TimeScale::UTC, (1972, 1, 1, 0, 0, 0.0)),
        (TimeScale::UTC, (2016, 12, 31, 23, 59, 60.125)),
        (TimeScale::UTC, (2020, 2, 29, 13, 14, 15.5)),
        (TimeScale::UTC, (1965, 9, 1, 8, 30, 1.25)),
        (TimeScale::TAI, (1999, 12, 31, 23, 59, 59.875)),
        (TimeScale::TT, (1800, 3, 1, 0, 0, 30.0)),
    ];

    for (scale, (y, m, d, h, mi, s)) in cases {
        let jd = calendar_to_julian_date(scale, table, y, m, d, h, mi, s)
            .unwrap()
            .into_value();
        let civil = julian_date_to_civil(scale, table, jd, 3).unwrap().into_value();
        assert_eq!(
            (civil.year, civil.month as i32, civil.day as i32, civil.hour as i32, civil.minute as i32),
            (y, m, d, h, mi),
            "{} {}-{}-{}",
            scale,
            y,
            m,
            d
        );
        assert_eq!(civil.seconds(), s, "{} {}-{}-{}", scale, y, m, d);
    }
}

#[test]
fn test_builtin_offsets_are_monotonic() {
    let table = builtin_table();
    let mut previous = f64::NEG_INFINITY;
    for year in 1972..=2026 {
        for month in [1, 7] {
            let offset = table.offset_at(year, month, 1, 0.0).unwrap().into_value();
            assert!(offset >= previous, "{}-{:02}: {} < {}", year, month, offset, previous);
            previous = offset;
        }
    }

    for pair in table.entries().windows(2) {
        if pair[0].drift.is_none() && pair[1].drift.is_none() {
            assert!(pair[1].offset >= pair[0].offset);
        }
    }
}

#[test]
fn test_before_1960_is_out_of_range() {
    let table = builtin_table();
    assert!(matches!(table.offset_at(1959, 12, 31, 0.0), Err(TimeError::OutOfRange(_))));
    assert!(table.offset_at(1960, 1, 1, 0.0).is_ok());

    let (jd1, jd2) = cal2jd(1955, 1, 1).unwrap();
    assert!(matches!(
        convert_time_scale(JulianDate::new(jd1, jd2), TimeScale::UTC, TimeScale::TT, table),
        Err(TimeError::OutOfRange(_))
    ));
}

#[test]
fn test_utc_to_tt_is_explicit_composition() {
    let table = builtin_table();
    for (jd1, jd2) in [(2400000.5, 57000.25), (2457754.5, 0.0), (2441317.5, 0.999)] {
        let jd = JulianDate::new(jd1, jd2);
        let direct = convert_time_scale(jd, TimeScale::UTC, TimeScale::TT, table)
            .unwrap()
            .into_value();
        let tai = utc_to_tai(jd, table).unwrap().into_value();
        let composed = tai_to_tt(tai);
        assert_eq!(direct, composed);
    }
}

#[test]
fn test_identity_is_bit_exact() {
    let table = builtin_table();
    let jd = JulianDate::new(2451544.5, 0.123456789012345);
    for scale in TimeScale::ALL {
        let same = convert_time_scale(jd, scale, scale, table).unwrap();
        assert_eq!(same.validity(), Validity::Exact);
        assert_eq!(same.into_value(), jd);
    }
}

#[test]
fn test_tai_utc_round_trip() {
    let table = builtin_table();
    for mjd in [41318.25, 45000.5, 51544.75, 57753.9999, 60000.1] {
        let tai = JulianDate::from_mjd(mjd);
        let utc = convert_time_scale(tai, TimeScale::TAI, TimeScale::UTC, table)
            .unwrap()
            .into_value();
        let back = convert_time_scale(utc, TimeScale::UTC, TimeScale::TAI, table)
            .unwrap()
            .into_value();
        assert!(back.days_since(&tai).abs() < 1e-14, "MJD {}", mjd);
    }
}

#[test]
fn test_typed_api_matches_dynamic() {
    let utc: UTC = "2015-06-30T23:59:60.75".parse().unwrap();
    let tai = utc.to_tai().unwrap();
    let dynamic = convert_time_scale(utc.to_julian_date(), TimeScale::UTC, TimeScale::TAI, builtin_table())
        .unwrap()
        .into_value();
    assert_eq!(tai.to_julian_date(), dynamic);

    let back = tai.to_utc().unwrap();
    assert!(back.to_julian_date().days_since(&utc.to_julian_date()).abs() < 1e-14);
}

#[test]
fn test_file_tables_agree_with_builtin() {
    let iers = write_temp(IERS_FILE);
    let nist = write_temp(NIST_FILE);
    let builtin = builtin_table();

    for config in [
        LeapSecondConfig::iers_file(iers.path()),
        LeapSecondConfig::nist_file(nist.path()),
    ] {
        let table = config.load().unwrap();
        assert_eq!(table.entries(), builtin.entries());
        assert_eq!(table.version().expires, builtin.version().expires);

        for (y, m, d) in [(1962, 3, 1), (1972, 6, 30), (2012, 6, 30), (2016, 12, 31), (2024, 1, 1)] {
            assert_eq!(
                table.offset_at(y, m, d, 0.5).unwrap(),
                builtin.offset_at(y, m, d, 0.5).unwrap()
            );
        }
    }
}

#[test]
fn test_reject_policy_from_config() {
    let nist = write_temp(NIST_FILE);
    let table = LeapSecondConfig::nist_file(nist.path())
        .with_future_policy(FuturePolicy::Reject)
        .load()
        .unwrap();

    assert!(table.offset_at(2026, 12, 28, 0.0).is_ok());
    assert!(matches!(table.offset_at(2026, 12, 29, 0.0), Err(TimeError::OutOfRange(_))));

    let far = Time::from_mjd(70000.0, TimeScale::UTC);
    assert!(far.to_scale_with(TimeScale::TT, &table).is_err());
    assert!(far.to_scale_with(TimeScale::TT, builtin_table()).unwrap().is_dubious());
}

#[test]
fn test_missing_file_is_data_error() {
    let err = LeapSecondConfig::iers_file("/nonexistent/Leap_Second.dat")
        .load()
        .unwrap_err();
    assert!(matches!(err, TimeError::DataError { .. }));
}

#[test]
fn test_removed_leap_second_day() {
    let table = LeapSecondTable::builder()
        .entry(2030, 1, 37.0)
        .entry(2031, 1, 36.0)
        .expires(CalendarDate::new(2031, 6, 28).unwrap())
        .allow_negative_steps(true)
        .build()
        .unwrap();

    // The last minute of 2030-12-31 has only 59 seconds.
    assert!(matches!(
        calendar_to_julian_date(TimeScale::UTC, &table, 2030, 12, 31, 23, 59, 59.5),
        Err(TimeError::InvalidDate(_))
    ));

    let utc = calendar_to_julian_date(TimeScale::UTC, &table, 2030, 12, 31, 23, 59, 58.5)
        .unwrap();
    assert_eq!(utc.validity(), Validity::Exact);
    let utc = utc.into_value();

    let civil = julian_date_to_civil(TimeScale::UTC, &table, utc, 3).unwrap().into_value();
    assert_eq!(civil.to_string(), "2030/12/31 23:59:58.500");

    let midnight = calendar_to_julian_date(TimeScale::UTC, &table, 2031, 1, 1, 0, 0, 0.0)
        .unwrap()
        .into_value();
    let tai = utc_to_tai(utc, &table).unwrap().into_value();
    let tai_midnight = utc_to_tai(midnight, &table).unwrap().into_value();
    let gap = tai_midnight.days_since(&tai) * 86_400.0;
    assert!((gap - 0.5).abs() < 1e-6, "gap {}", gap);

    let back = tai_to_utc(tai, &table).unwrap().into_value();
    let again = utc_to_tai(back, &table).unwrap().into_value();
    assert!(again.days_since(&tai).abs() * 86_400.0 < 1e-9);
    let civil = julian_date_to_civil(TimeScale::UTC, &table, back, 3).unwrap().into_value();
    assert_eq!(civil.to_string(), "2030/12/31 23:59:58.500");
}

#[test]
fn test_expiry_day_is_covered_under_reject() {
    let table = builtin_table().with_policy(FuturePolicy::Reject);
    let expires = table.version().expires;
    let (y, m, d) = (expires.year, expires.month as i32, expires.day as i32);

    let utc = calendar_to_julian_date(TimeScale::UTC, &table, y, m, d, 23, 59, 59.5).unwrap();
    assert_eq!(utc.validity(), Validity::Exact);
    let tai = utc_to_tai(utc.into_value(), &table).unwrap();
    assert_eq!(tai.validity(), Validity::Exact);

    let held = calendar_to_julian_date(TimeScale::UTC, builtin_table(), y, m, d, 12, 0, 0.0).unwrap();
    assert_eq!(held.validity(), Validity::Exact);

    assert!(matches!(
        calendar_to_julian_date(TimeScale::UTC, &table, y, m, d + 1, 0, 0, 0.0),
        Err(TimeError::OutOfRange(_))
    ));
}
