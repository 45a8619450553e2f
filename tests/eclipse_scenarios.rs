//! End-to-end sampling of the 2020 June 21 annular eclipse as seen from Bengaluru.

use approx::assert_abs_diff_eq;
use chrono::{NaiveTime, TimeZone, Utc};
use eclipse_ephemeris::config::{ObservationConfig, TimeWindow};
use eclipse_ephemeris::topocentric::angular_size_arcmin;
use eclipse_ephemeris::{Body, EphemerisTable, Error, Sampler};

fn default_table() -> EphemerisTable {
    let config = ObservationConfig::default();
    let sampler = Sampler::builtin(config.observer().unwrap());
    EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap()
}

fn is_rounded(value: f64) -> bool {
    format!("{value:.3}").parse::<f64>().unwrap() == value
}

#[test]
fn default_window_yields_one_row_per_minute() {
    let table = default_table();
    assert_eq!(table.len(), 21);

    let first = table.rows()[0].ut;
    let last = table.rows()[20].ut;
    assert_eq!(first, Utc.with_ymd_and_hms(2020, 6, 21, 4, 30, 0).unwrap());
    assert_eq!(last, Utc.with_ymd_and_hms(2020, 6, 21, 4, 50, 0).unwrap());

    for pair in table.rows().windows(2) {
        assert_eq!((pair[1].ut - pair[0].ut).num_seconds(), 60);
    }
}

#[test]
fn all_values_have_three_decimals() {
    for row in &default_table() {
        for value in [
            row.position_angle,
            row.sun_altitude,
            row.sun_azimuth,
            row.sun_size,
            row.moon_altitude,
            row.moon_azimuth,
            row.moon_size,
            row.separation,
        ] {
            assert!(is_rounded(value), "{value} at {} is not rounded", row.ut);
        }
    }
}

#[test]
fn values_stay_in_range() {
    for row in &default_table() {
        assert!((0.0..360.0).contains(&row.position_angle));
        assert!((0.0..360.0).contains(&row.sun_azimuth));
        assert!((0.0..360.0).contains(&row.moon_azimuth));
        assert!((-90.0..=90.0).contains(&row.sun_altitude));
        assert!((-90.0..=90.0).contains(&row.moon_altitude));
    }
}

#[test]
fn sun_and_moon_climb_through_the_morning() {
    let table = default_table();
    for pair in table.rows().windows(2) {
        assert!(pair[1].sun_altitude > pair[0].sun_altitude);
        assert!(pair[1].moon_altitude > pair[0].moon_altitude);
    }

    let first = &table.rows()[0];
    assert!(first.sun_altitude > 50.0 && first.sun_altitude < 60.0);
    // East-north-east in the morning
    assert!(first.sun_azimuth > 60.0 && first.sun_azimuth < 75.0);
}

#[test]
fn moon_approaches_sun_before_first_contact() {
    let table = default_table();
    let first = &table.rows()[0];
    let last = &table.rows()[20];

    // 10:00 IST is minutes before first contact
    assert!(first.separation < 1.5);
    assert!(!first.is_eclipsed());
    assert!(last.is_eclipsed());
    assert!(last.separation < first.separation);

    // The Moon closes in from the west
    assert!(first.position_angle > 225.0 && first.position_angle < 315.0);
}

#[test]
fn annular_geometry_moon_smaller_than_sun() {
    for row in &default_table() {
        assert!(row.moon_size < row.sun_size);
        assert_abs_diff_eq!(row.sun_size, 31.46, epsilon = 0.05);
        assert!(row.moon_size > 30.9 && row.moon_size < 31.4);
    }
}

#[test]
fn eclipse_in_progress_near_maximum() {
    let config = ObservationConfig {
        window_start: NaiveTime::from_hms_opt(11, 45, 0).unwrap(),
        window_end: NaiveTime::from_hms_opt(11, 45, 0).unwrap(),
        ..ObservationConfig::default()
    };
    let sampler = Sampler::builtin(config.observer().unwrap());
    let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();

    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    let sum_of_semi_diameters = (row.sun_size + row.moon_size) / 2.0 / 60.0;
    assert!(row.separation < sum_of_semi_diameters);
    assert!(row.sun_altitude > 70.0);
}

#[test]
fn reversed_window_is_empty() {
    let config = ObservationConfig {
        window_start: NaiveTime::from_hms_opt(10, 20, 0).unwrap(),
        window_end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ..ObservationConfig::default()
    };
    let sampler = Sampler::builtin(config.observer().unwrap());
    let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn non_positive_step_is_rejected() {
    let config = ObservationConfig {
        step_seconds: 0,
        ..ObservationConfig::default()
    };
    assert!(matches!(config.time_window(), Err(Error::InvalidStep { seconds: 0 })));
}

#[test]
fn coarser_step_samples_fewer_rows() {
    let start = Utc.with_ymd_and_hms(2020, 6, 21, 4, 30, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 6, 21, 4, 50, 0).unwrap();
    let sampler = Sampler::builtin(ObservationConfig::default().observer().unwrap());

    let window = TimeWindow::new(start, end, 300).unwrap();
    let table = EphemerisTable::sample(&sampler, &window).unwrap();
    assert_eq!(table.len(), 5);

    let expected: Vec<_> = default_table().rows().iter().step_by(5).copied().collect();
    assert_eq!(table.rows(), expected.as_slice());
}

#[test]
fn moon_angular_size_reference() {
    let size = angular_size_arcmin(Body::Moon.radius_cm(), 3.84e10);
    assert_abs_diff_eq!(size, 31.1, epsilon = 0.01);
}
