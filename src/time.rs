//! Time scales for ephemeris calculations.
//!
//! Julian dates, ΔT (TT − UT1) estimation after Espenak & Meeus, and the
//! conversion of local clock times with a fixed UTC offset into UTC instants.

#![allow(clippy::unreadable_literal)]

use crate::error::check_utc_offset;
use crate::math::polynomial;
use crate::{Error, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Seconds per day (86,400)
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 TT)
pub(crate) const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date of 1970-01-01 00:00 UTC
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of 0000-12-31 00:00, day zero of chrono's `num_days_from_ce`
const CE_EPOCH_MIDNIGHT_JD: f64 = 1_721_424.5;

/// Julian date representation for astronomical calculations.
///
/// Holds the Julian Date on the UT scale together with ΔT, so that both
/// UT-based quantities (sidereal time) and TT-based quantities (body
/// theories) can be derived from one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JulianDate {
    /// Julian Date (JD) - referenced to UT1
    jd: f64,
    /// Delta T in seconds - difference between TT and UT1
    delta_t: f64,
}

impl JulianDate {
    /// Creates a Julian date for any timezone-aware chrono `DateTime`.
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>, delta_t: f64) -> Self {
        let utc = datetime.with_timezone(&Utc);
        let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9;
        Self {
            jd: UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY,
            delta_t,
        }
    }

    /// Creates a Julian date for a UTC instant with ΔT estimated from its year and month.
    ///
    /// # Errors
    /// Returns error if no ΔT estimate exists for the date.
    pub fn from_datetime_estimated(datetime: &DateTime<Utc>) -> Result<Self> {
        let delta_t = DeltaT::estimate_from_date(datetime.year(), datetime.month())?;
        Ok(Self::from_datetime(datetime, delta_t))
    }

    /// Creates a Julian date from UTC calendar components on the proleptic Gregorian calendar.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` for a date that does not exist or a time of day
    /// outside 00:00:00 to 23:59:59.999.
    ///
    /// # Example
    /// ```
    /// # use eclipse_ephemeris::time::JulianDate;
    /// let jd = JulianDate::from_utc(2020, 6, 21, 4, 30, 0.0, 69.4).unwrap();
    /// assert!(jd.julian_date() > 2_459_000.0);
    /// ```
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        delta_t: f64,
    ) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(Error::invalid_datetime("no such calendar date"))?;
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(Error::invalid_datetime("time of day out of range"));
        }

        let seconds_of_day = f64::from(hour * 3600 + minute * 60) + second;
        let midnight = f64::from(date.num_days_from_ce()) + CE_EPOCH_MIDNIGHT_JD;
        Ok(Self {
            jd: midnight + seconds_of_day / SECONDS_PER_DAY,
            delta_t,
        })
    }

    /// Creates a Julian date from a raw UT Julian Date value.
    #[must_use]
    pub const fn from_julian_date(jd: f64, delta_t: f64) -> Self {
        Self { jd, delta_t }
    }

    /// Creates a Julian date from a Julian Ephemeris Day (TT scale).
    #[must_use]
    pub fn from_julian_ephemeris_day(jde: f64, delta_t: f64) -> Self {
        Self {
            jd: jde - delta_t / SECONDS_PER_DAY,
            delta_t,
        }
    }

    /// Julian Date on the UT scale.
    #[must_use]
    pub const fn julian_date(&self) -> f64 {
        self.jd
    }

    /// TT − UT in seconds.
    #[must_use]
    pub const fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Julian Ephemeris Day, JD + ΔT/86400.
    #[must_use]
    pub fn julian_ephemeris_day(&self) -> f64 {
        self.jd + self.delta_t / SECONDS_PER_DAY
    }

    /// Julian centuries of UT since J2000.0.
    #[must_use]
    pub fn julian_century(&self) -> f64 {
        (self.jd - J2000_JDN) / DAYS_PER_CENTURY
    }

    /// Julian centuries of TT since J2000.0, the argument of the body theories.
    #[must_use]
    pub fn julian_ephemeris_century(&self) -> f64 {
        (self.julian_ephemeris_day() - J2000_JDN) / DAYS_PER_CENTURY
    }
}

/// One polynomial piece of the ΔT fit: valid for `from <= year < until`,
/// evaluated in `year - origin`.
struct DeltaTSegment {
    from: f64,
    until: f64,
    origin: f64,
    coeffs: &'static [f64],
}

/// Last year covered by the ΔT fit, inclusive.
const LAST_ESTIMATED_YEAR: f64 = 3000.0;

/// Espenak & Meeus (2014 update) polynomial pieces from the telescopic era onwards.
const DELTA_T_SEGMENTS: &[DeltaTSegment] = &[
    DeltaTSegment {
        from: 1600.0,
        until: 1700.0,
        origin: 1600.0,
        coeffs: &[120.0, -0.9808, -0.01532, 1.0 / 7129.0],
    },
    DeltaTSegment {
        from: 1700.0,
        until: 1800.0,
        origin: 1700.0,
        coeffs: &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
    },
    DeltaTSegment {
        from: 1800.0,
        until: 1860.0,
        origin: 1800.0,
        coeffs: &[
            13.72,
            -0.332447,
            0.0068612,
            0.0041116,
            -0.00037436,
            0.0000121272,
            -0.0000001699,
            0.000000000875,
        ],
    },
    DeltaTSegment {
        from: 1860.0,
        until: 1900.0,
        origin: 1860.0,
        coeffs: &[
            7.62,
            0.5737,
            -0.251754,
            0.01680668,
            -0.0004473624,
            1.0 / 233_174.0,
        ],
    },
    DeltaTSegment {
        from: 1900.0,
        until: 1920.0,
        origin: 1900.0,
        coeffs: &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197],
    },
    DeltaTSegment {
        from: 1920.0,
        until: 1941.0,
        origin: 1920.0,
        coeffs: &[21.20, 0.84493, -0.076100, 0.0020936],
    },
    DeltaTSegment {
        from: 1941.0,
        until: 1961.0,
        origin: 1950.0,
        coeffs: &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0],
    },
    DeltaTSegment {
        from: 1961.0,
        until: 1986.0,
        origin: 1975.0,
        coeffs: &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0],
    },
    DeltaTSegment {
        from: 1986.0,
        until: 2005.0,
        origin: 2000.0,
        coeffs: &[
            63.86,
            0.3345,
            -0.060374,
            0.0017275,
            0.000651814,
            0.00002373599,
        ],
    },
    DeltaTSegment {
        from: 2005.0,
        until: 2015.0,
        origin: 2005.0,
        coeffs: &[64.69, 0.2930],
    },
    DeltaTSegment {
        from: 2015.0,
        until: LAST_ESTIMATED_YEAR,
        origin: 2015.0,
        coeffs: &[67.62, 0.3645, 0.0039755],
    },
];

/// ΔT (Delta T) estimation.
///
/// ΔT is the difference between Terrestrial Time, the scale of the body
/// theories, and Universal Time, the scale of civil clocks.
pub struct DeltaT;

impl DeltaT {
    /// Estimates ΔT in seconds for a given decimal year.
    ///
    /// See: <https://www.eclipsewise.com/help/deltatpoly2014.html>
    ///
    /// # Errors
    /// Returns error for years outside 1600 to 3000 CE or non-finite input.
    ///
    /// # Example
    /// ```
    /// # use eclipse_ephemeris::time::DeltaT;
    /// let delta_t = DeltaT::estimate(2020.5).unwrap();
    /// assert!(delta_t > 65.0 && delta_t < 75.0);
    /// ```
    pub fn estimate(decimal_year: f64) -> Result<f64> {
        if !decimal_year.is_finite() {
            return Err(Error::invalid_datetime("year must be finite"));
        }

        DELTA_T_SEGMENTS
            .iter()
            .find(|segment| {
                (segment.from..segment.until).contains(&decimal_year)
                    || (segment.until == LAST_ESTIMATED_YEAR && decimal_year == LAST_ESTIMATED_YEAR)
            })
            .map(|segment| polynomial(segment.coeffs, decimal_year - segment.origin))
            .ok_or(Error::invalid_datetime(
                "ΔT estimates only available for years 1600 to 3000",
            ))
    }

    /// Estimates ΔT from year and month, at the middle of the month.
    ///
    /// # Errors
    /// Returns error if month is outside the range 1-12 or the year is unsupported.
    pub fn estimate_from_date(year: i32, month: u32) -> Result<f64> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }

        let decimal_year = f64::from(year) + (f64::from(month) - 0.5) / 12.0;
        Self::estimate(decimal_year)
    }
}

/// Builds a chrono fixed offset from a UTC offset in (possibly fractional) hours.
///
/// # Errors
/// Returns `InvalidUtcOffset` for offsets of 24 hours or more.
///
/// # Example
/// ```
/// # use eclipse_ephemeris::time::fixed_offset;
/// let ist = fixed_offset(5.5).unwrap();
/// assert_eq!(ist.local_minus_utc(), 19_800);
/// ```
pub fn fixed_offset(utc_offset_hours: f64) -> Result<FixedOffset> {
    check_utc_offset(utc_offset_hours)?;
    let seconds = (utc_offset_hours * 3600.0).round() as i32;
    FixedOffset::east_opt(seconds).ok_or(Error::invalid_utc_offset(utc_offset_hours))
}

/// Converts a local clock reading on a given date into a UTC instant.
///
/// # Errors
/// Returns `InvalidUtcOffset` if the offset is out of range.
pub fn local_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    utc_offset_hours: f64,
) -> Result<DateTime<Utc>> {
    let offset = fixed_offset(utc_offset_hours)?;
    let local = NaiveDateTime::new(date, time);
    offset
        .from_local_datetime(&local)
        .single()
        .map(|datetime| datetime.with_timezone(&Utc))
        .ok_or(Error::invalid_datetime("local time is not representable"))
}

/// Converts a UTC instant back to local clock time with a fixed offset.
///
/// # Errors
/// Returns `InvalidUtcOffset` if the offset is out of range.
pub fn utc_to_local(instant: &DateTime<Utc>, utc_offset_hours: f64) -> Result<NaiveDateTime> {
    let offset = fixed_offset(utc_offset_hours)?;
    Ok(instant.with_timezone(&offset).naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_j2000_epoch() {
        let epoch = JulianDate::from_utc(2000, 1, 1, 12, 0, 0.0, 64.0).unwrap();

        assert!((epoch.julian_date() - J2000_JDN).abs() < EPSILON);
        assert!(epoch.julian_century().abs() < EPSILON);
        // TT runs 64 s ahead of UT here
        let tt_lead = epoch.julian_ephemeris_century() * DAYS_PER_CENTURY * SECONDS_PER_DAY;
        assert!((tt_lead - 64.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_impossible_components() {
        let bad = [
            (2020, 0, 21, 4, 30, 0.0),
            (2020, 6, 31, 4, 30, 0.0),
            (2021, 2, 29, 4, 30, 0.0),
            (2100, 2, 29, 0, 0, 0.0),
            (2020, 6, 21, 24, 0, 0.0),
            (2020, 6, 21, 4, 60, 0.0),
            (2020, 6, 21, 4, 30, 60.0),
            (2020, 6, 21, 4, 30, -0.5),
        ];
        for (year, month, day, hour, minute, second) in bad {
            let result = JulianDate::from_utc(year, month, day, hour, minute, second, 0.0);
            assert!(
                matches!(result, Err(Error::InvalidDateTime { .. })),
                "{year}-{month}-{day} {hour}:{minute}:{second}"
            );
        }
        assert!(JulianDate::from_utc(2000, 2, 29, 23, 59, 59.999, 0.0).is_ok());
    }

    #[test]
    fn test_reference_julian_dates() {
        // Meeus example 7.a: 1957 October 4.81
        let sputnik = JulianDate::from_utc(1957, 10, 4, 19, 26, 24.0, 0.0).unwrap();
        assert!((sputnik.julian_date() - 2_436_116.31).abs() < 1e-6);

        let eclipse_day = JulianDate::from_utc(2020, 6, 21, 0, 0, 0.0, 0.0).unwrap();
        assert!((eclipse_day.julian_date() - 2_459_021.5).abs() < 1e-6);

        let annular_maximum = JulianDate::from_utc(2020, 6, 21, 6, 40, 0.0, 0.0).unwrap();
        assert!((annular_maximum.julian_date() - 2_459_021.777_777_8).abs() < 1e-6);
    }

    #[test]
    fn test_julian_ephemeris_day_round_trip() {
        let jd = JulianDate::from_julian_ephemeris_day(2_448_724.5, 59.0);
        assert!((jd.julian_ephemeris_day() - 2_448_724.5).abs() < 1e-9);
        assert!((jd.julian_date() - (2_448_724.5 - 59.0 / SECONDS_PER_DAY)).abs() < 1e-9);
    }

    #[test]
    fn test_delta_t_around_the_eclipse() {
        let at_epoch = DeltaT::estimate(2000.0).unwrap();
        let june_2020 = DeltaT::estimate_from_date(2020, 6).unwrap();

        assert!((at_epoch - 63.86).abs() < 1e-9);
        // Observed value was 69.4 s; the extrapolation lands within a few seconds
        assert!((june_2020 - 69.4).abs() < 5.0, "{june_2020}");
    }

    #[test]
    fn test_delta_t_boundaries() {
        assert!(DeltaT::estimate(1600.0).is_ok());
        assert!(DeltaT::estimate(2999.99).is_ok());
        assert!(DeltaT::estimate(3000.0).is_ok());
        assert!(DeltaT::estimate(1599.9).is_err());
        assert!(DeltaT::estimate(3001.0).is_err());
        assert!(DeltaT::estimate(f64::NAN).is_err());
        assert!(DeltaT::estimate_from_date(2020, 13).is_err());
    }

    #[test]
    fn test_delta_t_segments_are_continuous() {
        for pair in DELTA_T_SEGMENTS.windows(2) {
            assert_eq!(pair[0].until, pair[1].from);
            let before = DeltaT::estimate(pair[1].from - 1e-6).unwrap();
            let after = DeltaT::estimate(pair[1].from).unwrap();
            assert!(
                (before - after).abs() < 1.0,
                "ΔT jumps by {} s at {}",
                after - before,
                pair[1].from
            );
        }
    }

    #[test]
    fn test_datetime_and_components_agree() {
        let instant = NaiveDate::from_ymd_opt(2020, 6, 21)
            .unwrap()
            .and_hms_milli_opt(4, 30, 15, 250)
            .unwrap()
            .and_utc();
        let from_instant = JulianDate::from_datetime(&instant, 69.4);
        let from_parts = JulianDate::from_utc(2020, 6, 21, 4, 30, 15.25, 69.4).unwrap();
        assert!((from_instant.julian_date() - from_parts.julian_date()).abs() < 1e-8);

        let ist = FixedOffset::east_opt(19_800).unwrap();
        let local = instant.with_timezone(&ist);
        assert_eq!(JulianDate::from_datetime(&local, 69.4), from_instant);
    }

    #[test]
    fn test_fixed_offset() {
        assert_eq!(fixed_offset(5.5).unwrap().local_minus_utc(), 19_800);
        assert_eq!(fixed_offset(-3.75).unwrap().local_minus_utc(), -13_500);
        assert!(fixed_offset(25.0).is_err());
    }

    #[test]
    fn test_local_to_utc_and_back() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let utc = local_to_utc(date, time, 5.5).unwrap();

        assert_eq!(utc.to_rfc3339(), "2020-06-21T04:30:00+00:00");
        assert_eq!(utc_to_local(&utc, 5.5).unwrap(), NaiveDateTime::new(date, time));
    }

    #[test]
    fn test_local_to_utc_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
        let time = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        let utc = local_to_utc(date, time, 5.5).unwrap();
        assert_eq!(utc.to_rfc3339(), "2020-06-20T20:30:00+00:00");
    }
}
