//! Observation settings.
//!
//! [`ObservationConfig::default`] reproduces the annular eclipse of 2020 June 21
//! as seen from Bengaluru; every field can be overridden from the command line.

use crate::error::check_step;
use crate::render::RenderOptions;
use crate::time::local_to_utc;
use crate::types::{Observer, RefractionCorrection};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use std::path::PathBuf;

const ECLIPSE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 6, 21) {
    Some(date) => date,
    None => panic!("invalid eclipse date"),
};

const WINDOW_START: NaiveTime = match NaiveTime::from_hms_opt(10, 0, 0) {
    Some(time) => time,
    None => panic!("invalid window start"),
};

const WINDOW_END: NaiveTime = match NaiveTime::from_hms_opt(10, 20, 0) {
    Some(time) => time,
    None => panic!("invalid window end"),
};

/// Settings for one observing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationConfig {
    /// Local calendar date of the observation
    pub date: NaiveDate,
    /// Geodetic latitude (degrees)
    pub latitude: f64,
    /// Longitude, positive east (degrees)
    pub longitude: f64,
    /// Elevation above sea level (metres)
    pub elevation: f64,
    /// Offset of local clock time from UTC (hours)
    pub utc_offset_hours: f64,
    /// First sampled local clock time
    pub window_start: NaiveTime,
    /// Last sampled local clock time (inclusive)
    pub window_end: NaiveTime,
    /// Sampling step (seconds)
    pub step_seconds: i64,
    /// Atmospheric refraction applied to altitudes, if any
    pub refraction: Option<RefractionCorrection>,
    /// Photo timestamp table
    pub input_path: PathBuf,
    /// Animated GIF destination
    pub output_path: PathBuf,
    /// Optional CSV destination for the sampled table
    pub table_path: Option<PathBuf>,
    /// Animation settings
    pub render: RenderOptions,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            date: ECLIPSE_DATE,
            latitude: 12.9352,
            longitude: 77.6245,
            elevation: 0.0,
            utc_offset_hours: 5.5,
            window_start: WINDOW_START,
            window_end: WINDOW_END,
            step_seconds: 60,
            refraction: None,
            input_path: PathBuf::from("AnnularSolarEclipse_June21.csv"),
            output_path: PathBuf::from("AnnularSolarEclipseJune21_Bengaluru.gif"),
            table_path: None,
            render: RenderOptions::default(),
        }
    }
}

impl ObservationConfig {
    /// The observing site.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn observer(&self) -> Result<Observer> {
        Observer::new(self.latitude, self.longitude, self.elevation)
    }

    /// The sampling window converted to UTC.
    ///
    /// # Errors
    /// Returns `InvalidUtcOffset` or `InvalidStep` for unusable settings.
    ///
    /// # Example
    /// ```
    /// # use eclipse_ephemeris::config::ObservationConfig;
    /// let window = ObservationConfig::default().time_window().unwrap();
    /// assert_eq!(window.start().to_rfc3339(), "2020-06-21T04:30:00+00:00");
    /// assert_eq!(window.len(), 21);
    /// ```
    pub fn time_window(&self) -> Result<TimeWindow> {
        let start = local_to_utc(self.date, self.window_start, self.utc_offset_hours)?;
        let end = local_to_utc(self.date, self.window_end, self.utc_offset_hours)?;
        TimeWindow::new(start, end, self.step_seconds)
    }
}

/// Evenly spaced UTC instants from `start` to `end` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: TimeDelta,
}

impl TimeWindow {
    /// Creates a window. A start after the end is allowed and yields no instants.
    ///
    /// # Errors
    /// Returns `InvalidStep` if `step_seconds` is zero or negative.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step_seconds: i64) -> Result<Self> {
        check_step(step_seconds)?;
        let step = TimeDelta::try_seconds(step_seconds).ok_or(Error::invalid_step(step_seconds))?;
        Ok(Self { start, end, step })
    }

    /// First instant.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last instant requested (sampled only if it falls on a step).
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Spacing between instants.
    #[must_use]
    pub const fn step(&self) -> TimeDelta {
        self.step
    }

    /// Number of instants: ⌊(end − start)/step⌋ + 1, or zero when start > end.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        let span = (self.end - self.start).num_milliseconds();
        let step = self.step.num_milliseconds();
        usize::try_from(span / step).map_or(0, |steps| steps + 1)
    }

    /// Whether the window contains no instants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Iterates the instants in increasing order.
    pub fn instants(&self) -> impl Iterator<Item = DateTime<Utc>> + use<> {
        let Self { start, end, step } = *self;
        let mut next = Some(start);
        core::iter::from_fn(move || {
            let current = next.filter(|instant| *instant <= end)?;
            next = current.checked_add_signed(step);
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 21, hour, minute, second).unwrap()
    }

    #[test]
    fn test_default_reproduces_bengaluru_run() {
        let config = ObservationConfig::default();
        assert_eq!(config.date, NaiveDate::from_ymd_opt(2020, 6, 21).unwrap());
        assert_eq!(config.utc_offset_hours, 5.5);
        assert_eq!(config.step_seconds, 60);
        assert!(config.refraction.is_none());
        assert_eq!(config.render.frame_delay_ms, 24);

        let observer = config.observer().unwrap();
        assert_eq!(observer.latitude(), 12.9352);
        assert_eq!(observer.longitude(), 77.6245);

        let window = config.time_window().unwrap();
        assert_eq!(window.start(), utc(4, 30, 0));
        assert_eq!(window.end(), utc(4, 50, 0));
    }

    #[test]
    fn test_window_instants() {
        let window = TimeWindow::new(utc(4, 30, 0), utc(4, 50, 0), 60).unwrap();
        let instants: Vec<_> = window.instants().collect();

        assert_eq!(instants.len(), 21);
        assert_eq!(window.len(), 21);
        assert_eq!(instants[0], utc(4, 30, 0));
        assert_eq!(instants[20], utc(4, 50, 0));
        assert!(instants.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_window_end_off_step() {
        let window = TimeWindow::new(utc(4, 30, 0), utc(4, 31, 30), 60).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window.instants().last(), Some(utc(4, 31, 0)));
    }

    #[test]
    fn test_window_single_instant_and_reversed() {
        let single = TimeWindow::new(utc(4, 30, 0), utc(4, 30, 0), 60).unwrap();
        assert_eq!(single.instants().count(), 1);

        let reversed = TimeWindow::new(utc(4, 50, 0), utc(4, 30, 0), 60).unwrap();
        assert!(reversed.is_empty());
        assert_eq!(reversed.len(), 0);
        assert_eq!(reversed.instants().count(), 0);
    }

    #[test]
    fn test_window_rejects_non_positive_step() {
        assert!(TimeWindow::new(utc(4, 30, 0), utc(4, 50, 0), 0).is_err());
        assert!(TimeWindow::new(utc(4, 30, 0), utc(4, 50, 0), -60).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        let config = ObservationConfig {
            latitude: 100.0,
            ..ObservationConfig::default()
        };
        assert!(config.observer().is_err());

        let config = ObservationConfig {
            utc_offset_hours: 30.0,
            ..ObservationConfig::default()
        };
        assert!(config.time_window().is_err());
    }
}
