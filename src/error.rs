//! Error types for the eclipse ephemeris library.

use crate::math::normalize_degrees_0_to_360;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while computing, tabulating or rendering body positions.
#[derive(Debug)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid pressure value for atmospheric refraction calculations.
    InvalidPressure {
        /// The invalid pressure value provided.
        value: f64,
    },
    /// Invalid temperature value for atmospheric refraction calculations.
    InvalidTemperature {
        /// The invalid temperature value provided.
        value: f64,
    },
    /// Invalid date/time for the algorithm's valid range.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// UTC offset outside the range a fixed offset can represent.
    InvalidUtcOffset {
        /// The offset in hours.
        hours: f64,
    },
    /// Sampling step that would never advance.
    InvalidStep {
        /// The step in seconds.
        seconds: i64,
    },
    /// Numerical computation error (e.g., non-finite intermediate value).
    ComputationError {
        /// Description of the computation error.
        message: &'static str,
    },
    /// A required column is absent from an input table.
    MissingColumn {
        /// Name of the missing column.
        name: String,
    },
    /// A clock time in an input table could not be parsed.
    InvalidTimestamp {
        /// The offending text.
        value: String,
    },
    /// The renderer was handed no samples.
    EmptySeries,
    /// The renderer was handed series of different lengths.
    SeriesLengthMismatch {
        /// Number of time samples.
        times: usize,
        /// Number of altitude samples that disagreed.
        values: usize,
    },
    /// Underlying I/O failure.
    Io(std::io::Error),
    /// Malformed delimited text.
    Csv(csv::Error),
    /// Image encoding or decoding failure.
    Image(image::ImageError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidPressure { value } => {
                write!(f, "invalid pressure {value} mbar (must be positive)")
            }
            Self::InvalidTemperature { value } => {
                write!(
                    f,
                    "invalid temperature {value}°C (must be above absolute zero)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::InvalidUtcOffset { hours } => {
                write!(f, "invalid UTC offset {hours} h (must be within ±24 h)")
            }
            Self::InvalidStep { seconds } => {
                write!(f, "invalid sampling step {seconds} s (must be positive)")
            }
            Self::ComputationError { message } => {
                write!(f, "computation error: {message}")
            }
            Self::MissingColumn { name } => write!(f, "missing column `{name}`"),
            Self::InvalidTimestamp { value } => {
                write!(f, "invalid clock time `{value}` (expected HH:MM:SS)")
            }
            Self::EmptySeries => write!(f, "nothing to render: series is empty"),
            Self::SeriesLengthMismatch { times, values } => {
                write!(
                    f,
                    "series length mismatch: {times} time samples, {values} values"
                )
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Csv(err) => write!(f, "CSV error: {err}"),
            Self::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid pressure error.
    #[must_use]
    pub const fn invalid_pressure(value: f64) -> Self {
        Self::InvalidPressure { value }
    }

    /// Creates an invalid temperature error.
    #[must_use]
    pub const fn invalid_temperature(value: f64) -> Self {
        Self::InvalidTemperature { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an invalid UTC offset error.
    #[must_use]
    pub const fn invalid_utc_offset(hours: f64) -> Self {
        Self::InvalidUtcOffset { hours }
    }

    /// Creates an invalid step error.
    #[must_use]
    pub const fn invalid_step(seconds: i64) -> Self {
        Self::InvalidStep { seconds }
    }

    /// Creates a computation error.
    #[must_use]
    pub const fn computation_error(message: &'static str) -> Self {
        Self::ComputationError { message }
    }

    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(name: &str) -> Self {
        Self::MissingColumn {
            name: name.to_owned(),
        }
    }

    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(value: &str) -> Self {
        Self::InvalidTimestamp {
            value: value.to_owned(),
        }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates pressure is positive and reasonable for atmospheric calculations.
///
/// # Errors
/// Returns `InvalidPressure` if pressure is not between 1 and 2000 hPa.
pub fn check_pressure(pressure: f64) -> Result<()> {
    if !pressure.is_finite() || pressure <= 0.0 || pressure > 2000.0 {
        return Err(Error::invalid_pressure(pressure));
    }
    Ok(())
}

/// Validates temperature is above absolute zero and reasonable for atmospheric calculations.
///
/// # Errors
/// Returns `InvalidTemperature` if temperature is outside -273.15 to 100°C.
pub fn check_temperature(temperature: f64) -> Result<()> {
    if !(-273.15..=100.0).contains(&temperature) {
        return Err(Error::invalid_temperature(temperature));
    }
    Ok(())
}

/// Validates a UTC offset in hours.
///
/// # Errors
/// Returns `InvalidUtcOffset` unless the offset is finite and strictly within ±24 hours.
pub fn check_utc_offset(hours: f64) -> Result<()> {
    if !hours.is_finite() || hours.abs() >= 24.0 {
        return Err(Error::invalid_utc_offset(hours));
    }
    Ok(())
}

/// Validates a sampling step in seconds.
///
/// # Errors
/// Returns `InvalidStep` if the step is zero or negative.
pub fn check_step(seconds: i64) -> Result<()> {
    if seconds <= 0 {
        return Err(Error::invalid_step(seconds));
    }
    Ok(())
}

/// Validates and normalizes an azimuth angle to the range [0, 360) degrees.
///
/// # Errors
/// Returns `ComputationError` if azimuth is not finite.
pub fn check_azimuth(azimuth: f64) -> Result<f64> {
    if !azimuth.is_finite() {
        return Err(Error::computation_error("azimuth is not finite"));
    }
    Ok(normalize_degrees_0_to_360(azimuth))
}

/// Validates an altitude angle to be within the range [-90, 90] degrees.
///
/// # Errors
/// Returns `ComputationError` if altitude is not finite or outside valid range.
pub fn check_altitude(altitude: f64) -> Result<f64> {
    if !altitude.is_finite() {
        return Err(Error::computation_error("altitude is not finite"));
    }
    if !(-90.0..=90.0).contains(&altitude) {
        return Err(Error::computation_error(
            "altitude must be between -90° and 90°",
        ));
    }
    Ok(altitude)
}

/// Validates a body distance is finite and positive.
///
/// # Errors
/// Returns `ComputationError` for zero, negative or non-finite distances.
pub fn check_distance(distance_km: f64) -> Result<f64> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(Error::computation_error("distance must be finite and positive"));
    }
    Ok(distance_km)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observer_coordinates() {
        for (latitude, longitude) in [(12.9352, 77.6245), (-90.0, 180.0), (90.0, -180.0)] {
            assert!(check_coordinates(latitude, longitude).is_ok());
        }
        for (latitude, longitude) in [(90.01, 0.0), (f64::NAN, 0.0), (f64::INFINITY, 0.0)] {
            assert!(matches!(
                check_coordinates(latitude, longitude),
                Err(Error::InvalidLatitude { .. })
            ));
        }
        for longitude in [180.5, -181.0, f64::NAN] {
            assert!(matches!(
                check_coordinates(0.0, longitude),
                Err(Error::InvalidLongitude { .. })
            ));
        }
    }

    #[test]
    fn test_refraction_conditions() {
        // Bengaluru sits near 910 mbar
        assert!(check_pressure(910.0).is_ok());
        assert!(check_temperature(28.0).is_ok());

        for pressure in [0.0, -1.0, 2500.0, f64::NAN] {
            assert!(check_pressure(pressure).is_err(), "{pressure}");
        }
        for temperature in [-274.0, 120.0, f64::NAN] {
            assert!(check_temperature(temperature).is_err(), "{temperature}");
        }
    }

    #[test]
    fn test_utc_offset_and_step_validation() {
        assert!(check_utc_offset(5.5).is_ok());
        assert!(check_utc_offset(-9.5).is_ok());
        assert!(check_utc_offset(24.0).is_err());
        assert!(check_utc_offset(f64::NAN).is_err());

        assert!(check_step(60).is_ok());
        assert!(check_step(0).is_err());
        assert!(check_step(-60).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_utc_offset(30.0);
        assert_eq!(err.to_string(), "invalid UTC offset 30 h (must be within ±24 h)");

        let err = Error::missing_column("Time");
        assert_eq!(err.to_string(), "missing column `Time`");

        let err = Error::invalid_step(0);
        assert_eq!(
            err.to_string(),
            "invalid sampling step 0 s (must be positive)"
        );

        let err = Error::SeriesLengthMismatch { times: 21, values: 20 };
        assert_eq!(
            err.to_string(),
            "series length mismatch: 21 time samples, 20 values"
        );
    }

    #[test]
    fn test_error_source() {
        use std::error::Error as _;

        let io = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
        assert!(Error::EmptySeries.source().is_none());
    }

    #[test]
    fn test_check_azimuth_wraps() {
        assert_eq!(check_azimuth(-45.0).unwrap(), 315.0);
        assert_eq!(check_azimuth(720.0).unwrap(), 0.0);
        assert!(check_azimuth(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_check_altitude_and_distance() {
        assert!(check_altitude(0.0).is_ok());
        assert!(check_altitude(-90.0).is_ok());
        assert!(check_altitude(90.5).is_err());
        assert!(check_altitude(f64::NAN).is_err());

        assert!(check_distance(384_400.0).is_ok());
        assert!(check_distance(0.0).is_err());
        assert!(check_distance(f64::INFINITY).is_err());
    }
}
