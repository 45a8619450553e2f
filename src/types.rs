//! Core data types for ephemeris calculations.

use crate::error::{
    check_altitude, check_azimuth, check_coordinates, check_distance, check_pressure,
    check_temperature,
};
use crate::math::{cos_deg, normalize_degrees_0_to_360, sin_deg};
use crate::{Error, Result};

/// Earth flattening factor b/a (IAU 1976).
const EARTH_FLATTENING_FACTOR: f64 = 0.99664719;

/// Earth equatorial radius in kilometres (IAU 1976).
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.14;

/// A fixed observing site on the Earth's surface.
///
/// Geodetic latitude and longitude are in degrees (longitude positive east),
/// elevation in metres above sea level.
///
/// # Example
/// ```
/// # use eclipse_ephemeris::types::Observer;
/// let bengaluru = Observer::new(12.9352, 77.6245, 0.0).unwrap();
/// assert_eq!(bengaluru.latitude(), 12.9352);
/// assert!(Observer::new(95.0, 0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

impl Observer {
    /// Creates an observer at the given geodetic position.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        if !elevation.is_finite() {
            return Err(Error::computation_error("elevation is not finite"));
        }
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Geodetic latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, positive east of Greenwich.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in metres above sea level.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Geocentric terms ρ·sin φ′ and ρ·cos φ′ in units of the equatorial radius.
    #[must_use]
    pub fn geocentric_terms(&self) -> (f64, f64) {
        let phi = self.latitude.to_radians();
        let u = (EARTH_FLATTENING_FACTOR * phi.tan()).atan();
        let height = self.elevation / (EARTH_EQUATORIAL_RADIUS_KM * 1000.0);

        let rho_sin = EARTH_FLATTENING_FACTOR * u.sin() + height * phi.sin();
        let rho_cos = u.cos() + height * phi.cos();
        (rho_sin, rho_cos)
    }

    /// Geocentric equatorial Cartesian position of the site in kilometres,
    /// for a given local sidereal time in degrees.
    #[must_use]
    pub fn geocentric_position_km(&self, local_sidereal_time: f64) -> [f64; 3] {
        let (rho_sin, rho_cos) = self.geocentric_terms();
        [
            EARTH_EQUATORIAL_RADIUS_KM * rho_cos * cos_deg(local_sidereal_time),
            EARTH_EQUATORIAL_RADIUS_KM * rho_cos * sin_deg(local_sidereal_time),
            EARTH_EQUATORIAL_RADIUS_KM * rho_sin,
        ]
    }
}

/// Position in ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    /// Ecliptic longitude (degrees)
    pub longitude: f64,
    /// Ecliptic latitude (degrees)
    pub latitude: f64,
    /// Distance from the Earth's centre (km)
    pub distance_km: f64,
}

impl EclipticPosition {
    /// Rotates into equatorial coordinates using the given obliquity of the ecliptic.
    ///
    /// # Errors
    /// Returns error if the resulting coordinates are not finite or the distance is not positive.
    pub fn to_equatorial(&self, obliquity: f64) -> Result<EquatorialPosition> {
        let lambda = self.longitude.to_radians();
        let beta = self.latitude.to_radians();
        let epsilon = obliquity.to_radians();

        let alpha = (lambda.sin() * epsilon.cos() - beta.tan() * epsilon.sin()).atan2(lambda.cos());
        let delta = (beta.sin() * epsilon.cos() + beta.cos() * epsilon.sin() * lambda.sin()).asin();

        EquatorialPosition::new(alpha.to_degrees(), delta.to_degrees(), self.distance_km)
    }
}

/// Position in equatorial coordinates: right ascension, declination and distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Right ascension in degrees [0, 360)
    right_ascension: f64,
    /// Declination in degrees [-90, 90]
    declination: f64,
    /// Distance in kilometres
    distance_km: f64,
}

impl EquatorialPosition {
    /// Creates an equatorial position, normalizing right ascension to [0, 360).
    ///
    /// # Errors
    /// Returns `ComputationError` for non-finite angles, a declination beyond ±90°,
    /// or a non-positive distance.
    pub fn new(right_ascension: f64, declination: f64, distance_km: f64) -> Result<Self> {
        if !right_ascension.is_finite() {
            return Err(Error::computation_error("right ascension is not finite"));
        }
        let declination = check_altitude(declination)
            .map_err(|_| Error::computation_error("declination must be between -90° and 90°"))?;
        let distance_km = check_distance(distance_km)?;

        Ok(Self {
            right_ascension: normalize_degrees_0_to_360(right_ascension),
            declination,
            distance_km,
        })
    }

    /// Creates a position from a Cartesian equatorial vector in kilometres.
    ///
    /// # Errors
    /// Returns `ComputationError` for a zero or non-finite vector.
    pub fn from_cartesian(vector: [f64; 3]) -> Result<Self> {
        let [x, y, z] = vector;
        let distance = (x * x + y * y + z * z).sqrt();
        let distance = check_distance(distance)?;
        Self::new(
            y.atan2(x).to_degrees(),
            (z / distance).asin().to_degrees(),
            distance,
        )
    }

    /// Right ascension in degrees [0, 360).
    #[must_use]
    pub const fn right_ascension(&self) -> f64 {
        self.right_ascension
    }

    /// Declination in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.declination
    }

    /// Distance in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Distance in centimetres.
    #[must_use]
    pub fn distance_cm(&self) -> f64 {
        self.distance_km * 1.0e5
    }

    /// Cartesian equatorial vector in kilometres.
    #[must_use]
    pub fn to_cartesian(&self) -> [f64; 3] {
        let (sin_dec, cos_dec) = self.declination.to_radians().sin_cos();
        let (sin_ra, cos_ra) = self.right_ascension.to_radians().sin_cos();
        [
            self.distance_km * cos_dec * cos_ra,
            self.distance_km * cos_dec * sin_ra,
            self.distance_km * sin_dec,
        ]
    }
}

/// Atmospheric conditions for refraction correction of altitudes.
///
/// Refraction lifts bodies near the horizon by up to ~0.6°. When no correction
/// is supplied the geometric (airless) altitude is reported.
///
/// # Example
/// ```
/// # use eclipse_ephemeris::types::RefractionCorrection;
/// let standard = RefractionCorrection::standard();
/// assert_eq!(standard.pressure(), 1013.25);
/// assert_eq!(standard.temperature(), 15.0);
///
/// let custom = RefractionCorrection::new(910.0, 28.0).unwrap();
/// assert_eq!(custom.pressure(), 910.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefractionCorrection {
    /// Atmospheric pressure in millibars (hPa)
    pressure: f64,
    /// Temperature in degrees Celsius
    temperature: f64,
}

impl RefractionCorrection {
    /// Creates a new refraction correction with the specified atmospheric conditions.
    ///
    /// # Errors
    /// Returns `InvalidPressure` or `InvalidTemperature` for out-of-range values.
    pub fn new(pressure: f64, temperature: f64) -> Result<Self> {
        check_pressure(pressure)?;
        check_temperature(temperature)?;
        Ok(Self {
            pressure,
            temperature,
        })
    }

    /// Standard sea-level conditions: 1013.25 mbar and 15 °C.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            pressure: 1013.25,
            temperature: 15.0,
        }
    }

    /// Gets the atmospheric pressure in millibars.
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Gets the temperature in degrees Celsius.
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Refraction in degrees to add to a true altitude (Sæmundsson's formula).
    ///
    /// Below -1° the body is well under the horizon and no correction is applied.
    #[must_use]
    pub fn refraction_at(&self, altitude: f64) -> f64 {
        if altitude < -1.0 {
            return 0.0;
        }
        let arcmin = 1.02 / (altitude + 10.3 / (altitude + 5.11)).to_radians().tan();
        arcmin / 60.0 * (self.pressure / 1010.0) * (283.0 / (273.0 + self.temperature))
    }
}

/// Position in the local horizon frame.
///
/// - Azimuth: 0° = North, measured clockwise through East (0° to 360°)
/// - Altitude: 0° = horizon, 90° = zenith, negative below the horizon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Azimuth angle in degrees
    azimuth: f64,
    /// Altitude angle in degrees
    altitude: f64,
}

impl HorizontalPosition {
    /// Creates a horizontal position from azimuth and altitude.
    ///
    /// # Errors
    /// Returns error if either angle is non-finite or the altitude is beyond ±90°.
    ///
    /// # Example
    /// ```
    /// # use eclipse_ephemeris::types::HorizontalPosition;
    /// let position = HorizontalPosition::new(-270.0, 45.0).unwrap();
    /// assert_eq!(position.azimuth(), 90.0);
    /// assert_eq!(position.zenith_angle(), 45.0);
    /// ```
    pub fn new(azimuth: f64, altitude: f64) -> Result<Self> {
        Ok(Self {
            azimuth: check_azimuth(azimuth)?,
            altitude: check_altitude(altitude)?,
        })
    }

    /// Gets the azimuth angle in degrees.
    #[must_use]
    pub const fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Gets the altitude angle in degrees.
    #[must_use]
    pub const fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Gets the zenith angle in degrees (90° − altitude).
    #[must_use]
    pub fn zenith_angle(&self) -> f64 {
        90.0 - self.altitude
    }

    /// Checks if the body is above the horizon.
    #[must_use]
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}
