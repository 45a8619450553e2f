//! Analytical solar ephemeris.
//!
//! Follows the low-accuracy solar theory of Meeus, "Astronomical Algorithms"
//! (2nd ed.), chapter 25: geometric mean longitude and mean anomaly of the
//! Sun, equation of the centre and radius vector, with the apparent longitude
//! corrected for nutation and annual aberration.
//!
//! Accuracy is about 0.01° in position, which is far smaller than the solar
//! semi-diameter and ample for eclipse geometry.

#![allow(clippy::unreadable_literal)]

use crate::Result;
use crate::math::{normalize_degrees_0_to_360, polynomial, sin_deg};
use crate::nutation::Nutation;
use crate::time::JulianDate;
use crate::types::{EclipticPosition, EquatorialPosition};

/// Astronomical unit in kilometres (IAU 2012).
pub const AU_KM: f64 = 149_597_870.7;

/// Constant of aberration in arcseconds.
const ABERRATION_CONSTANT: f64 = -20.4898;

/// Geometric (true) ecliptic longitude and radius vector of the Sun, referred
/// to the mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricSun {
    /// True geometric longitude (degrees)
    pub longitude: f64,
    /// Radius vector (AU)
    pub radius_vector: f64,
}

/// Computes the geometric position of the Sun for a date (TT argument).
#[must_use]
pub fn geometric_position(jd: &JulianDate) -> GeometricSun {
    let t = jd.julian_ephemeris_century();

    let mean_longitude = normalize_degrees_0_to_360(polynomial(&[280.46646, 36000.76983, 0.0003032], t));
    let mean_anomaly = polynomial(&[357.52911, 35999.05029, -0.0001537], t);
    let eccentricity = polynomial(&[0.016708634, -0.000042037, -0.0000001267], t);

    let equation_of_centre = polynomial(&[1.914602, -0.004817, -0.000014], t) * sin_deg(mean_anomaly)
        + polynomial(&[0.019993, -0.000101], t) * sin_deg(2.0 * mean_anomaly)
        + 0.000289 * sin_deg(3.0 * mean_anomaly);

    let true_anomaly = mean_anomaly + equation_of_centre;
    let radius_vector = 1.000001018 * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly.to_radians().cos());

    GeometricSun {
        longitude: normalize_degrees_0_to_360(mean_longitude + equation_of_centre),
        radius_vector,
    }
}

/// Apparent geocentric ecliptic position of the Sun.
///
/// The geometric longitude is corrected for nutation in longitude and for
/// annual aberration; the solar latitude never exceeds 1.2″ and is taken as zero.
#[must_use]
pub fn apparent_ecliptic_position(jd: &JulianDate, nutation: &Nutation) -> EclipticPosition {
    let sun = geometric_position(jd);
    let aberration = ABERRATION_CONSTANT / (3600.0 * sun.radius_vector);

    EclipticPosition {
        longitude: normalize_degrees_0_to_360(sun.longitude + nutation.delta_psi() + aberration),
        latitude: 0.0,
        distance_km: sun.radius_vector * AU_KM,
    }
}

/// Apparent geocentric equatorial position of the Sun, referred to the true equinox of date.
///
/// # Errors
/// Returns error if the computed position is not finite.
///
/// # Example
/// ```
/// use eclipse_ephemeris::{sun, time::JulianDate};
///
/// let jd = JulianDate::from_utc(2020, 6, 21, 6, 40, 0.0, 69.4).unwrap();
/// let position = sun::apparent_position(&jd).unwrap();
///
/// // Near the June solstice the Sun sits close to its northernmost declination
/// assert!((position.declination() - 23.44).abs() < 0.05);
/// ```
pub fn apparent_position(jd: &JulianDate) -> Result<EquatorialPosition> {
    let nutation = Nutation::at(jd);
    apparent_ecliptic_position(jd, &nutation).to_equatorial(nutation.true_obliquity())
}
