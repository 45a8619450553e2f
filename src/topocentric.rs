//! Reduction of geocentric positions to what an observer on the surface sees.
//!
//! Parallax is applied by subtracting the observer's geocentric vector from the
//! body's, which is exact for any distance and brings out the ≈1° lunar parallax
//! that decides whether an eclipse is seen from a given site.

use crate::Result;
use crate::ephemeris::{Body, Ephemeris};
use crate::error::check_distance;
use crate::math::{cos_deg, normalize_degrees_0_to_360, sin_deg};
use crate::nutation::{Nutation, apparent_sidereal_time_at_greenwich};
use crate::time::JulianDate;
use crate::types::{EquatorialPosition, HorizontalPosition, Observer, RefractionCorrection};

/// Arcminutes per radian (10800/π).
const ARCMIN_PER_RADIAN: f64 = 10_800.0 / core::f64::consts::PI;

/// Local apparent sidereal time at the observer in degrees [0, 360).
#[must_use]
pub fn local_sidereal_time(jd: &JulianDate, observer: &Observer) -> f64 {
    let nutation = Nutation::at(jd);
    normalize_degrees_0_to_360(apparent_sidereal_time_at_greenwich(jd, &nutation) + observer.longitude())
}

/// Shifts a geocentric position to the observer's location.
///
/// # Errors
/// Returns `ComputationError` if the observer sits at the body's position.
pub fn topocentric_position(
    geocentric: &EquatorialPosition,
    observer: &Observer,
    local_sidereal_time: f64,
) -> Result<EquatorialPosition> {
    let body = geocentric.to_cartesian();
    let site = observer.geocentric_position_km(local_sidereal_time);
    EquatorialPosition::from_cartesian([body[0] - site[0], body[1] - site[1], body[2] - site[2]])
}

/// Transforms an equatorial position into the observer's horizon frame.
///
/// Azimuth is measured from north through east. With `refraction` set, the
/// altitude is lifted by the atmospheric refraction for those conditions;
/// otherwise the airless altitude is returned.
///
/// # Errors
/// Returns error if the resulting angles are not finite.
pub fn horizontal_position(
    position: &EquatorialPosition,
    observer: &Observer,
    local_sidereal_time: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<HorizontalPosition> {
    let hour_angle = (local_sidereal_time - position.right_ascension()).to_radians();
    let phi = observer.latitude().to_radians();
    let delta = position.declination().to_radians();

    let altitude = (phi.sin() * delta.sin() + phi.cos() * delta.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    // atan2 yields azimuth from the south; rotate to north-based
    let azimuth = hour_angle
        .sin()
        .atan2(hour_angle.cos() * phi.sin() - delta.tan() * phi.cos())
        .to_degrees()
        + 180.0;

    let altitude = match refraction {
        Some(correction) => (altitude + correction.refraction_at(altitude)).min(90.0),
        None => altitude,
    };

    HorizontalPosition::new(azimuth, altitude)
}

/// Position angle of `target` relative to `reference`, east of north, in degrees [0, 360).
///
/// # Example
/// ```
/// # use eclipse_ephemeris::topocentric::position_angle;
/// # use eclipse_ephemeris::types::EquatorialPosition;
/// let sun = EquatorialPosition::new(90.0, 23.0, 1.5e8).unwrap();
/// let moon_north = EquatorialPosition::new(90.0, 23.5, 3.8e5).unwrap();
/// assert!(position_angle(&sun, &moon_north).abs() < 1e-9);
/// ```
#[must_use]
pub fn position_angle(reference: &EquatorialPosition, target: &EquatorialPosition) -> f64 {
    let delta_alpha = (target.right_ascension() - reference.right_ascension()).to_radians();
    let delta_ref = reference.declination().to_radians();
    let delta_target = target.declination().to_radians();

    let angle = delta_alpha
        .sin()
        .atan2(delta_ref.cos() * delta_target.tan() - delta_ref.sin() * delta_alpha.cos())
        .to_degrees();
    normalize_degrees_0_to_360(angle)
}

/// Great-circle separation between two positions in degrees (Vincenty form).
#[must_use]
pub fn angular_separation(a: &EquatorialPosition, b: &EquatorialPosition) -> f64 {
    let delta_alpha = b.right_ascension() - a.right_ascension();
    let (sin_a, cos_a) = (sin_deg(a.declination()), cos_deg(a.declination()));
    let (sin_b, cos_b) = (sin_deg(b.declination()), cos_deg(b.declination()));

    let x = cos_b * sin_deg(delta_alpha);
    let y = cos_a * sin_b - sin_a * cos_b * cos_deg(delta_alpha);
    let z = sin_a * sin_b + cos_a * cos_b * cos_deg(delta_alpha);

    x.hypot(y).atan2(z).to_degrees()
}

/// Apparent diameter in arcminutes of a sphere of `radius_cm` seen from `distance_cm`.
///
/// Uses the small-angle approximation 2R/d.
///
/// # Example
/// ```
/// # use eclipse_ephemeris::topocentric::angular_size_arcmin;
/// let moon = angular_size_arcmin(1.737e8, 3.84e10);
/// assert!((moon - 31.10).abs() < 0.01);
/// ```
#[must_use]
pub fn angular_size_arcmin(radius_cm: f64, distance_cm: f64) -> f64 {
    2.0 * radius_cm * ARCMIN_PER_RADIAN / distance_cm
}

/// Everything the observer sees of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyObservation {
    /// Topocentric apparent equatorial position
    pub equatorial: EquatorialPosition,
    /// Position in the local horizon frame
    pub horizontal: HorizontalPosition,
    /// Apparent diameter (arcmin)
    pub angular_size: f64,
}

/// Observes `body` from `observer` at `jd`, given the local sidereal time for that instant.
///
/// # Errors
/// Propagates ephemeris failures and non-finite intermediate results.
pub fn observe<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    body: Body,
    observer: &Observer,
    jd: &JulianDate,
    local_sidereal_time: f64,
    refraction: Option<RefractionCorrection>,
) -> Result<BodyObservation> {
    let geocentric = ephemeris.apparent_geocentric(body, jd)?;
    let equatorial = topocentric_position(&geocentric, observer, local_sidereal_time)?;
    let horizontal = horizontal_position(&equatorial, observer, local_sidereal_time, refraction)?;
    let distance_cm = check_distance(equatorial.distance_cm())?;

    Ok(BodyObservation {
        equatorial,
        horizontal,
        angular_size: angular_size_arcmin(body.radius_cm(), distance_cm),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::BuiltinEphemeris;

    #[test]
    fn test_horizontal_position_reference() {
        // Meeus example 13.b: Venus from Washington, 1987 April 10, 19:21 UT
        let washington = Observer::new(38.921_389, -77.065_556, 0.0).unwrap();
        let venus = EquatorialPosition::new(347.319_337_5, -6.719_892, 1.0e8).unwrap();
        let lst = 128.737_873_4 - 77.065_556;

        let horizontal = horizontal_position(&venus, &washington, lst, None).unwrap();
        assert!((horizontal.altitude() - 15.1249).abs() < 1e-3);
        assert!((horizontal.azimuth() - 248.0337).abs() < 1e-3);
    }

    #[test]
    fn test_refraction_raises_altitude() {
        let site = Observer::new(0.0, 0.0, 0.0).unwrap();
        let low = EquatorialPosition::new(85.0, 0.0, 1.0e8).unwrap();

        let airless = horizontal_position(&low, &site, 0.0, None).unwrap();
        let refracted =
            horizontal_position(&low, &site, 0.0, Some(RefractionCorrection::standard())).unwrap();

        assert!(refracted.altitude() > airless.altitude());
        assert!(refracted.altitude() - airless.altitude() < 0.2);
        assert_eq!(refracted.azimuth(), airless.azimuth());
    }

    #[test]
    fn test_topocentric_distance_at_zenith() {
        let site = Observer::new(0.0, 0.0, 0.0).unwrap();
        let overhead = EquatorialPosition::new(0.0, 0.0, 384_400.0).unwrap();

        let topocentric = topocentric_position(&overhead, &site, 0.0).unwrap();
        assert!((topocentric.distance_km() - (384_400.0 - 6378.14)).abs() < 1e-6);
        assert!(topocentric.declination().abs() < 1e-9);
    }

    #[test]
    fn test_topocentric_parallax_at_horizon() {
        let site = Observer::new(0.0, 0.0, 0.0).unwrap();
        let rising = EquatorialPosition::new(90.0, 0.0, 384_400.0).unwrap();

        let topocentric = topocentric_position(&rising, &site, 0.0).unwrap();
        let shift = topocentric.right_ascension() - 90.0;
        // On the horizon the whole horizontal parallax shows up in right ascension
        let parallax = crate::moon::equatorial_horizontal_parallax(384_400.0);
        assert!((shift - parallax).abs() < 1e-3, "parallax shift {shift} vs {parallax}");
    }

    #[test]
    fn test_position_angle_cardinal_directions() {
        let sun = EquatorialPosition::new(90.0, 0.0, 1.5e8).unwrap();
        let east = EquatorialPosition::new(90.5, 0.0, 3.8e5).unwrap();
        let south = EquatorialPosition::new(90.0, -0.5, 3.8e5).unwrap();
        let west = EquatorialPosition::new(89.5, 0.0, 3.8e5).unwrap();

        assert!((position_angle(&sun, &east) - 90.0).abs() < 1e-9);
        assert!((position_angle(&sun, &south) - 180.0).abs() < 1e-9);
        assert!((position_angle(&sun, &west) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_angular_separation() {
        let a = EquatorialPosition::new(10.0, 20.0, 1.0).unwrap();
        let b = EquatorialPosition::new(10.0, 21.5, 1.0).unwrap();
        let c = EquatorialPosition::new(190.0, -20.0, 1.0).unwrap();

        assert!((angular_separation(&a, &b) - 1.5).abs() < 1e-9);
        assert!((angular_separation(&a, &c) - 180.0).abs() < 1e-9);
        assert!(angular_separation(&a, &a).abs() < 1e-12);
    }

    #[test]
    fn test_angular_size_decreases_with_distance() {
        let near = angular_size_arcmin(1.737e8, 3.56e10);
        let far = angular_size_arcmin(1.737e8, 4.07e10);
        assert!(near > far);
        assert!((angular_size_arcmin(6.957e10, 1.496e13) - 31.974).abs() < 1e-3);
    }

    #[test]
    fn test_observe_moon_is_closer_than_geocentric() {
        let bengaluru = Observer::new(12.9352, 77.6245, 0.0).unwrap();
        let jd = JulianDate::from_utc(2020, 6, 21, 6, 15, 0.0, 69.4).unwrap();
        let lst = local_sidereal_time(&jd, &bengaluru);

        let geocentric = BuiltinEphemeris.apparent_geocentric(Body::Moon, &jd).unwrap();
        let seen = observe(&BuiltinEphemeris, Body::Moon, &bengaluru, &jd, lst, None).unwrap();

        // Near noon the Moon is high and the observer is thousands of km closer to it
        assert!(seen.horizontal.altitude() > 60.0);
        assert!(seen.equatorial.distance_km() < geocentric.distance_km() - 5000.0);
        assert!(seen.angular_size > 30.5 && seen.angular_size < 32.5);
    }
}
