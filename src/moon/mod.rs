//! Analytical lunar ephemeris.
//!
//! Implements the truncated ELP-2000/82 theory as given by Meeus,
//! "Astronomical Algorithms" (2nd ed.), chapter 47: 60 periodic terms each for
//! longitude and distance, 60 for latitude, plus the additive planetary and
//! flattening corrections. Accuracy is about 10″ in longitude and 4″ in latitude.

#![allow(clippy::unreadable_literal)]

pub mod coefficients;
use coefficients::{TERMS_B, TERMS_LR};

use crate::Result;
use crate::math::{normalize_degrees_0_to_360, polynomial, sin_deg};
use crate::nutation::Nutation;
use crate::time::JulianDate;
use crate::types::{EARTH_EQUATORIAL_RADIUS_KM, EclipticPosition, EquatorialPosition};

/// Mean distance term of the lunar distance series in kilometres.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Mean elements of the lunar orbit at one instant, in degrees.
#[derive(Debug, Clone, Copy)]
struct FundamentalArguments {
    /// Mean longitude of the Moon L′
    mean_longitude: f64,
    /// Mean elongation of the Moon D
    elongation: f64,
    /// Mean anomaly of the Sun M
    sun_anomaly: f64,
    /// Mean anomaly of the Moon M′
    moon_anomaly: f64,
    /// Argument of latitude F
    latitude_argument: f64,
    /// Eccentricity factor of the Earth's orbit E
    eccentricity: f64,
}

impl FundamentalArguments {
    fn at(t: f64) -> Self {
        Self {
            mean_longitude: polynomial(
                &[218.3164477, 481267.88123421, -0.0015786, 1.0 / 538_841.0, -1.0 / 65_194_000.0],
                t,
            ),
            elongation: polynomial(
                &[297.8501921, 445267.1114034, -0.0018819, 1.0 / 545_868.0, -1.0 / 113_065_000.0],
                t,
            ),
            sun_anomaly: polynomial(&[357.5291092, 35999.0502909, -0.0001536, 1.0 / 24_490_000.0], t),
            moon_anomaly: polynomial(
                &[134.9633964, 477198.8675055, 0.0087414, 1.0 / 69_699.0, -1.0 / 14_712_000.0],
                t,
            ),
            latitude_argument: polynomial(
                &[93.2720950, 483202.0175233, -0.0036539, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0],
                t,
            ),
            eccentricity: polynomial(&[1.0, -0.002516, -0.0000074], t),
        }
    }

    /// Argument of one periodic term and the eccentricity correction for its M multiple.
    fn term(&self, d: i32, m: i32, m_prime: i32, f: i32) -> (f64, f64) {
        let argument = f64::from(d) * self.elongation
            + f64::from(m) * self.sun_anomaly
            + f64::from(m_prime) * self.moon_anomaly
            + f64::from(f) * self.latitude_argument;
        let factor = match m.abs() {
            1 => self.eccentricity,
            2 => self.eccentricity * self.eccentricity,
            _ => 1.0,
        };
        (argument, factor)
    }
}

/// Geometric ecliptic position of the Moon referred to the mean equinox of date.
///
/// Longitude and latitude are in degrees, distance is centre-to-centre in kilometres.
#[must_use]
pub fn geometric_position(jd: &JulianDate) -> EclipticPosition {
    let t = jd.julian_ephemeris_century();
    let args = FundamentalArguments::at(t);

    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479264.290 * t;
    let a3 = 313.45 + 481266.484 * t;

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &[d, m, m_prime, f, l_coeff, r_coeff] in &TERMS_LR {
        let (argument, factor) = args.term(d, m, m_prime, f);
        let radians = argument.to_radians();
        sum_l += f64::from(l_coeff) * factor * radians.sin();
        sum_r += f64::from(r_coeff) * factor * radians.cos();
    }

    let mut sum_b = 0.0;
    for &[d, m, m_prime, f, b_coeff] in &TERMS_B {
        let (argument, factor) = args.term(d, m, m_prime, f);
        sum_b += f64::from(b_coeff) * factor * sin_deg(argument);
    }

    // Venus, Jupiter and Earth-flattening corrections
    let l_prime = args.mean_longitude;
    let f = args.latitude_argument;
    sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(l_prime - f) + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(l_prime)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - f)
        + 175.0 * sin_deg(a1 + f)
        + 127.0 * sin_deg(l_prime - args.moon_anomaly)
        - 115.0 * sin_deg(l_prime + args.moon_anomaly);

    EclipticPosition {
        longitude: normalize_degrees_0_to_360(l_prime + sum_l / 1e6),
        latitude: sum_b / 1e6,
        distance_km: MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

/// Apparent ecliptic position of the Moon: the geometric longitude corrected for nutation.
///
/// The lunar light-time is about 1.3 s and the theory already refers to the
/// apparent position, so no aberration term is applied.
#[must_use]
pub fn apparent_ecliptic_position(jd: &JulianDate, nutation: &Nutation) -> EclipticPosition {
    let geometric = geometric_position(jd);
    EclipticPosition {
        longitude: normalize_degrees_0_to_360(geometric.longitude + nutation.delta_psi()),
        ..geometric
    }
}

/// Apparent geocentric equatorial position of the Moon, referred to the true equinox of date.
///
/// # Errors
/// Returns error if the computed position is not finite.
///
/// # Example
/// ```
/// use eclipse_ephemeris::{moon, time::JulianDate};
///
/// let jd = JulianDate::from_utc(2020, 6, 21, 4, 30, 0.0, 69.4).unwrap();
/// let position = moon::apparent_position(&jd).unwrap();
///
/// assert!((356_000.0..407_000.0).contains(&position.distance_km()));
/// ```
pub fn apparent_position(jd: &JulianDate) -> Result<EquatorialPosition> {
    let nutation = Nutation::at(jd);
    apparent_ecliptic_position(jd, &nutation).to_equatorial(nutation.true_obliquity())
}

/// Equatorial horizontal parallax in degrees for a geocentric distance in kilometres.
#[must_use]
pub fn equatorial_horizontal_parallax(distance_km: f64) -> f64 {
    (EARTH_EQUATORIAL_RADIUS_KM / distance_km).asin().to_degrees()
}
