//! Nutation, obliquity of the ecliptic and sidereal time.
//!
//! Uses the abbreviated nutation series (accurate to about 0.5″ in longitude
//! and 0.1″ in obliquity), which is well below the accuracy of the analytical
//! body theories it corrects.

#![allow(clippy::unreadable_literal)]

use crate::math::{cos_deg, mul_add, normalize_degrees_0_to_360, polynomial, sin_deg};
use crate::time::{J2000_JDN, JulianDate};

/// Mean obliquity of the ecliptic (IAU 1980) in arcseconds, polynomial in Julian centuries.
const MEAN_OBLIQUITY_ARCSEC: [f64; 4] = [84_381.448, -46.8150, -0.00059, 0.001813];

/// Nutation in longitude and obliquity together with the mean obliquity at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Nutation in longitude Δψ (degrees)
    delta_psi: f64,
    /// Nutation in obliquity Δε (degrees)
    delta_epsilon: f64,
    /// Mean obliquity of the ecliptic ε₀ (degrees)
    mean_obliquity: f64,
}

impl Nutation {
    /// Evaluates nutation and obliquity for the given date (TT argument).
    #[must_use]
    pub fn at(jd: &JulianDate) -> Self {
        let t = jd.julian_ephemeris_century();

        // Longitude of the ascending node of the Moon's mean orbit
        let omega = polynomial(&[125.04452, -1934.136261, 0.0020708, 1.0 / 450_000.0], t);
        // Mean longitudes of the Sun and the Moon
        let l_sun = mul_add(36_000.7698, t, 280.4665);
        let l_moon = mul_add(481_267.8813, t, 218.3165);

        let delta_psi_arcsec = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun)
            - 0.23 * sin_deg(2.0 * l_moon)
            + 0.21 * sin_deg(2.0 * omega);
        let delta_epsilon_arcsec = 9.20 * cos_deg(omega)
            + 0.57 * cos_deg(2.0 * l_sun)
            + 0.10 * cos_deg(2.0 * l_moon)
            - 0.09 * cos_deg(2.0 * omega);

        Self {
            delta_psi: delta_psi_arcsec / 3600.0,
            delta_epsilon: delta_epsilon_arcsec / 3600.0,
            mean_obliquity: polynomial(&MEAN_OBLIQUITY_ARCSEC, t) / 3600.0,
        }
    }

    /// Nutation in longitude Δψ in degrees.
    #[must_use]
    pub const fn delta_psi(&self) -> f64 {
        self.delta_psi
    }

    /// Nutation in obliquity Δε in degrees.
    #[must_use]
    pub const fn delta_epsilon(&self) -> f64 {
        self.delta_epsilon
    }

    /// Mean obliquity of the ecliptic ε₀ in degrees.
    #[must_use]
    pub const fn mean_obliquity(&self) -> f64 {
        self.mean_obliquity
    }

    /// True obliquity of the ecliptic ε = ε₀ + Δε in degrees.
    #[must_use]
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.delta_epsilon
    }
}

/// Mean sidereal time at Greenwich in degrees [0, 360), from the UT Julian date.
#[must_use]
pub fn mean_sidereal_time_at_greenwich(jd: &JulianDate) -> f64 {
    let t = jd.julian_century();
    normalize_degrees_0_to_360(mul_add(
        t * t,
        0.000387933 - t / 38_710_000.0,
        mul_add(360.98564736629, jd.julian_date() - J2000_JDN, 280.46061837),
    ))
}

/// Apparent sidereal time at Greenwich in degrees [0, 360).
///
/// The mean sidereal time corrected by the equation of the equinoxes Δψ·cos ε.
#[must_use]
pub fn apparent_sidereal_time_at_greenwich(jd: &JulianDate, nutation: &Nutation) -> f64 {
    normalize_degrees_0_to_360(mul_add(
        nutation.delta_psi(),
        cos_deg(nutation.true_obliquity()),
        mean_sidereal_time_at_greenwich(jd),
    ))
}
