//! Precession and the rotation from the true equator of date back to J2000 axes.
//!
//! Positions come out of the body theories referred to the true equator and
//! equinox of date. Directions such as the position angle are conventionally
//! quoted against the J2000 pole, so the vectors are rotated back: first
//! nutation is undone (true → mean equator of date), then precession (mean of
//! date → J2000) using the IAU 1976 angles ζ, z, θ.

#![allow(clippy::unreadable_literal)]

use crate::Result;
use crate::math::{cos_deg, polynomial, sin_deg};
use crate::nutation::Nutation;
use crate::time::JulianDate;
use crate::types::EquatorialPosition;

/// IAU 1976 precession angles from J2000.0 to the date, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precession {
    zeta: f64,
    z: f64,
    theta: f64,
}

impl Precession {
    /// Precession angles for the given date (TT argument).
    #[must_use]
    pub fn at(jd: &JulianDate) -> Self {
        let t = jd.julian_ephemeris_century();
        Self {
            zeta: polynomial(&[0.0, 2306.2181, 0.30188, 0.017998], t) / 3600.0,
            z: polynomial(&[0.0, 2306.2181, 1.09468, 0.018203], t) / 3600.0,
            theta: polynomial(&[0.0, 2004.3109, -0.42665, -0.041833], t) / 3600.0,
        }
    }

    /// ζ in degrees.
    #[must_use]
    pub const fn zeta(&self) -> f64 {
        self.zeta
    }

    /// z in degrees.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.z
    }

    /// θ in degrees.
    #[must_use]
    pub const fn theta(&self) -> f64 {
        self.theta
    }
}

/// Refers a position on the true equator of date to J2000 axes.
///
/// Only the axes change: aberration and parallax already applied stay in,
/// and the distance is preserved.
///
/// # Errors
/// Returns `ComputationError` if the rotated vector is degenerate.
pub fn to_j2000_axes(
    position: &EquatorialPosition,
    jd: &JulianDate,
    nutation: &Nutation,
) -> Result<EquatorialPosition> {
    let mean_of_date = remove_nutation(position.to_cartesian(), nutation);
    EquatorialPosition::from_cartesian(remove_precession(mean_of_date, &Precession::at(jd)))
}

/// True equator and equinox of date → mean equator and equinox of date.
fn remove_nutation(v: [f64; 3], nutation: &Nutation) -> [f64; 3] {
    let v = rotate_x(v, nutation.true_obliquity());
    let v = rotate_z(v, -nutation.delta_psi());
    rotate_x(v, -nutation.mean_obliquity())
}

/// Mean equator and equinox of date → J2000.
fn remove_precession(v: [f64; 3], precession: &Precession) -> [f64; 3] {
    let v = rotate_z(v, -precession.z);
    let v = rotate_y(v, -precession.theta);
    rotate_z(v, -precession.zeta)
}

/// Turns the frame about the x axis so that a positive angle tilts the equator onto the ecliptic.
fn rotate_x([x, y, z]: [f64; 3], angle: f64) -> [f64; 3] {
    let (s, c) = (sin_deg(angle), cos_deg(angle));
    [x, c * y + s * z, c * z - s * y]
}

fn rotate_y([x, y, z]: [f64; 3], angle: f64) -> [f64; 3] {
    let (s, c) = (sin_deg(angle), cos_deg(angle));
    [c * x - s * z, y, s * x + c * z]
}

/// Adds `angle` to the longitude of the vector.
fn rotate_z([x, y, z]: [f64; 3], angle: f64) -> [f64; 3] {
    let (s, c) = (sin_deg(angle), cos_deg(angle));
    [c * x - s * y, s * x + c * y, z]
}
