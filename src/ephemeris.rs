//! Ephemeris providers.
//!
//! The sampling loop only needs apparent geocentric positions; anything that can
//! produce those for the Sun and the Moon can stand behind [`Ephemeris`].

use crate::time::JulianDate;
use crate::types::EquatorialPosition;
use crate::{Result, moon, sun};
use core::fmt;

/// Solar radius in centimetres (IAU 2015 nominal).
pub const SUN_RADIUS_CM: f64 = 6.957e10;

/// Mean lunar radius in centimetres.
pub const MOON_RADIUS_CM: f64 = 1.737e8;

/// A body tracked during an eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    /// The Sun
    Sun,
    /// The Moon
    Moon,
}

impl Body {
    /// Physical radius in centimetres.
    #[must_use]
    pub const fn radius_cm(self) -> f64 {
        match self {
            Self::Sun => SUN_RADIUS_CM,
            Self::Moon => MOON_RADIUS_CM,
        }
    }

    /// Lowercase body name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of apparent body positions.
pub trait Ephemeris {
    /// Apparent geocentric equatorial position of `body`, referred to the true
    /// equinox of date, with the distance from the Earth's centre.
    ///
    /// # Errors
    /// Returns error if the provider cannot produce a finite position for this date.
    fn apparent_geocentric(&self, body: Body, jd: &JulianDate) -> Result<EquatorialPosition>;
}

/// Analytical ephemeris built into the crate.
///
/// # Example
/// ```
/// use eclipse_ephemeris::ephemeris::{Body, BuiltinEphemeris, Ephemeris};
/// use eclipse_ephemeris::time::JulianDate;
///
/// let jd = JulianDate::from_utc(2020, 6, 21, 6, 0, 0.0, 69.4).unwrap();
/// let sun = BuiltinEphemeris.apparent_geocentric(Body::Sun, &jd).unwrap();
/// assert!(sun.distance_km() > 1.5e8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinEphemeris;

impl Ephemeris for BuiltinEphemeris {
    fn apparent_geocentric(&self, body: Body, jd: &JulianDate) -> Result<EquatorialPosition> {
        match body {
            Body::Sun => sun::apparent_position(jd),
            Body::Moon => moon::apparent_position(jd),
        }
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn apparent_geocentric(&self, body: Body, jd: &JulianDate) -> Result<EquatorialPosition> {
        (**self).apparent_geocentric(body, jd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sun::AU_KM;

    #[test]
    fn test_body_properties() {
        assert_eq!(Body::Sun.radius_cm(), 6.957e10);
        assert_eq!(Body::Moon.radius_cm(), 1.737e8);
        assert_eq!(Body::Moon.to_string(), "moon");
        assert_eq!(Body::Sun.name(), "sun");
    }

    #[test]
    fn test_builtin_dispatches_by_body() {
        let jd = JulianDate::from_julian_ephemeris_day(2_448_724.5, 0.0);
        let sun = BuiltinEphemeris.apparent_geocentric(Body::Sun, &jd).unwrap();
        let moon = BuiltinEphemeris.apparent_geocentric(Body::Moon, &jd).unwrap();

        assert!((sun.distance_km() / AU_KM - 1.0).abs() < 0.02);
        assert!((moon.distance_km() - 368_409.7).abs() < 1.0);
    }

    #[test]
    fn test_ephemeris_by_reference() {
        fn distance<E: Ephemeris>(ephemeris: E, jd: &JulianDate) -> f64 {
            ephemeris.apparent_geocentric(Body::Moon, jd).unwrap().distance_km()
        }

        let jd = JulianDate::from_julian_ephemeris_day(2_448_724.5, 0.0);
        let builtin = BuiltinEphemeris;
        assert_eq!(distance(&builtin, &jd), distance(builtin, &jd));
    }
}
