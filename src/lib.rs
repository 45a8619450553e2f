//! # Eclipse Ephemeris
//!
//! Apparent positions of the Sun and the Moon for an observer on the Earth,
//! tabulated over a solar eclipse and rendered as an animated altitude plot.
//!
//! The pipeline has three stages:
//! - **Sampling**: for each instant, query an [`ephemeris::Ephemeris`] for both
//!   bodies, shift them to the observer (parallax), transform to the horizon
//!   frame and derive position angle, angular sizes and separation.
//! - **Tabulation**: rows accumulate in an [`table::EphemerisTable`], which can
//!   be written as CSV.
//! - **Rendering**: [`render::AltitudeAnimation`] turns the table into a GIF
//!   that loops forever, one frame per row.
//!
//! A self-contained analytical ephemeris is built in: a low-precision solar
//! theory (≈0.01°) and the truncated ELP-2000/82 lunar theory (≈10″), with
//! nutation, aberration and ΔT after Espenak & Meeus.
//!
//! ## Quick Start
//!
//! ```rust
//! use eclipse_ephemeris::config::ObservationConfig;
//! use eclipse_ephemeris::render::{AltitudeAnimation, RenderOptions};
//! use eclipse_ephemeris::table::{EphemerisTable, Sampler};
//!
//! // 2020 June 21, 10:00 to 10:20 IST, from Bengaluru
//! let config = ObservationConfig::default();
//! let sampler = Sampler::builtin(config.observer().unwrap());
//! let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();
//!
//! let first = &table.rows()[0];
//! println!("PA {:.3}°, Moon {:.3}′ across", first.position_angle, first.moon_size);
//!
//! let animation = AltitudeAnimation::from_table(&table, config.utc_offset_hours).unwrap();
//! let options = RenderOptions { width: 320, height: 240, ..RenderOptions::default() };
//! let mut gif = Vec::new();
//! animation.write_gif(&mut gif, &options).unwrap();
//! assert!(gif.starts_with(b"GIF89a"));
//! ```
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd ed. Willmann-Bell.
//! - Espenak, F.; Meeus, J. (2014). Polynomial expressions for Delta T.
//!   <https://www.eclipsewise.com/help/deltatpoly2014.html>
//!
//! ## Coordinate System
//!
//! - **Azimuth**: 0° = North, measured clockwise (0° to 360°)
//! - **Altitude**: 0° = horizon, 90° = directly overhead (-90° to +90°)
//! - **Position angle**: 0° = celestial north, increasing through east (0° to 360°)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of rounded values in tests
)]

// Public API exports
pub use crate::ephemeris::{Body, BuiltinEphemeris, Ephemeris};
pub use crate::error::{Error, Result};
pub use crate::table::{EphemerisRow, EphemerisTable, Sampler};
pub use crate::types::{EquatorialPosition, HorizontalPosition, Observer, RefractionCorrection};

// Body theories
pub mod moon;
pub mod nutation;
pub mod precession;
pub mod sun;

// Core modules
pub mod ephemeris;
pub mod error;
pub mod topocentric;
pub mod types;

// Pipeline
pub mod config;
pub mod input;
pub mod render;
pub mod table;

// Internal modules
mod math;

// Public modules
pub mod time;
