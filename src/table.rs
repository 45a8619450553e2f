//! Sampling the Sun and Moon into a table of observed quantities.

use crate::Result;
use crate::config::TimeWindow;
use crate::ephemeris::{Body, BuiltinEphemeris, Ephemeris};
use crate::math::{normalize_degrees_0_to_360, round_to_decimals};
use crate::nutation::Nutation;
use crate::precession::to_j2000_axes;
use crate::time::{JulianDate, utc_to_local};
use crate::topocentric::{angular_separation, local_sidereal_time, observe, position_angle};
use crate::types::{Observer, RefractionCorrection};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, info};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Decimal places kept for every tabulated angle and size.
pub const DECIMALS: i32 = 3;

/// Column headers of the CSV table.
pub const CSV_HEADER: [&str; 9] = [
    "UT",
    "PA",
    "SunALT",
    "SunAZ",
    "SunSize",
    "MoonALT",
    "MoonAZ",
    "MoonSize",
    "Separation",
];

/// What the observer sees of the Sun and the Moon at one instant.
///
/// Angles are in degrees and sizes in arcminutes, all rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisRow {
    /// Instant of the sample
    pub ut: DateTime<Utc>,
    /// Position angle of the Moon relative to the Sun, east of the J2000 north
    pub position_angle: f64,
    /// Sun altitude
    pub sun_altitude: f64,
    /// Sun azimuth, from north through east
    pub sun_azimuth: f64,
    /// Apparent diameter of the Sun
    pub sun_size: f64,
    /// Moon altitude
    pub moon_altitude: f64,
    /// Moon azimuth, from north through east
    pub moon_azimuth: f64,
    /// Apparent diameter of the Moon
    pub moon_size: f64,
    /// Angular distance between the centres of the Sun and the Moon
    pub separation: f64,
}

impl EphemerisRow {
    /// Whether the lunar disk overlaps the solar disk.
    #[must_use]
    pub fn is_eclipsed(&self) -> bool {
        self.separation * 60.0 < (self.sun_size + self.moon_size) / 2.0
    }

    fn to_record(&self) -> [String; 9] {
        [
            self.ut.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            format!("{:.3}", self.position_angle),
            format!("{:.3}", self.sun_altitude),
            format!("{:.3}", self.sun_azimuth),
            format!("{:.3}", self.sun_size),
            format!("{:.3}", self.moon_altitude),
            format!("{:.3}", self.moon_azimuth),
            format!("{:.3}", self.moon_size),
            format!("{:.3}", self.separation),
        ]
    }
}

/// Computes [`EphemerisRow`]s for one observer from an ephemeris.
#[derive(Debug, Clone)]
pub struct Sampler<E = BuiltinEphemeris> {
    ephemeris: E,
    observer: Observer,
    refraction: Option<RefractionCorrection>,
}

impl Sampler<BuiltinEphemeris> {
    /// A sampler backed by the built-in analytical ephemeris.
    #[must_use]
    pub const fn builtin(observer: Observer) -> Self {
        Self::new(BuiltinEphemeris, observer)
    }
}

impl<E: Ephemeris> Sampler<E> {
    /// Creates a sampler reporting airless altitudes.
    #[must_use]
    pub const fn new(ephemeris: E, observer: Observer) -> Self {
        Self {
            ephemeris,
            observer,
            refraction: None,
        }
    }

    /// Applies atmospheric refraction to the reported altitudes.
    #[must_use]
    pub fn with_refraction(mut self, refraction: Option<RefractionCorrection>) -> Self {
        self.refraction = refraction;
        self
    }

    /// The observing site.
    #[must_use]
    pub const fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Computes one row for the given instant.
    ///
    /// # Errors
    /// Returns error if no ΔT estimate exists for the date or the ephemeris fails.
    pub fn row_at(&self, instant: DateTime<Utc>) -> Result<EphemerisRow> {
        let jd = JulianDate::from_datetime_estimated(&instant)?;
        let lst = local_sidereal_time(&jd, &self.observer);

        let sun = observe(&self.ephemeris, Body::Sun, &self.observer, &jd, lst, self.refraction)?;
        let moon = observe(&self.ephemeris, Body::Moon, &self.observer, &jd, lst, self.refraction)?;

        // Position angle is quoted against the J2000 pole
        let nutation = Nutation::at(&jd);
        let sun_j2000 = to_j2000_axes(&sun.equatorial, &jd, &nutation)?;
        let moon_j2000 = to_j2000_axes(&moon.equatorial, &jd, &nutation)?;

        let round = |value| round_to_decimals(value, DECIMALS);
        // 359.9996 must not round up to 360
        let round_angle = |value| normalize_degrees_0_to_360(round(value));
        Ok(EphemerisRow {
            ut: instant,
            position_angle: round_angle(position_angle(&sun_j2000, &moon_j2000)),
            sun_altitude: round(sun.horizontal.altitude()),
            sun_azimuth: round_angle(sun.horizontal.azimuth()),
            sun_size: round(sun.angular_size),
            moon_altitude: round(moon.horizontal.altitude()),
            moon_azimuth: round_angle(moon.horizontal.azimuth()),
            moon_size: round(moon.angular_size),
            separation: round(angular_separation(&sun.equatorial, &moon.equatorial)),
        })
    }
}

/// Rows in the order they were sampled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EphemerisTable {
    rows: Vec<EphemerisRow>,
}

impl EphemerisTable {
    /// Samples every instant of `window`, in increasing time order.
    ///
    /// A window whose start lies after its end produces an empty table.
    ///
    /// # Errors
    /// The first failing row aborts sampling and its error is returned.
    ///
    /// # Example
    /// ```
    /// use eclipse_ephemeris::config::ObservationConfig;
    /// use eclipse_ephemeris::table::{EphemerisTable, Sampler};
    ///
    /// let config = ObservationConfig::default();
    /// let sampler = Sampler::builtin(config.observer().unwrap());
    /// let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();
    /// assert_eq!(table.len(), 21);
    /// ```
    pub fn sample<E: Ephemeris>(sampler: &Sampler<E>, window: &TimeWindow) -> Result<Self> {
        let table = Self::from_instants(sampler, window.instants())?;
        info!(
            "sampled {} rows from {} to {} every {} s",
            table.len(),
            window.start(),
            window.end(),
            window.step().num_seconds()
        );
        Ok(table)
    }

    /// Computes one row per instant, keeping the given order.
    ///
    /// # Errors
    /// The first failing row aborts tabulation and its error is returned.
    pub fn from_instants<E, I>(sampler: &Sampler<E>, instants: I) -> Result<Self>
    where
        E: Ephemeris,
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        let rows = instants
            .into_iter()
            .map(|instant| {
                let row = sampler.row_at(instant)?;
                debug!(
                    "{}: PA {:.3}, sun alt {:.3}, moon alt {:.3}, separation {:.3}",
                    row.ut, row.position_angle, row.sun_altitude, row.moon_altitude, row.separation
                );
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rows })
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[EphemerisRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sample instants converted to local clock time.
    ///
    /// # Errors
    /// Returns `InvalidUtcOffset` if the offset is out of range.
    pub fn local_times(&self, utc_offset_hours: f64) -> Result<Vec<NaiveDateTime>> {
        self.rows
            .iter()
            .map(|row| utc_to_local(&row.ut, utc_offset_hours))
            .collect()
    }

    /// Sun altitudes in row order.
    #[must_use]
    pub fn sun_altitudes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.sun_altitude).collect()
    }

    /// Moon altitudes in row order.
    #[must_use]
    pub fn moon_altitudes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.moon_altitude).collect()
    }

    /// Sun diameters in row order.
    #[must_use]
    pub fn sun_sizes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.sun_size).collect()
    }

    /// Moon diameters in row order.
    #[must_use]
    pub fn moon_sizes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.moon_size).collect()
    }

    /// Writes the table as CSV with a header row.
    ///
    /// # Errors
    /// Returns `Csv` or `Io` if writing fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(CSV_HEADER)?;
        for row in &self.rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to a file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be created or written.
    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.write_csv(File::create(path)?)?;
        info!("wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EphemerisTable {
    type Item = &'a EphemerisRow;
    type IntoIter = core::slice::Iter<'a, EphemerisRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
