//! Photo timestamp tables.
//!
//! The input is delimited text with `#` comment lines and a header row that
//! includes a `Time` column of local clock readings (`HH:MM:SS`). Any other
//! columns (file names, exposure settings) are ignored.

use crate::time::local_to_utc;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use csv::ReaderBuilder;
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header of the column holding the local clock times.
pub const TIME_COLUMN: &str = "Time";

/// Reads photo timestamps from a file and converts them to UTC instants.
///
/// # Errors
/// Returns `Io` if the file cannot be opened, `MissingColumn` without a `Time`
/// header, `InvalidTimestamp` for unparseable clock times and `Csv` for
/// malformed rows.
pub fn read_photo_times<P: AsRef<Path>>(
    path: P,
    date: NaiveDate,
    utc_offset_hours: f64,
) -> Result<Vec<DateTime<Utc>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let instants = parse_photo_times(file, date, utc_offset_hours)?;
    info!("loaded {} photo times from {}", instants.len(), path.display());
    Ok(instants)
}

/// Parses photo timestamps from any reader, in file order.
///
/// # Errors
/// See [`read_photo_times`].
///
/// # Example
/// ```
/// # use eclipse_ephemeris::input::parse_photo_times;
/// # use chrono::NaiveDate;
/// let text = "# camera clock set to IST\nImage,Time\nIMG_0001.JPG,10:15:30\n";
/// let date = NaiveDate::from_ymd_opt(2020, 6, 21).unwrap();
/// let instants = parse_photo_times(text.as_bytes(), date, 5.5).unwrap();
/// assert_eq!(instants[0].to_rfc3339(), "2020-06-21T04:45:30+00:00");
/// ```
pub fn parse_photo_times<R: Read>(
    reader: R,
    date: NaiveDate,
    utc_offset_hours: f64,
) -> Result<Vec<DateTime<Utc>>> {
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let column = reader
        .headers()?
        .iter()
        .position(|header| header == TIME_COLUMN)
        .ok_or_else(|| Error::missing_column(TIME_COLUMN))?;

    let mut instants = Vec::new();
    for record in reader.records() {
        let record = record?;
        let text = record.get(column).unwrap_or_default();
        let clock = parse_clock_time(text)?;
        let instant = local_to_utc(date, clock, utc_offset_hours)?;
        debug!("photo at {text} local is {instant}");
        instants.push(instant);
    }
    Ok(instants)
}

/// Parses a local clock reading such as `10:12:05` or `10:12:05.25`.
///
/// # Errors
/// Returns `InvalidTimestamp` if the text is not a valid time of day.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f").map_err(|_| Error::invalid_timestamp(text))
}
