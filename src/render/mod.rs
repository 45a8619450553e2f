//! Animated altitude plot of the Sun and the Moon.
//!
//! A static background (frame, gridlines, ticks and labels) is drawn once; each
//! frame copies it and places the two markers for one sample. Frames are
//! written in sample order to a GIF that repeats forever.

pub mod font;

use crate::table::EphemerisTable;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use font::{draw_text, put_pixel_clipped, text_height, text_width};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Marker colour of the Sun.
pub const SUN_COLOR: Rgba<u8> = Rgba([255, 165, 0, 255]);
/// Marker colour of the Moon.
pub const MOON_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const MAJOR_GRID_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
const MINOR_GRID_COLOR: Rgba<u8> = Rgba([236, 236, 236, 255]);

/// Fraction of the data span added on each side of both axes.
const AXIS_MARGIN: f64 = 0.05;

const MAJOR_TICK_MINUTES: i64 = 15;
const MINOR_TICK_MINUTES: i64 = 5;
const MAJOR_TICK_DEGREES: i64 = 10;

const MAJOR_TICK_LENGTH: i64 = 9;
const MAJOR_TICK_WIDTH: i64 = 2;
const MINOR_TICK_LENGTH: i64 = 5;
const MINOR_TICK_WIDTH: i64 = 1;

const MARKER_RADIUS: i64 = 6;

const MIN_WIDTH: u32 = 64;
const MIN_HEIGHT: u32 = 48;

/// Canvas size and playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Canvas width (pixels)
    pub width: u32,
    /// Canvas height (pixels)
    pub height: u32,
    /// Delay between frames (milliseconds)
    pub frame_delay_ms: u32,
    /// Draw each body as a disk scaled to its angular size instead of a point marker
    pub draw_disks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            frame_delay_ms: 24,
            draw_disks: false,
        }
    }
}

impl RenderOptions {
    fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(Error::computation_error("canvas must be at least 64x48 pixels"));
        }
        Ok(())
    }

    fn label_scale(&self) -> u32 {
        (self.height / 450).max(1)
    }
}

/// Time series of Sun and Moon altitudes to animate, one frame per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeAnimation {
    times: Vec<NaiveDateTime>,
    sun_altitudes: Vec<f64>,
    moon_altitudes: Vec<f64>,
    sizes: Option<(Vec<f64>, Vec<f64>)>,
}

impl AltitudeAnimation {
    /// Creates an animation from local clock times and altitudes in degrees.
    ///
    /// # Errors
    /// Returns `EmptySeries` for no samples, `SeriesLengthMismatch` when the
    /// altitude series differ in length from the times, and `ComputationError`
    /// for non-finite altitudes.
    pub fn new(
        times: Vec<NaiveDateTime>,
        sun_altitudes: Vec<f64>,
        moon_altitudes: Vec<f64>,
    ) -> Result<Self> {
        if times.is_empty() {
            return Err(Error::EmptySeries);
        }
        check_series_length(times.len(), &sun_altitudes)?;
        check_series_length(times.len(), &moon_altitudes)?;
        if sun_altitudes.iter().chain(&moon_altitudes).any(|value| !value.is_finite()) {
            return Err(Error::computation_error("altitude is not finite"));
        }

        Ok(Self {
            times,
            sun_altitudes,
            moon_altitudes,
            sizes: None,
        })
    }

    /// Attaches apparent diameters in arcminutes, used when drawing disks.
    ///
    /// # Errors
    /// Returns `SeriesLengthMismatch` if either series differs in length from the times.
    pub fn with_sizes(mut self, sun_sizes: Vec<f64>, moon_sizes: Vec<f64>) -> Result<Self> {
        check_series_length(self.times.len(), &sun_sizes)?;
        check_series_length(self.times.len(), &moon_sizes)?;
        self.sizes = Some((sun_sizes, moon_sizes));
        Ok(self)
    }

    /// Builds the animation from a sampled table, labelling the time axis in local clock time.
    ///
    /// # Errors
    /// Returns `EmptySeries` for an empty table and `InvalidUtcOffset` for a bad offset.
    pub fn from_table(table: &EphemerisTable, utc_offset_hours: f64) -> Result<Self> {
        Self::new(
            table.local_times(utc_offset_hours)?,
            table.sun_altitudes(),
            table.moon_altitudes(),
        )?
        .with_sizes(table.sun_sizes(), table.moon_sizes())
    }

    /// Number of frames the animation produces.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.times.len()
    }

    /// Renders the frames in sample order.
    ///
    /// # Errors
    /// Returns `ComputationError` if the canvas is too small to plot on.
    pub fn frames(&self, options: &RenderOptions) -> Result<Frames<'_>> {
        options.validate()?;
        let plot = PlotArea::fit(self, options);
        let background = plot.background(options);
        Ok(Frames {
            animation: self,
            plot,
            background,
            draw_disks: options.draw_disks,
            next: 0,
        })
    }

    /// Encodes the animation as a GIF that loops forever.
    ///
    /// # Errors
    /// Returns `Image` if encoding fails or `Io` if writing fails.
    pub fn write_gif<W: Write>(&self, writer: W, options: &RenderOptions) -> Result<()> {
        let frames = self.frames(options)?;
        let delay = Delay::from_numer_denom_ms(options.frame_delay_ms, 1);

        let mut encoder = GifEncoder::new_with_speed(writer, 10);
        encoder.set_repeat(Repeat::Infinite)?;
        for (index, image) in frames.enumerate() {
            debug!("encoding frame {index}");
            encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
        }
        Ok(())
    }

    /// Encodes the animation to a GIF file.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be created, or any error of [`Self::write_gif`].
    pub fn save_gif<P: AsRef<Path>>(&self, path: P, options: &RenderOptions) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_gif(&mut writer, options)?;
        writer.flush()?;
        info!(
            "wrote {} frames ({}x{}) to {}",
            self.frame_count(),
            options.width,
            options.height,
            path.display()
        );
        Ok(())
    }

    fn time_offset_seconds(&self, index: usize) -> f64 {
        seconds_between(self.times[0], self.times[index])
    }
}

fn check_series_length(times: usize, values: &[f64]) -> Result<()> {
    if values.len() != times {
        return Err(Error::SeriesLengthMismatch {
            times,
            values: values.len(),
        });
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn seconds_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

/// Sequential frame iterator; see [`AltitudeAnimation::frames`].
#[derive(Debug)]
pub struct Frames<'a> {
    animation: &'a AltitudeAnimation,
    plot: PlotArea,
    background: RgbaImage,
    draw_disks: bool,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = RgbaImage;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        if index >= self.animation.frame_count() {
            return None;
        }
        self.next += 1;

        let mut image = self.background.clone();
        let x = self.plot.x_pixel(self.animation.time_offset_seconds(index));
        let sizes = self.animation.sizes.as_ref().filter(|_| self.draw_disks);
        let markers = [
            (self.animation.sun_altitudes[index], SUN_COLOR, sizes.map(|(sun, _)| sun[index])),
            (self.animation.moon_altitudes[index], MOON_COLOR, sizes.map(|(_, moon)| moon[index])),
        ];
        for (altitude, color, diameter) in markers {
            let radius = diameter.map_or(MARKER_RADIUS, |diameter| self.plot.disk_radius(diameter));
            fill_circle(&mut image, x, self.plot.y_pixel(altitude), radius, color);
        }
        Some(image)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.animation.frame_count() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// Pixel placement of the data: axis limits and the plotting rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    /// Local time of the first sample
    origin: NaiveDateTime,
    /// Time limits in seconds relative to `origin`
    time_range: (f64, f64),
    /// Altitude limits in degrees
    altitude_range: (f64, f64),
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

impl PlotArea {
    #[allow(clippy::cast_possible_truncation)]
    fn fit(animation: &AltitudeAnimation, options: &RenderOptions) -> Self {
        let last = animation.frame_count() - 1;
        let time_range = padded_range(0.0, animation.time_offset_seconds(last), 60.0);

        let altitudes = || animation.sun_altitudes.iter().chain(&animation.moon_altitudes).copied();
        let low = altitudes().fold(f64::INFINITY, f64::min);
        let high = altitudes().fold(f64::NEG_INFINITY, f64::max);
        let altitude_range = padded_range(low, high, 1.0);

        let width = f64::from(options.width);
        let height = f64::from(options.height);
        Self {
            origin: animation.times[0],
            time_range,
            altitude_range,
            left: (width * 0.10).round() as i64,
            right: (width * 0.96).round() as i64,
            top: (height * 0.05).round() as i64,
            bottom: (height * 0.90).round() as i64,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn x_pixel(&self, seconds: f64) -> i64 {
        let (low, high) = self.time_range;
        let fraction = (seconds - low) / (high - low);
        self.left + (fraction * (self.right - self.left) as f64).round() as i64
    }

    #[allow(clippy::cast_possible_truncation)]
    fn y_pixel(&self, altitude: f64) -> i64 {
        let (low, high) = self.altitude_range;
        let fraction = (altitude - low) / (high - low);
        self.bottom - (fraction * (self.bottom - self.top) as f64).round() as i64
    }

    /// Pixel radius of a disk whose angular diameter is given in arcminutes, on the altitude scale.
    #[allow(clippy::cast_possible_truncation)]
    fn disk_radius(&self, diameter_arcmin: f64) -> i64 {
        let (low, high) = self.altitude_range;
        let pixels_per_degree = (self.bottom - self.top) as f64 / (high - low);
        ((diameter_arcmin / 120.0) * pixels_per_degree).round().max(2.0) as i64
    }

    fn background(&self, options: &RenderOptions) -> RgbaImage {
        let mut image = RgbaImage::from_pixel(options.width, options.height, BACKGROUND);
        let scale = options.label_scale();
        self.draw_altitude_axis(&mut image, scale);
        self.draw_time_axis(&mut image, scale);

        // Frame last so gridlines never cover it
        fill_rect(&mut image, self.left, self.top, self.right, self.top, AXIS_COLOR);
        fill_rect(&mut image, self.left, self.bottom, self.right, self.bottom, AXIS_COLOR);
        fill_rect(&mut image, self.left, self.top, self.left, self.bottom, AXIS_COLOR);
        fill_rect(&mut image, self.right, self.top, self.right, self.bottom, AXIS_COLOR);
        image
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_altitude_axis(&self, image: &mut RgbaImage, scale: u32) {
        let (low, high) = self.altitude_range;
        for degree in (low.ceil() as i64)..=(high.floor() as i64) {
            let y = self.y_pixel(degree as f64);
            let major = degree % MAJOR_TICK_DEGREES == 0;
            let (length, width, grid) = if major {
                (MAJOR_TICK_LENGTH, MAJOR_TICK_WIDTH, MAJOR_GRID_COLOR)
            } else {
                (MINOR_TICK_LENGTH, MINOR_TICK_WIDTH, MINOR_GRID_COLOR)
            };

            fill_rect(image, self.left, y, self.right, y, grid);
            fill_rect(image, self.left, y, self.left + length, y + width - 1, AXIS_COLOR);
            fill_rect(image, self.right - length, y, self.right, y + width - 1, AXIS_COLOR);

            if major {
                let label = degree.to_string();
                let label_x = self.left - 8 - i64::from(text_width(&label, scale));
                let label_y = y - i64::from(text_height(scale)) / 2;
                draw_text(image, label_x, label_y, &label, scale, AXIS_COLOR);
            }
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_time_axis(&self, image: &mut RgbaImage, scale: u32) {
        let origin = self.origin.and_utc().timestamp();
        let (low, high) = self.time_range;
        let step = MINOR_TICK_MINUTES * 60;

        let first = (origin as f64 + low) / step as f64;
        let mut tick = first.ceil() as i64 * step;
        while (tick - origin) as f64 <= high {
            let x = self.x_pixel((tick - origin) as f64);
            let major = tick.rem_euclid(MAJOR_TICK_MINUTES * 60) == 0;
            let (length, width) = if major {
                (MAJOR_TICK_LENGTH, MAJOR_TICK_WIDTH)
            } else {
                (MINOR_TICK_LENGTH, MINOR_TICK_WIDTH)
            };

            fill_rect(image, x, self.bottom - length, x + width - 1, self.bottom, AXIS_COLOR);
            fill_rect(image, x, self.top, x + width - 1, self.top + length, AXIS_COLOR);

            if major {
                if let Some(instant) = chrono::DateTime::from_timestamp(tick, 0) {
                    let label = instant.format("%H:%M").to_string();
                    let label_x = x - i64::from(text_width(&label, scale)) / 2;
                    draw_text(image, label_x, self.bottom + 8, &label, scale, AXIS_COLOR);
                }
            }
            tick += step;
        }
    }
}

/// Widens `[low, high]` by the axis margin on each side, or by `fallback` when the span is empty.
fn padded_range(low: f64, high: f64, fallback: f64) -> (f64, f64) {
    let span = high - low;
    if span <= 0.0 {
        return (low - fallback, high + fallback);
    }
    (low - span * AXIS_MARGIN, high + span * AXIS_MARGIN)
}

fn fill_rect(image: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    for y in y0.min(y1)..=y0.max(y1) {
        for x in x0.min(x1)..=x0.max(x1) {
            put_pixel_clipped(image, x, y, color);
        }
    }
}

fn fill_circle(image: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel_clipped(image, cx + dx, cy + dy, color);
            }
        }
    }
}
