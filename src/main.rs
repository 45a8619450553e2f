use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use eclipse_ephemeris::config::ObservationConfig;
use eclipse_ephemeris::input::read_photo_times;
use eclipse_ephemeris::render::AltitudeAnimation;
use eclipse_ephemeris::{EphemerisTable, RefractionCorrection, Result, Sampler};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// Track the Sun and the Moon through a solar eclipse and animate their altitudes.
///
/// With no flags, reproduces the annular eclipse of 2020 June 21 from Bengaluru.
#[derive(Parser, Debug)]
#[command(name = "eclipse-ephemeris", version)]
struct Cli {
    /// Local date of the observation (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Observer latitude in degrees, positive north
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Observer longitude in degrees, positive east
    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Observer elevation in metres
    #[arg(long, allow_hyphen_values = true)]
    elevation: Option<f64>,

    /// Offset of local clock time from UTC in hours (e.g. 5.5)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<f64>,

    /// First sampled local time (HH:MM:SS)
    #[arg(long)]
    start: Option<NaiveTime>,

    /// Last sampled local time (HH:MM:SS)
    #[arg(long)]
    end: Option<NaiveTime>,

    /// Sampling step in seconds
    #[arg(long, allow_hyphen_values = true)]
    step: Option<i64>,

    /// Photo timestamp table with a `Time` column
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Animated GIF to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the sampled table as CSV
    #[arg(long)]
    table: Option<PathBuf>,

    /// Delay between animation frames in milliseconds
    #[arg(long)]
    frame_delay: Option<u32>,

    /// Animation width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Animation height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Draw the bodies as disks scaled to their angular size
    #[arg(long)]
    disks: bool,

    /// Correct altitudes for atmospheric refraction
    #[arg(long)]
    refraction: bool,

    /// Air pressure in millibars for refraction
    #[arg(long, requires = "refraction")]
    pressure: Option<f64>,

    /// Air temperature in °C for refraction
    #[arg(long, requires = "refraction", allow_hyphen_values = true)]
    temperature: Option<f64>,

    /// Do not read the photo timestamp table
    #[arg(long)]
    skip_photos: bool,
}

impl Cli {
    fn into_config(self) -> Result<ObservationConfig> {
        let defaults = ObservationConfig::default();
        let refraction = if self.refraction {
            let standard = RefractionCorrection::standard();
            Some(RefractionCorrection::new(
                self.pressure.unwrap_or(standard.pressure()),
                self.temperature.unwrap_or(standard.temperature()),
            )?)
        } else {
            None
        };

        let mut render = defaults.render;
        render.width = self.width.unwrap_or(render.width);
        render.height = self.height.unwrap_or(render.height);
        render.frame_delay_ms = self.frame_delay.unwrap_or(render.frame_delay_ms);
        render.draw_disks = self.disks;

        Ok(ObservationConfig {
            date: self.date.unwrap_or(defaults.date),
            latitude: self.latitude.unwrap_or(defaults.latitude),
            longitude: self.longitude.unwrap_or(defaults.longitude),
            elevation: self.elevation.unwrap_or(defaults.elevation),
            utc_offset_hours: self.utc_offset.unwrap_or(defaults.utc_offset_hours),
            window_start: self.start.unwrap_or(defaults.window_start),
            window_end: self.end.unwrap_or(defaults.window_end),
            step_seconds: self.step.unwrap_or(defaults.step_seconds),
            refraction,
            input_path: self.input.unwrap_or(defaults.input_path),
            output_path: self.output.unwrap_or(defaults.output_path),
            table_path: self.table,
            render,
        })
    }
}

fn run(config: &ObservationConfig, skip_photos: bool) -> Result<()> {
    let sampler = Sampler::builtin(config.observer()?).with_refraction(config.refraction);

    if skip_photos {
        info!("skipping photo table");
    } else {
        let photos = read_photo_times(&config.input_path, config.date, config.utc_offset_hours)?;
        let photo_table = EphemerisTable::from_instants(&sampler, photos)?;
        for row in &photo_table {
            info!(
                "photo at {}: PA {:.3}°, separation {:.3}°, sun alt {:.3}°",
                row.ut, row.position_angle, row.separation, row.sun_altitude
            );
        }
    }

    let table = EphemerisTable::sample(&sampler, &config.time_window()?)?;
    if let Some(path) = &config.table_path {
        table.save_csv(path)?;
    }

    if table.is_empty() {
        warn!("sampling window is empty, no animation written");
        return Ok(());
    }

    AltitudeAnimation::from_table(&table, config.utc_offset_hours)?
        .save_gif(&config.output_path, &config.render)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let skip_photos = cli.skip_photos;
    let result = cli.into_config().and_then(|config| run(&config, skip_photos));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
