//! Encoding the altitude animation and decoding it back.

use eclipse_ephemeris::config::ObservationConfig;
use eclipse_ephemeris::render::{AltitudeAnimation, RenderOptions};
use eclipse_ephemeris::{EphemerisTable, Error, Sampler};
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::io::Cursor;

fn small_options() -> RenderOptions {
    RenderOptions {
        width: 240,
        height: 180,
        ..RenderOptions::default()
    }
}

fn default_animation() -> AltitudeAnimation {
    let config = ObservationConfig::default();
    let sampler = Sampler::builtin(config.observer().unwrap());
    let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();
    AltitudeAnimation::from_table(&table, config.utc_offset_hours).unwrap()
}

fn encode(animation: &AltitudeAnimation, options: &RenderOptions) -> Vec<u8> {
    let mut gif = Vec::new();
    animation.write_gif(&mut gif, options).unwrap();
    gif
}

#[test]
fn one_frame_per_sample() {
    let gif = encode(&default_animation(), &small_options());
    let decoder = GifDecoder::new(Cursor::new(gif)).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();

    assert_eq!(frames.len(), 21);
    for frame in &frames {
        assert_eq!(frame.buffer().dimensions(), (240, 180));
        // GIF stores delays in hundredths of a second
        let (numer, denom) = frame.delay().numer_denom_ms();
        let delay_ms = f64::from(numer) / f64::from(denom);
        assert!((20.0..=30.0).contains(&delay_ms), "delay {delay_ms} ms");
    }
}

#[test]
fn animation_loops_forever() {
    let gif = encode(&default_animation(), &small_options());
    assert!(gif.starts_with(b"GIF89a"));
    assert!(gif.windows(11).any(|window| window == b"NETSCAPE2.0"));
}

#[test]
fn frames_differ_as_markers_move() {
    let animation = default_animation();
    let mut frames = animation.frames(&small_options()).unwrap();
    assert_eq!(frames.len(), 21);

    let first = frames.next().unwrap();
    let last = frames.last().unwrap();
    assert_ne!(first, last);
}

#[test]
fn disks_change_the_picture() {
    let animation = default_animation();
    let options = RenderOptions {
        width: 480,
        height: 360,
        ..RenderOptions::default()
    };
    let markers = animation.frames(&options).unwrap().next().unwrap();
    let disks = animation
        .frames(&RenderOptions {
            draw_disks: true,
            ..options
        })
        .unwrap()
        .next()
        .unwrap();
    assert_ne!(markers, disks);
}

#[test]
fn empty_table_has_nothing_to_render() {
    let config = ObservationConfig {
        window_start: chrono::NaiveTime::from_hms_opt(10, 20, 0).unwrap(),
        window_end: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ..ObservationConfig::default()
    };
    let sampler = Sampler::builtin(config.observer().unwrap());
    let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();

    let result = AltitudeAnimation::from_table(&table, config.utc_offset_hours);
    assert!(matches!(result, Err(Error::EmptySeries)));
}

#[test]
fn saves_to_file() {
    let path = std::env::temp_dir().join(format!("eclipse-altitudes-{}.gif", std::process::id()));
    default_animation().save_gif(&path, &small_options()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}
