use chrono::{DateTime, TimeDelta, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use eclipse_ephemeris::config::{ObservationConfig, TimeWindow};
use eclipse_ephemeris::render::{AltitudeAnimation, RenderOptions};
use eclipse_ephemeris::{EphemerisTable, Observer, RefractionCorrection, Sampler};
use std::hint::black_box;

fn bengaluru() -> Observer {
    Observer::new(12.9352, 77.6245, 0.0).unwrap()
}

fn benchmark_single_row(c: &mut Criterion) {
    let instant = "2020-06-21T06:15:00Z".parse::<DateTime<Utc>>().unwrap();
    let plain = Sampler::builtin(bengaluru());
    let refracted = Sampler::builtin(bengaluru()).with_refraction(Some(RefractionCorrection::standard()));

    c.bench_function("row_at", |b| b.iter(|| plain.row_at(black_box(instant)).unwrap()));
    c.bench_function("row_at_refracted", |b| {
        b.iter(|| refracted.row_at(black_box(instant)).unwrap())
    });
}

fn benchmark_sampling_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling_window");

    let start = "2020-06-21T03:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let sampler = Sampler::builtin(bengaluru());

    // One minute steps over 20 minutes, 4 hours and a full day
    for &minutes in &[20i64, 240, 1440] {
        group.throughput(Throughput::Elements(minutes as u64 + 1));
        let end = start + TimeDelta::try_minutes(minutes).unwrap();
        let window = TimeWindow::new(start, end, 60).unwrap();

        group.bench_with_input(BenchmarkId::new("sample", minutes), &window, |b, window| {
            b.iter(|| EphemerisTable::sample(&sampler, black_box(window)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.sample_size(10);

    let config = ObservationConfig::default();
    let sampler = Sampler::builtin(config.observer().unwrap());
    let table = EphemerisTable::sample(&sampler, &config.time_window().unwrap()).unwrap();
    let animation = AltitudeAnimation::from_table(&table, config.utc_offset_hours).unwrap();

    for &(width, height) in &[(320u32, 240u32), (1200, 900)] {
        let options = RenderOptions {
            width,
            height,
            ..RenderOptions::default()
        };
        let label = format!("{width}x{height}");

        group.bench_with_input(BenchmarkId::new("frames", &label), &options, |b, options| {
            b.iter(|| animation.frames(black_box(options)).unwrap().count())
        });
        group.bench_with_input(BenchmarkId::new("gif", &label), &options, |b, options| {
            b.iter(|| {
                let mut gif = Vec::new();
                animation.write_gif(&mut gif, black_box(options)).unwrap();
                gif
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_row,
    benchmark_sampling_window,
    benchmark_rendering
);
criterion_main!(benches);
