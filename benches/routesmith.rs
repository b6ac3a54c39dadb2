use criterion::{Criterion, criterion_group, criterion_main};
use routesmith::{
    path::Path,
    schedule::{FrequencySpec, StopTimeBaseline, expand},
    shared::{Coordinate, Time, cumulative},
};
use std::hint::black_box;

fn long_path() -> Path {
    (0..10_000)
        .map(|i| {
            let step = i as f64 * 0.0005;
            Coordinate::new(59.196_198 + step, 17.628_841 + step / 2.0)
        })
        .collect()
}

fn long_trip() -> Vec<StopTimeBaseline> {
    (0..60)
        .map(|i| {
            let arrival = Time::from_minutes(300 + i * 3);
            let departure = Time::from_minutes(300 + i * 3 + 1);
            StopTimeBaseline::new(format!("S{i}"), format!("Stop {i}"), arrival, departure)
                .expect("valid baseline")
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let path = long_path();
    let coordinates: Vec<Coordinate> = path.coordinates().copied().collect();
    let trip = long_trip();
    let frequency = FrequencySpec::uniform(5);

    let mut group = c.benchmark_group("Synthesis");

    group.bench_function("Cumulative distance 10k", |b| {
        b.iter(|| cumulative(black_box(&coordinates)))
    });

    group.bench_function("Finalize 10k", |b| {
        b.iter(|| black_box(&path).finalize("bench"))
    });

    group.bench_function("Expand 60 stops every 5 min", |b| {
        b.iter(|| expand(black_box(&trip), black_box(&frequency)))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
