//! Classification and view-building benchmarks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use tidewatch::dashboard::{Site, build_view};
use tidewatch::metrics::Metric;
use tidewatch::readings::Readings;

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let cases = [
        (Metric::Tide, "6.0"),
        (Metric::Tide, "DRY"),
        (Metric::Salinity, "24"),
        (Metric::Oxygen, "81.25 %"),
    ];

    for (metric, raw) in cases {
        group.bench_with_input(
            BenchmarkId::new(metric.label(), raw),
            &raw,
            |b, &raw| b.iter(|| metric.table().classify(black_box(raw))),
        );
    }
    group.finish();
}

fn bench_build_view(c: &mut Criterion) {
    let mut readings = Readings::default();
    for (key, value) in [
        ("tide-now", "3.41"),
        ("tide-extreme-1", "5.6"),
        ("tide-extreme-2", "DRY"),
        ("surface-temperature-now", "14.2"),
        ("surface-salinity-now", "31.7"),
        ("tidal-status", "ebb"),
    ] {
        readings.insert(key, value);
    }

    c.bench_function("build_view/galway-bay", |b| {
        b.iter(|| build_view(Site::GalwayBay, black_box(&readings), String::new()));
    });
}

criterion_group!(benches, bench_classify, bench_build_view);
criterion_main!(benches);
