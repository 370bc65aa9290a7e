//! Benchmarks for track generation, the genomic coordinate transform, and
//! figure assembly.

use criterion::{criterion_group, criterion_main, Criterion};
use exonplot::{
    coordinates::to_genomic_coordinates, figure::build_figure, prelude::CoordinateMode,
    test_utilities::random_tracks,
};

const NUM_TRACKS: usize = 20;

fn bench_transform(c: &mut Criterion) {
    // create the benchmark group
    let mut group = c.benchmark_group("exonplot");

    // create the test data
    let tracks = random_tracks(NUM_TRACKS, 1);

    group.bench_function("generate", |b| {
        b.iter(|| random_tracks(NUM_TRACKS, 2).len());
    });

    group.bench_function("to_genomic_coordinates", |b| {
        b.iter(|| {
            tracks
                .iter()
                .map(|track| to_genomic_coordinates(track).unwrap().num_exons())
                .sum::<usize>()
        });
    });

    group.bench_function("build_figure_genomic", |b| {
        b.iter(|| {
            build_figure(&tracks, CoordinateMode::Genomic)
                .unwrap()
                .series
                .len()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transform,);
criterion_main!(benches);
