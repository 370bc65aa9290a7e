//! Test cases and test utility functions.
//!

use rand::{rngs::StdRng, SeedableRng};
use tempfile::{Builder, NamedTempFile};

use crate::{
    exons,
    generate::{GeneratorConfig, TrackGenerator},
    track::{FeatureSet, Marker, PointSeries, Track},
    Position,
};

/// A [`PointSeries`] with the given `x` values and flat `y`.
pub fn series(x: &[Position]) -> PointSeries {
    PointSeries {
        x: x.to_vec(),
        y: vec![0.8; x.len()],
        marker: Marker {
            size: 4.0,
            color: "#e41a1c".to_string(),
        },
        legendgroup: "Sample 0, 0".to_string(),
        name: "Sample 0, 0".to_string(),
        showlegend: true,
    }
}

/// A small hand-made track: exons `[50, 150]` and `[300, 330]`, one trace
/// group, and a feature on the first exon only.
pub fn track_test_case_01() -> Track {
    let exons = exons![(50, 150), (300, 330)];
    let mut second = series(&[310.0, 325.0]);
    second.showlegend = false;
    let trace_sets = vec![vec![series(&[60.0, 70.0, 80.0]), second]];

    let mut features = FeatureSet::new();
    features.push_feature(100.0, 0.35, "feature");
    features.push_missing();

    Track::new(exons, trace_sets, features)
}

/// `n` random tracks from a seeded generator with the default configuration.
pub fn random_tracks(n: usize, seed: u64) -> Vec<Track> {
    TrackGenerator::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(seed)).generate(n)
}

/// Create a temporary file with the given suffix, e.g. `.json` or `.json.gz`.
pub fn temp_file(suffix: &str) -> NamedTempFile {
    Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("could not create temporary file")
}

/// Create a temporary JSON file.
pub fn temp_jsonfile() -> NamedTempFile {
    temp_file(".json")
}

/// Write `tracks` to a temporary JSON file.
pub fn tracks_jsonfile(tracks: &[Track]) -> NamedTempFile {
    let file = temp_jsonfile();
    serde_json::to_writer(file.as_file(), tracks).expect("could not write tracks");
    file
}
