//! Natural to genomic coordinate transformation.
//!
//! In *natural* coordinates every exon, and every trace and feature over it,
//! lives in its own numeric range. In *genomic* coordinates exons are laid end
//! to end from zero with a fixed padding between consecutive exons, and every
//! point keeps its offset from the start of its exon.
//!
//! The transform runs in two passes:
//!
//!  1. *Localize*: express trace and feature `x` values as offsets from their
//!     exon's start.
//!  2. *Stack*: walk the exons in order with a running offset, placing exon
//!     `i` at `[offset, offset + length]` and shifting everything localized to
//!     exon `i` by the same offset, then advance by `length + padding`.
//!
//! Every pass builds new containers; the input [`Track`] is never modified.

use std::{fmt, str::FromStr};

use tracing::debug;

use crate::{
    error::ExonPlotError,
    ranges::{
        operations::{relocate, stacking_offsets},
        ExonSet, Interval,
    },
    track::{FeatureSet, TraceGroup, Track},
    Position, PADDING,
};

/// Which axis a figure is drawn on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordinateMode {
    /// Every exon keeps its own coordinates.
    #[default]
    Natural,
    /// Exons are concatenated on a shared padded axis.
    Genomic,
}

impl CoordinateMode {
    /// The mode selected by a "genomic coordinates" flag.
    pub fn from_flag(genomic_coordinates: bool) -> Self {
        if genomic_coordinates {
            CoordinateMode::Genomic
        } else {
            CoordinateMode::Natural
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinateMode::Natural => write!(f, "natural"),
            CoordinateMode::Genomic => write!(f, "genomic"),
        }
    }
}

impl FromStr for CoordinateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "natural" => Ok(CoordinateMode::Natural),
            "genomic" => Ok(CoordinateMode::Genomic),
            other => Err(format!(
                "unknown coordinate mode '{}' (expected 'natural' or 'genomic')",
                other
            )),
        }
    }
}

/// Express every trace's `x` values as offsets from the start of its exon.
///
/// The first point of each series is its anchor: points are taken relative to
/// the anchor, then shifted by the anchor's distance from the exon start.
/// Empty series stay empty.
pub fn localize_traces(exons: &ExonSet, trace_sets: &[TraceGroup]) -> Vec<TraceGroup> {
    trace_sets
        .iter()
        .map(|group| {
            group
                .iter()
                .zip(exons.iter())
                .map(|(series, exon)| match series.x.first() {
                    Some(&anchor) => series.with_x(
                        series
                            .x
                            .iter()
                            .map(|&x| relocate(x, anchor, exon.start))
                            .collect(),
                    ),
                    None => series.clone(),
                })
                .collect()
        })
        .collect()
}

/// Express every feature's `x` as an offset from the start of its exon.
/// Missing features stay missing.
pub fn localize_features(exons: &ExonSet, features: &FeatureSet) -> FeatureSet {
    let x = features
        .x
        .iter()
        .zip(exons.iter())
        .map(|(x, exon)| x.map(|x| x - exon.start))
        .collect();
    features.with_x(x)
}

/// Stack localized exons, traces and features onto the genomic axis.
///
/// `lengths[i]` is the length of exon `i`; `trace_sets` and `features` must
/// already be localized. Exon spans, each trace group and the features all
/// advance by `lengths[i] + padding` per exon, so everything tied to exon `i`
/// shares exon `i`'s genomic origin.
pub fn stack_exons(
    lengths: &[Position],
    trace_sets: &[TraceGroup],
    features: &FeatureSet,
    padding: Position,
) -> (ExonSet, Vec<TraceGroup>, FeatureSet) {
    let offsets = stacking_offsets(lengths, padding);

    let exons: ExonSet = lengths
        .iter()
        .zip(&offsets)
        .map(|(length, offset)| Interval::new(*offset, offset + length))
        .collect::<Vec<_>>()
        .into();

    let features_x = features
        .x
        .iter()
        .zip(&offsets)
        .map(|(x, offset)| x.map(|x| offset + x))
        .collect();

    let trace_sets = trace_sets
        .iter()
        .map(|group| {
            group
                .iter()
                .zip(&offsets)
                .map(|(series, offset)| {
                    series.with_x(series.x.iter().map(|x| x + offset).collect())
                })
                .collect()
        })
        .collect();

    (exons, trace_sets, features.with_x(features_x))
}

/// Convert a track from natural to genomic coordinates with the default
/// [`PADDING`].
///
/// The track is validated first. A track whose exons are unsorted, overlap, or
/// whose traces or features do not have one entry per exon is rejected.
///
/// ```
/// use exonplot::prelude::*;
/// use exonplot::test_utilities::track_test_case_01;
///
/// let track = track_test_case_01();
/// let genomic = to_genomic_coordinates(&track).unwrap();
/// assert_eq!(genomic.exons.get(0).unwrap().as_tuple(), (0.0, 100.0));
/// assert_eq!(genomic.exons.get(1).unwrap().as_tuple(), (200.0, 230.0));
/// ```
pub fn to_genomic_coordinates(track: &Track) -> Result<Track, ExonPlotError> {
    to_genomic_coordinates_with_padding(track, PADDING)
}

/// Convert a track from natural to genomic coordinates, with `padding`
/// between consecutive exons.
pub fn to_genomic_coordinates_with_padding(
    track: &Track,
    padding: Position,
) -> Result<Track, ExonPlotError> {
    track.validate()?;

    let lengths = track.exons.lengths();
    let local_traces = localize_traces(&track.exons, &track.trace_sets);
    let local_features = localize_features(&track.exons, &track.features);

    let (exons, trace_sets, features) =
        stack_exons(&lengths, &local_traces, &local_features, padding);
    debug!(
        num_exons = exons.len(),
        extent = exons.iter().last().map_or(0.0, |e| e.end),
        "stacked track onto genomic axis"
    );
    Ok(Track::new(exons, trace_sets, features))
}

/// Transform a track for drawing in `mode`. Natural mode returns a validated
/// copy.
pub fn transform_track(
    track: &Track,
    mode: CoordinateMode,
    padding: Position,
) -> Result<Track, ExonPlotError> {
    match mode {
        CoordinateMode::Natural => {
            track.validate()?;
            Ok(track.clone())
        }
        CoordinateMode::Genomic => to_genomic_coordinates_with_padding(track, padding),
    }
}

/// Transform every track for drawing in `mode`. A failure is reported with the
/// index of the offending track.
pub fn transform_tracks(
    tracks: &[Track],
    mode: CoordinateMode,
    padding: Position,
) -> Result<Vec<Track>, ExonPlotError> {
    tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            transform_track(track, mode, padding)
                .map_err(|e| ExonPlotError::InvalidTrack(index, Box::new(e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        exons,
        generate::{GeneratorConfig, TrackGenerator},
        test_utilities::{series, track_test_case_01},
        traits::GenericRange,
    };
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_local_to_global() {
        let exons = exons![(50, 150)];
        let track = Track::new(
            exons,
            vec![vec![series(&[60.0, 70.0, 80.0])]],
            {
                let mut f = FeatureSet::new();
                f.push_feature(75.0, 0.35, "f");
                f
            },
        );
        let genomic = to_genomic_coordinates(&track).unwrap();
        assert_eq!(genomic.exons, exons![(0, 100)]);
        assert_eq!(genomic.trace_sets[0][0].x, vec![10.0, 20.0, 30.0]);
        assert_eq!(genomic.features.x, vec![Some(25.0)]);
    }

    #[test]
    fn test_padding_gap() {
        let (exons, _, _) = stack_exons(&[50.0, 30.0], &[], &FeatureSet::new(), 100.0);
        assert_eq!(exons, exons![(0, 50), (150, 180)]);
    }

    #[test]
    fn test_zero_length_exon_only_adds_padding() {
        let (exons, _, _) = stack_exons(&[50.0, 0.0, 10.0], &[], &FeatureSet::new(), 100.0);
        assert_eq!(exons, exons![(0, 50), (150, 150), (250, 260)]);
    }

    #[test]
    fn test_custom_padding() {
        let track = track_test_case_01();
        let genomic = to_genomic_coordinates_with_padding(&track, 10.0).unwrap();
        assert_eq!(genomic.exons, exons![(0, 100), (110, 140)]);
    }

    #[test]
    fn test_traces_follow_their_exon() {
        let track = track_test_case_01();
        let genomic = to_genomic_coordinates(&track).unwrap();
        // second exon [300, 330] lands at [200, 230]
        assert_eq!(genomic.trace_sets[0][1].x, vec![210.0, 225.0]);
        // display metadata is kept
        assert_eq!(genomic.trace_sets[0][1].name, track.trace_sets[0][1].name);
        assert_eq!(genomic.trace_sets[0][1].y, track.trace_sets[0][1].y);
    }

    #[test]
    fn test_sentinel_propagation() {
        let track = track_test_case_01();
        assert_eq!(track.features.x[1], None);

        let natural = transform_track(&track, CoordinateMode::Natural, PADDING).unwrap();
        assert_eq!(natural.features.x[1], None);

        let genomic = transform_track(&track, CoordinateMode::Genomic, PADDING).unwrap();
        assert_eq!(genomic.features.x, vec![Some(50.0), None]);
        assert_eq!(genomic.features.y[1], None);
        assert_eq!(genomic.features.text[1], None);
    }

    #[test]
    fn test_natural_mode_validates() {
        let mut track = track_test_case_01();
        track.exons = exons![(150, 50), (300, 330)];
        assert!(matches!(
            transform_track(&track, CoordinateMode::Natural, PADDING),
            Err(ExonPlotError::InvalidInterval(..))
        ));

        let mut track = track_test_case_01();
        track.features.y.pop();
        let result = transform_tracks(&[track], CoordinateMode::Natural, PADDING);
        assert!(matches!(result, Err(ExonPlotError::InvalidTrack(0, _))));
    }

    #[test]
    fn test_input_is_not_modified() {
        let track = track_test_case_01();
        let before = track.clone();
        let _ = to_genomic_coordinates(&track).unwrap();
        assert_eq!(track, before);
    }

    #[test]
    fn test_empty_series_stays_empty() {
        let mut track = track_test_case_01();
        track.trace_sets[0][0].x.clear();
        track.trace_sets[0][0].y.clear();
        let genomic = to_genomic_coordinates(&track).unwrap();
        assert!(genomic.trace_sets[0][0].is_empty());
    }

    #[test]
    fn test_anchor_relative_matches_direct_offset() {
        let mut generator =
            TrackGenerator::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(42));
        let track = generator.generate_track(0);
        let local = localize_traces(&track.exons, &track.trace_sets);
        for (group, local_group) in track.trace_sets.iter().zip(&local) {
            for ((series, local_series), exon) in
                group.iter().zip(local_group).zip(track.exons.iter())
            {
                for (x, lx) in series.x.iter().zip(&local_series.x) {
                    assert!((lx - (x - exon.start)).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_counts_preserved_and_monotone() {
        let mut generator =
            TrackGenerator::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(8));
        for track in generator.generate(5) {
            let genomic = to_genomic_coordinates(&track).unwrap();
            assert_eq!(genomic.exons.len(), track.exons.len());
            assert_eq!(genomic.trace_sets.len(), track.trace_sets.len());
            for (g, t) in genomic.trace_sets.iter().zip(&track.trace_sets) {
                assert_eq!(g.len(), t.len());
                for (gs, ts) in g.iter().zip(t) {
                    assert_eq!(gs.len(), ts.len());
                }
            }
            assert_eq!(genomic.features.len(), track.features.len());

            let exons: Vec<_> = genomic.exons.iter().collect();
            assert_eq!(exons[0].start, 0.0);
            for pair in exons.windows(2) {
                assert!((pair[1].start - (pair[0].end + PADDING)).abs() < 1e-9);
            }
            // widths are preserved
            for (g, t) in genomic.exons.iter().zip(track.exons.iter()) {
                assert!((g.width() - t.width()).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let mut track = track_test_case_01();
        track.features.x.pop();
        assert!(matches!(
            to_genomic_coordinates(&track),
            Err(ExonPlotError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_overlapping_exons() {
        let mut track = track_test_case_01();
        track.exons = exons![(50, 150), (100, 130)];
        assert!(matches!(
            to_genomic_coordinates(&track),
            Err(ExonPlotError::UnsortedExons(1))
        ));
    }

    #[test]
    fn test_transform_tracks_reports_index() {
        let good = track_test_case_01();
        let mut bad = track_test_case_01();
        bad.exons = exons![(50, 40), (300, 330)];
        let result = transform_tracks(&[good, bad], CoordinateMode::Genomic, PADDING);
        match result {
            Err(ExonPlotError::InvalidTrack(1, source)) => {
                assert!(matches!(*source, ExonPlotError::InvalidInterval(_, _)))
            }
            other => panic!("expected invalid track 1, got {:?}", other),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("genomic".parse::<CoordinateMode>(), Ok(CoordinateMode::Genomic));
        assert_eq!("Natural".parse::<CoordinateMode>(), Ok(CoordinateMode::Natural));
        assert!("linear".parse::<CoordinateMode>().is_err());
        assert_eq!(CoordinateMode::from_flag(true), CoordinateMode::Genomic);
        assert_eq!(CoordinateMode::Genomic.to_string(), "genomic");
    }
}
