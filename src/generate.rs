//! Synthetic track generation.
//!
//! [`TrackGenerator`] builds structurally valid random [`Track`]s: sorted exons
//! drawn from consecutive buckets, one to [`MAX_REPLICATES`] trace groups laid
//! above the exons, and one feature per exon. Values are random, shapes are
//! not; the generator is used for demos, tests and benchmarks.
//!
//! ```
//! use exonplot::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut generator = TrackGenerator::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(7));
//! let tracks = generator.generate(2);
//! assert_eq!(tracks.len(), 2);
//! assert!(tracks.iter().all(|t| t.validate().is_ok()));
//! ```

use rand::{rngs::ThreadRng, thread_rng, Rng};
use tracing::debug;

use crate::{
    error::ExonPlotError,
    ranges::ExonSet,
    track::{FeatureSet, Marker, PointSeries, TraceGroup, Track},
    Position, BUCKET_WIDTH, MAX_REPLICATES, NUM_EXONS, POINTS_PER_TRACE, VERTICAL_PADDING,
};

/// Colors for trace groups, by replicate index.
pub const COLORSCALE: [&str; 8] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
];

/// Hover text of every generated feature.
pub const FEATURE_TEXT: &str = "An interesting<br>observation here";

/// Marker size of generated traces.
pub const TRACE_MARKER_SIZE: f64 = 4.0;

// Generated floats keep this many decimal places.
const DECIMALS: i32 = 4;

/// Knobs for [`TrackGenerator`].
///
/// Built with [`GeneratorConfig::new`] or [`Default`]; the fields are private
/// so that every configuration has been validated.
///
/// ```compile_fail
/// use exonplot::prelude::*;
///
/// let config = GeneratorConfig {
///     feature_omit_probability: 2.0,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    num_exons: usize,
    points_per_trace: usize,
    max_replicates: usize,
    feature_omit_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_exons: NUM_EXONS,
            points_per_trace: POINTS_PER_TRACE,
            max_replicates: MAX_REPLICATES,
            feature_omit_probability: 0.0,
        }
    }
}

impl GeneratorConfig {
    /// Build a configuration from possibly negative user input.
    pub fn new(
        num_exons: i64,
        points_per_trace: i64,
        max_replicates: i64,
        feature_omit_probability: f64,
    ) -> Result<Self, ExonPlotError> {
        if !(0.0..=1.0).contains(&feature_omit_probability) {
            return Err(ExonPlotError::InvalidProbability(feature_omit_probability));
        }
        let max_replicates = checked_count("replicate", max_replicates)?;
        Ok(Self {
            num_exons: checked_count("exon", num_exons)?,
            points_per_trace: checked_count("sample point", points_per_trace)?,
            // there is always at least one replicate
            max_replicates: max_replicates.max(1),
            feature_omit_probability,
        })
    }
}

impl GeneratorConfig {
    /// Exons per track.
    pub fn num_exons(&self) -> usize {
        self.num_exons
    }

    /// Points per trace.
    pub fn points_per_trace(&self) -> usize {
        self.points_per_trace
    }

    /// Each track gets between 1 and this many trace groups.
    pub fn max_replicates(&self) -> usize {
        self.max_replicates
    }

    /// Chance that an exon gets the "no feature" sentinel instead of a feature.
    pub fn feature_omit_probability(&self) -> f64 {
        self.feature_omit_probability
    }
}

/// Convert a signed count into a `usize`, rejecting negative values.
pub fn checked_count(what: &'static str, value: i64) -> Result<usize, ExonPlotError> {
    usize::try_from(value).map_err(|_| ExonPlotError::InvalidCount(what, value))
}

fn round_to_decimals(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    (value * scale).round() / scale
}

/// Random [`Track`] generator.
pub struct TrackGenerator<R: Rng> {
    config: GeneratorConfig,
    rng: R,
}

impl TrackGenerator<ThreadRng> {
    /// A generator drawing from the thread-local random source.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            rng: thread_rng(),
        }
    }
}

impl<R: Rng> TrackGenerator<R> {
    /// A generator drawing from `rng`, e.g. a seeded `StdRng`.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate `num_tracks` tracks. Track `i` occupies lane `i`.
    pub fn generate(&mut self, num_tracks: usize) -> Vec<Track> {
        debug!(
            num_tracks,
            num_exons = self.config.num_exons,
            "generating random tracks"
        );
        (0..num_tracks).map(|level| self.generate_track(level)).collect()
    }

    /// Generate the track for lane `level`.
    pub fn generate_track(&mut self, level: usize) -> Track {
        let exons = self.generate_exons();
        let num_groups = self.rng.gen_range(1..=self.config.max_replicates.max(1));
        let trace_sets = (0..num_groups)
            .map(|group| self.generate_traces(&exons, group, level))
            .collect();
        let features = self.generate_features(&exons, level);
        Track::new(exons, trace_sets, features)
    }

    /// Draw one endpoint from each of `2 * num_exons` consecutive buckets, then
    /// sort and pair them.
    pub fn generate_exons(&mut self) -> ExonSet {
        let endpoints: Vec<Position> = (0..2 * self.config.num_exons as i64)
            .map(|i| {
                let bucket_start = i * BUCKET_WIDTH;
                self.rng.gen_range(bucket_start..bucket_start + BUCKET_WIDTH) as Position
            })
            .collect();
        ExonSet::from_endpoints(endpoints)
    }

    /// One [`PointSeries`] per exon for replicate `group` of lane `level`.
    pub fn generate_traces(&mut self, exons: &ExonSet, group: usize, level: usize) -> TraceGroup {
        let label = format!("Sample {}, {}", level, group);
        let y_min = 0.5 + level as f64 + VERTICAL_PADDING;
        let y_max = 1.0 + level as f64;
        let color = COLORSCALE[group % COLORSCALE.len()];

        exons
            .iter()
            .enumerate()
            .map(|(i, exon)| {
                let mut x: Vec<Position> = (0..self.config.points_per_trace)
                    .map(|_| self.uniform(exon.start, exon.end))
                    .collect();
                x.sort_by(|a, b| a.total_cmp(b));
                let y = (0..self.config.points_per_trace)
                    .map(|_| self.uniform(y_min, y_max))
                    .collect();
                PointSeries {
                    x,
                    y,
                    marker: Marker {
                        size: TRACE_MARKER_SIZE,
                        color: color.to_string(),
                    },
                    legendgroup: label.clone(),
                    name: label.clone(),
                    showlegend: i == 0,
                }
            })
            .collect()
    }

    /// One feature per exon for lane `level`, or the sentinel with probability
    /// `feature_omit_probability`. Only lane 0 shows a legend entry.
    pub fn generate_features(&mut self, exons: &ExonSet, level: usize) -> FeatureSet {
        let y = 0.25 + level as f64 + VERTICAL_PADDING / 2.0;
        let mut features = FeatureSet::new();
        for exon in exons {
            if self.rng.gen_bool(self.config.feature_omit_probability) {
                features.push_missing();
            } else {
                let x = self.uniform(exon.start, exon.end);
                features.push_feature(x, y, FEATURE_TEXT);
            }
        }
        if level != 0 {
            features.showlegend = Some(false);
        }
        features
    }

    // Uniform in [low, high), or `low` for an empty range.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        round_to_decimals(self.rng.gen_range(low..high))
    }
}

/// Generate `num_tracks` tracks with the default configuration and the
/// thread-local random source.
pub fn generate_tracks(num_tracks: usize) -> Vec<Track> {
    TrackGenerator::new(GeneratorConfig::default()).generate(num_tracks)
}
