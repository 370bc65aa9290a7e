//! # exonplot
//!
//! Multi-track exon diagrams. Each track is a set of exons, one or more groups
//! of point traces laid over those exons, and one feature marker per exon.
//!
//! Tracks come either from an external JSON source or from the
//! [`TrackGenerator`](generate::TrackGenerator). They are drawn either in
//! *natural* coordinates (every exon in its own coordinate range) or in
//! *genomic* coordinates, where [`to_genomic_coordinates()`] concatenates exons
//! left-to-right with a fixed [`PADDING`] gap and carries every trace point and
//! feature along with its exon.
//!
//! [`build_figure()`] assembles the result into a [`Figure`] whose JSON form is
//! ready for a Plotly-style charting library.
//!
//! ```
//! use exonplot::prelude::*;
//!
//! let tracks = generate_tracks(3);
//! let figure = build_figure(&tracks, CoordinateMode::Genomic).unwrap();
//! assert_eq!(figure.shapes().len(), 3 * NUM_EXONS);
//! ```
//!
//! [`to_genomic_coordinates()`]: coordinates::to_genomic_coordinates
//! [`build_figure()`]: figure::build_figure
//! [`Figure`]: figure::Figure

pub mod commands;
pub mod coordinates;
pub mod error;
pub mod figure;
pub mod generate;
pub mod io;
pub mod ranges;
pub mod reporting;
pub mod test_utilities;
pub mod track;
pub mod traits;

/// A coordinate on either the natural or the genomic axis.
pub type Position = f64;

/// Number of exons per generated track.
pub const NUM_EXONS: usize = 20;

/// Width of each bucket that one exon endpoint is drawn from.
pub const BUCKET_WIDTH: i64 = 100;

/// Number of points in each generated trace.
pub const POINTS_PER_TRACE: usize = 5;

/// Upper bound on the number of replicate trace groups per generated track.
pub const MAX_REPLICATES: usize = 2;

/// Gap between consecutive exons on the genomic axis.
pub const PADDING: Position = 100.0;

/// Vertical gap between a lane's exon rectangles and its traces.
pub const VERTICAL_PADDING: f64 = 0.2;

/// Figure width, in pixels.
pub const FIGURE_WIDTH: u32 = 1000;

/// Largest figure height the default height rule produces, in pixels.
pub const MAX_HEIGHT: f64 = 1000.0;

/// Create an [`ExonSet`](crate::ranges::ExonSet) from `(start, end)` pairs.
///
/// ```
/// use exonplot::prelude::*;
///
/// let exons = exons![(50, 150), (300, 330)];
/// assert_eq!(exons.len(), 2);
/// assert_eq!(exons.lengths(), vec![100.0, 30.0]);
/// ```
#[macro_export]
macro_rules! exons {
    ($(($start:expr, $end:expr)),* $(,)?) => {
        {
            let mut exons = $crate::ranges::ExonSet::new();
            $(
                exons.push_range($crate::ranges::Interval::new(
                    $start as $crate::Position,
                    $end as $crate::Position,
                ));
            )*
            exons
        }
    };
}

/// Return a [`ExonPlotError::ShapeMismatch`](crate::error::ExonPlotError)
/// early if two lengths differ.
#[macro_export]
macro_rules! ensure_eq {
    ($what:expr, $expected:expr, $found:expr) => {
        if $expected != $found {
            return Err($crate::error::ExonPlotError::ShapeMismatch {
                what: $what.to_string(),
                expected: $expected,
                found: $found,
            });
        }
    };
}

pub mod prelude {
    pub use crate::coordinates::{to_genomic_coordinates, CoordinateMode};
    pub use crate::error::ExonPlotError;
    pub use crate::exons;
    pub use crate::figure::{build_figure, Figure};
    pub use crate::generate::{generate_tracks, GeneratorConfig, TrackGenerator};
    pub use crate::ranges::{ExonSet, Interval};
    pub use crate::track::{FeatureSet, PointSeries, TraceGroup, Track};
    pub use crate::traits::{GenericRange, TsvSerialize};
    pub use crate::{Position, NUM_EXONS, PADDING};
}
