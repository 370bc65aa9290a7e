//! Figure assembly.
//!
//! A [`Figure`] is everything a Plotly-style charting library needs to draw the
//! diagram: a flat list of drawable series (`data`) and a [`Layout`] holding
//! one rectangle [`Shape`] per exon plus fixed axis and margin settings.
//!
//! Track `k` is drawn in lane `k`: its exon rectangles span `[k + 0.2, k + 0.5]`
//! vertically, with its features at `k + 0.35` and its traces above
//! `k + 0.7`.

use serde::Serialize;
use tracing::info;

use crate::{
    coordinates::{transform_tracks, CoordinateMode},
    error::ExonPlotError,
    track::{FeatureSet, PointSeries, Track},
    Position, FIGURE_WIDTH, MAX_HEIGHT, PADDING, VERTICAL_PADDING,
};

/// Fill color of exon rectangles.
pub const EXON_FILL_COLOR: &str = "rgba(55, 128, 191, 0.4)";

/// Height used until the caller sets one.
pub const DEFAULT_HEIGHT: f64 = 500.0;

/// One entry of the figure's `data` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Drawable {
    Trace(PointSeries),
    Features(FeatureSet),
}

/// Outline style of a [`Shape`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Line {
    pub width: f64,
}

/// A filled rectangle in data coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x0: Position,
    pub x1: Position,
    pub y0: f64,
    pub y1: f64,
    pub line: Line,
    pub fillcolor: String,
}

impl Shape {
    /// The rectangle for an exon spanning `[start, end]` in lane `lane`.
    pub fn exon(start: Position, end: Position, lane: usize) -> Self {
        let lane = lane as f64;
        Self {
            kind: "rect",
            xref: "x",
            yref: "y",
            x0: start,
            x1: end,
            y0: lane + VERTICAL_PADDING,
            y1: lane + 0.5,
            line: Line { width: 0.5 },
            fillcolor: EXON_FILL_COLOR.to_string(),
        }
    }
}

/// Axis settings; every decoration is turned off.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub zeroline: bool,
    pub showline: bool,
    pub showgrid: bool,
    pub ticks: String,
    pub showticklabels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixedrange: Option<bool>,
}

impl Axis {
    fn hidden() -> Self {
        Self {
            zeroline: false,
            showline: false,
            showgrid: false,
            ticks: String::new(),
            showticklabels: false,
            fixedrange: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Margin {
    pub t: f64,
    pub l: f64,
    pub r: f64,
    pub b: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    pub shapes: Vec<Shape>,
    pub width: u32,
    pub hovermode: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub margin: Margin,
    pub height: f64,
}

impl Layout {
    /// The fixed layout around `shapes`.
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            width: FIGURE_WIDTH,
            hovermode: "closest".to_string(),
            xaxis: Axis::hidden(),
            yaxis: Axis {
                fixedrange: Some(true),
                ..Axis::hidden()
            },
            margin: Margin {
                t: 0.0,
                l: 0.0,
                r: 0.0,
                b: 0.0,
            },
            height: DEFAULT_HEIGHT,
        }
    }
}

/// A render-ready figure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Figure {
    #[serde(rename = "data")]
    pub series: Vec<Drawable>,
    pub layout: Layout,
}

impl Figure {
    /// The exon rectangles.
    pub fn shapes(&self) -> &[Shape] {
        &self.layout.shapes
    }

    /// Set the layout height, consuming and returning the figure.
    pub fn with_height(mut self, height: f64) -> Self {
        self.layout.height = height;
        self
    }

    /// Serialize to the JSON object the charting library consumes.
    pub fn to_json(&self) -> Result<String, ExonPlotError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Height of a figure with `num_tracks` lanes: `MAX_HEIGHT / (12 - n)`, with
/// `n` clamped to `[1, 11]` so the height stays positive and finite.
pub fn default_height(num_tracks: usize) -> f64 {
    let n = num_tracks.clamp(1, 11) as f64;
    MAX_HEIGHT / (12.0 - n)
}

/// Build a figure from `tracks`, drawn in `mode` with the default [`PADDING`].
///
/// ```
/// use exonplot::prelude::*;
/// use exonplot::test_utilities::track_test_case_01;
///
/// let tracks = vec![track_test_case_01(), track_test_case_01()];
/// let figure = build_figure(&tracks, CoordinateMode::Natural).unwrap();
/// // per track: one trace series per exon, plus one feature series
/// assert_eq!(figure.series.len(), 2 * (2 + 1));
/// assert_eq!(figure.shapes().len(), 2 * 2);
/// ```
pub fn build_figure(tracks: &[Track], mode: CoordinateMode) -> Result<Figure, ExonPlotError> {
    build_figure_with_padding(tracks, mode, PADDING)
}

/// Build a figure from `tracks`, drawn in `mode` with `padding` between exons
/// in genomic mode.
pub fn build_figure_with_padding(
    tracks: &[Track],
    mode: CoordinateMode,
    padding: Position,
) -> Result<Figure, ExonPlotError> {
    let tracks = transform_tracks(tracks, mode, padding)?;

    let mut series = Vec::new();
    let mut shapes = Vec::new();
    for (lane, track) in tracks.into_iter().enumerate() {
        for exon in &track.exons {
            shapes.push(Shape::exon(exon.start, exon.end, lane));
        }
        series.extend(track.trace_sets.into_iter().flatten().map(Drawable::Trace));
        series.push(Drawable::Features(track.features));
    }

    info!(
        %mode,
        num_series = series.len(),
        num_shapes = shapes.len(),
        "built figure"
    );
    Ok(Figure {
        series,
        layout: Layout::new(shapes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        exons,
        generate::{GeneratorConfig, TrackGenerator},
        test_utilities::track_test_case_01,
        NUM_EXONS, POINTS_PER_TRACE,
    };
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_series_and_shape_counts() {
        let mut generator =
            TrackGenerator::with_rng(GeneratorConfig::default(), StdRng::seed_from_u64(17));
        let tracks = generator.generate(4);
        let expected: usize = tracks
            .iter()
            .map(|t| NUM_EXONS * t.trace_sets.len() + 1)
            .sum();

        for mode in [CoordinateMode::Natural, CoordinateMode::Genomic] {
            let figure = build_figure(&tracks, mode).unwrap();
            assert_eq!(figure.series.len(), expected);
            assert_eq!(figure.shapes().len(), 4 * NUM_EXONS);
        }
    }

    #[test]
    fn test_fixed_replicate_count() {
        let config =
            GeneratorConfig::new(NUM_EXONS as i64, POINTS_PER_TRACE as i64, 1, 0.0).unwrap();
        let mut generator = TrackGenerator::with_rng(config, StdRng::seed_from_u64(2));
        let tracks = generator.generate(3);
        let figure = build_figure(&tracks, CoordinateMode::Genomic).unwrap();
        assert_eq!(figure.series.len(), 3 * (20 + 1));
    }

    #[test]
    fn test_shapes_in_lanes() {
        let tracks = vec![track_test_case_01(), track_test_case_01()];
        let figure = build_figure(&tracks, CoordinateMode::Natural).unwrap();
        let shapes = figure.shapes();

        assert_eq!((shapes[0].x0, shapes[0].x1), (50.0, 150.0));
        assert_eq!((shapes[0].y0, shapes[0].y1), (0.2, 0.5));
        assert_eq!((shapes[2].y0, shapes[2].y1), (1.2, 1.5));
        assert!(shapes.iter().all(|s| s.kind == "rect"));
        assert!(shapes.iter().all(|s| s.fillcolor == EXON_FILL_COLOR));
    }

    #[test]
    fn test_genomic_shapes() {
        let figure = build_figure(&[track_test_case_01()], CoordinateMode::Genomic).unwrap();
        let spans: Vec<_> = figure.shapes().iter().map(|s| (s.x0, s.x1)).collect();
        assert_eq!(spans, vec![(0.0, 100.0), (200.0, 230.0)]);
    }

    #[test]
    fn test_series_order() {
        let figure = build_figure(&[track_test_case_01()], CoordinateMode::Natural).unwrap();
        assert!(matches!(figure.series[0], Drawable::Trace(_)));
        assert!(matches!(figure.series[1], Drawable::Trace(_)));
        assert!(matches!(figure.series[2], Drawable::Features(_)));
    }

    #[test]
    fn test_invalid_track_aborts() {
        let mut bad = track_test_case_01();
        bad.exons = exons![(0, 10)];
        let result = build_figure(&[track_test_case_01(), bad], CoordinateMode::Genomic);
        assert!(matches!(result, Err(ExonPlotError::InvalidTrack(1, _))));
    }

    #[test]
    fn test_empty_figure() {
        let figure = build_figure(&[], CoordinateMode::Genomic).unwrap();
        assert!(figure.series.is_empty());
        assert!(figure.shapes().is_empty());
    }

    #[test]
    fn test_json_layout() {
        let figure = build_figure(&[track_test_case_01()], CoordinateMode::Natural)
            .unwrap()
            .with_height(250.0);
        let json: serde_json::Value = serde_json::from_str(&figure.to_json().unwrap()).unwrap();

        assert_eq!(json["data"].as_array().unwrap().len(), 3);
        assert_eq!(json["data"][2]["mode"], "markers");
        assert_eq!(json["data"][2]["x"][1], serde_json::Value::Null);
        assert_eq!(json["data"][0]["showlegend"], true);
        assert_eq!(json["layout"]["width"], 1000);
        assert_eq!(json["layout"]["height"], 250.0);
        assert_eq!(json["layout"]["hovermode"], "closest");
        assert_eq!(json["layout"]["shapes"][0]["type"], "rect");
        assert_eq!(json["layout"]["yaxis"]["fixedrange"], true);
        assert!(json["layout"]["xaxis"].get("fixedrange").is_none());
        assert_eq!(json["layout"]["margin"]["t"], 0.0);
    }

    #[test]
    fn test_default_height() {
        assert!((default_height(10) - 500.0).abs() < 1e-9);
        assert!((default_height(1) - 1000.0 / 11.0).abs() < 1e-9);
        assert_eq!(default_height(11), MAX_HEIGHT);
        assert_eq!(default_height(20), MAX_HEIGHT);
        assert_eq!(default_height(0), default_height(1));
    }
}
