//! Tracks and the data drawn on them.
//!
//! A [`Track`] is one lane of the diagram: its [`ExonSet`], any number of
//! [`TraceGroup`]s (one [`PointSeries`] per exon each), and a [`FeatureSet`]
//! with one marker per exon. Field names follow the JSON the charting library
//! expects, so a [`PointSeries`] or [`FeatureSet`] serializes directly as a
//! plot trace.

use serde::{Deserialize, Serialize};

use crate::{ensure_eq, error::ExonPlotError, ranges::ExonSet, Position};

/// Marker style for a [`PointSeries`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: f64,
    pub color: String,
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            size: 4.0,
            color: "#e41a1c".to_string(),
        }
    }
}

/// One trace: a named sequence of `(x, y)` points drawn over a single exon.
///
/// Only `x` and `y` are required in JSON input; the display fields fall back
/// to their defaults, so bare `{"x": [...], "y": [...]}` traces are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub x: Vec<Position>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub marker: Marker,
    #[serde(default)]
    pub legendgroup: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub showlegend: bool,
}

impl PointSeries {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// A copy of this series with new `x` values and everything else kept.
    pub fn with_x(&self, x: Vec<Position>) -> Self {
        Self { x, ..self.clone() }
    }
}

/// A replicate: one [`PointSeries`] per exon, sharing a legend group.
pub type TraceGroup = Vec<PointSeries>;

/// Outline of a feature marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub width: f64,
}

/// Marker style for a [`FeatureSet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureMarker {
    pub symbol: String,
    pub size: f64,
    pub line: MarkerLine,
    pub color: String,
}

impl Default for FeatureMarker {
    fn default() -> Self {
        Self {
            symbol: "star".to_string(),
            size: 6.0,
            line: MarkerLine { width: 0.5 },
            color: "red".to_string(),
        }
    }
}

/// One feature marker per exon, stored as parallel `x`, `y`, `text` columns.
///
/// `None` marks an exon without a feature; it serializes as `null`, which the
/// charting library skips. Missing JSON fields take their [`Default`] values,
/// so `{"x": [...], "y": [...], "text": [...]}` is enough as input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureSet {
    pub x: Vec<Option<Position>>,
    pub y: Vec<Option<f64>>,
    pub text: Vec<Option<String>>,
    pub legendgroup: String,
    pub name: String,
    pub mode: String,
    pub marker: FeatureMarker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            text: Vec::new(),
            legendgroup: "Features".to_string(),
            name: "Show Feature".to_string(),
            mode: "markers".to_string(),
            marker: FeatureMarker::default(),
            showlegend: None,
        }
    }
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature for the next exon.
    pub fn push_feature(&mut self, x: Position, y: f64, text: impl Into<String>) {
        self.x.push(Some(x));
        self.y.push(Some(y));
        self.text.push(Some(text.into()));
    }

    /// Mark the next exon as having no feature.
    pub fn push_missing(&mut self) {
        self.x.push(None);
        self.y.push(None);
        self.text.push(None);
    }

    /// Number of entries, present or missing.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of exons that actually have a feature.
    pub fn num_present(&self) -> usize {
        self.x.iter().filter(|x| x.is_some()).count()
    }

    /// A copy of this feature set with new `x` values and everything else kept.
    pub fn with_x(&self, x: Vec<Option<Position>>) -> Self {
        Self { x, ..self.clone() }
    }

    /// Check that `x`, `y` and `text` all have `num_exons` entries, and that
    /// each entry is either fully present or fully missing.
    pub fn validate(&self, num_exons: usize) -> Result<(), ExonPlotError> {
        ensure_eq!("features.x", num_exons, self.x.len());
        ensure_eq!("features.y", num_exons, self.y.len());
        ensure_eq!("features.text", num_exons, self.text.len());
        let columns = self.x.iter().zip(&self.y).zip(&self.text);
        for (index, ((x, y), text)) in columns.enumerate() {
            if x.is_some() != y.is_some() || x.is_some() != text.is_some() {
                return Err(ExonPlotError::PartialFeature(index));
            }
        }
        Ok(())
    }
}

/// One lane of the diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub exons: ExonSet,
    #[serde(rename = "traceSets")]
    pub trace_sets: Vec<TraceGroup>,
    pub features: FeatureSet,
}

impl Track {
    pub fn new(exons: ExonSet, trace_sets: Vec<TraceGroup>, features: FeatureSet) -> Self {
        Self {
            exons,
            trace_sets,
            features,
        }
    }

    /// Number of exons.
    pub fn num_exons(&self) -> usize {
        self.exons.len()
    }

    /// Number of [`PointSeries`] across all trace groups.
    pub fn num_series(&self) -> usize {
        self.trace_sets.iter().map(|group| group.len()).sum()
    }

    /// Check the track's invariants: exons are valid, sorted and
    /// non-overlapping; every trace group and the feature columns have one
    /// entry per exon; every series has as many `y` values as `x` values.
    pub fn validate(&self) -> Result<(), ExonPlotError> {
        self.exons.validate()?;
        let num_exons = self.exons.len();
        for (index, group) in self.trace_sets.iter().enumerate() {
            ensure_eq!(format!("trace group {}", index), num_exons, group.len());
            for (i, series) in group.iter().enumerate() {
                ensure_eq!(
                    format!("trace group {} series {}", index, i),
                    series.x.len(),
                    series.y.len()
                );
            }
        }
        self.features.validate(num_exons)
    }
}
