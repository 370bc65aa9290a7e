//! The [`ExonPlotError`] `enum` definition and error messages.
//!
use crate::Position;
use thiserror::Error;

/// The [`ExonPlotError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum ExonPlotError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // Invalid interval errors
    #[error("Interval invalid: end ({1}) must not be less than start ({0})")]
    InvalidInterval(Position, Position),
    #[error("Interval must have one or two endpoints, found {0}")]
    InvalidIntervalEndpoints(usize),
    #[error("Exon {0} starts before the previous exon ends; exons must be sorted and non-overlapping")]
    UnsortedExons(usize),

    // Track shape errors
    #[error("Shape mismatch in {what}: expected {expected} entries, found {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Feature {0} is partially missing: x, y and text must be all present or all null")]
    PartialFeature(usize),
    #[error("Track {0} is invalid: {1}")]
    InvalidTrack(usize, #[source] Box<ExonPlotError>),

    // Generator configuration errors
    #[error("Invalid {0} count: {1} (must not be negative)")]
    InvalidCount(&'static str, i64),
    #[error("Invalid probability: {0} (must be in [0, 1])")]
    InvalidProbability(f64),

    // Command line tool related errors
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
}
