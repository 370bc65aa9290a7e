//! Intervals and the [`ExonSet`] container.
//!
//! An [`Interval`] is a closed `[start, end]` span on either the natural or the
//! genomic axis. Exons are stored in order in an [`ExonSet`]; that order is the
//! left-to-right order exons are concatenated in on the genomic axis.

use serde::{Deserialize, Serialize};

use crate::{
    error::ExonPlotError,
    traits::{GenericRange, TsvSerialize},
    Position,
};

pub mod operations;
pub mod vec;

pub use vec::ExonSet;

/// A span `[start, end]`, with `start <= end`.
///
/// In JSON an [`Interval`] is a two-element array. A one-element array `[x]` is
/// read as the singleton `[x, x]`, which is what an unpaired exon endpoint
/// turns into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "[Position; 2]")]
pub struct Interval {
    pub start: Position,
    pub end: Position,
}

impl Interval {
    /// Create a new interval. This does not check `start <= end`;
    /// use [`Interval::try_new()`] for that.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a new interval, checking that it is valid.
    pub fn try_new(start: Position, end: Position) -> Result<Self, ExonPlotError> {
        validate_interval(start, end)?;
        Ok(Self { start, end })
    }

    /// A zero-width interval at `position`.
    pub fn singleton(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Whether this interval has zero width.
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }
}

impl GenericRange for Interval {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

impl TsvSerialize for Interval {
    fn to_tsv(&self) -> String {
        let (start, end) = self.as_tuple();
        format!("{}\t{}", start, end)
    }
}

impl TryFrom<Vec<Position>> for Interval {
    type Error = ExonPlotError;

    fn try_from(endpoints: Vec<Position>) -> Result<Self, Self::Error> {
        match endpoints.as_slice() {
            [position] => Ok(Interval::singleton(*position)),
            [start, end] => Interval::try_new(*start, *end),
            _ => Err(ExonPlotError::InvalidIntervalEndpoints(endpoints.len())),
        }
    }
}

impl From<Interval> for [Position; 2] {
    fn from(interval: Interval) -> Self {
        [interval.start, interval.end]
    }
}

/// Validates that `start <= end`. NaN endpoints are invalid too.
pub fn validate_interval(start: Position, end: Position) -> Result<(), ExonPlotError> {
    if start.is_nan() || end.is_nan() || end < start {
        return Err(ExonPlotError::InvalidInterval(start, end));
    }
    Ok(())
}
