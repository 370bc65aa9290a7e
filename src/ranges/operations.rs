//! Range Operations.
//!
//! - [`pair_endpoints()`]: turn sorted endpoints into intervals.
//! - [`stacking_offsets()`]: where each exon starts on the genomic axis.
//! - [`relocate()`]: move a point from one exon origin to another.

use crate::Position;

use super::Interval;

/// Pair sorted endpoints consecutively into intervals, e.g.
/// `[100, 150, 250, 275]` becomes `[100, 150], [250, 275]`.
///
/// An odd number of endpoints leaves the last one unpaired; it becomes a
/// singleton interval.
pub fn pair_endpoints(endpoints: &[Position]) -> Vec<Interval> {
    endpoints
        .chunks(2)
        .map(|pair| match pair {
            [start, end] => Interval::new(*start, *end),
            [position] => Interval::singleton(*position),
            _ => unreachable!("chunks(2) yields one or two elements"),
        })
        .collect()
}

/// The genomic start of each exon, given the exon lengths: exon `i` starts at
/// the sum of all previous lengths plus `padding` per previous exon.
pub fn stacking_offsets(lengths: &[Position], padding: Position) -> Vec<Position> {
    let mut cumulative = 0.0;
    lengths
        .iter()
        .map(|length| {
            let offset = cumulative;
            cumulative += length + padding;
            offset
        })
        .collect()
}

/// Re-express `x` relative to `anchor`, then shift by `anchor`'s own
/// distance from `origin`. Equal to `x - origin` up to rounding.
pub fn relocate(x: Position, anchor: Position, origin: Position) -> Position {
    let distance_to_origin = anchor - origin;
    (x - anchor) + distance_to_origin
}
