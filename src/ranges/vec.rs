use serde::{Deserialize, Serialize};

use crate::{error::ExonPlotError, traits::GenericRange, Position};

use super::{operations::pair_endpoints, validate_interval, Interval};

/// An ordered set of exons for one track.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExonSet {
    pub(crate) ranges: Vec<Interval>,
}

impl ExonSet {
    /// Create a new empty [`ExonSet`] container.
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Build an [`ExonSet`] by sorting endpoints and pairing them up
    /// consecutively; see [`pair_endpoints()`].
    pub fn from_endpoints(mut endpoints: Vec<Position>) -> Self {
        endpoints.sort_by(|a, b| a.total_cmp(b));
        Self {
            ranges: pair_endpoints(&endpoints),
        }
    }

    /// Add a new range to the end of the [`ExonSet`].
    pub fn push_range(&mut self, range: Interval) {
        self.ranges.push(range)
    }

    /// Return the number of exons.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Return whether the [`ExonSet`] is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.ranges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.ranges.iter()
    }

    /// The length `end - start` of each exon, in order.
    pub fn lengths(&self) -> Vec<Position> {
        self.ranges.iter().map(|r| r.width()).collect()
    }

    /// Check that every exon is a valid interval and that exons are sorted
    /// and non-overlapping. Adjacent exons may touch.
    pub fn validate(&self) -> Result<(), ExonPlotError> {
        for range in &self.ranges {
            validate_interval(range.start, range.end)?;
        }
        for (index, pair) in self.ranges.windows(2).enumerate() {
            if pair[1].start < pair[0].end {
                return Err(ExonPlotError::UnsortedExons(index + 1));
            }
        }
        Ok(())
    }
}

impl From<Vec<Interval>> for ExonSet {
    fn from(ranges: Vec<Interval>) -> Self {
        Self { ranges }
    }
}

impl<'a> IntoIterator for &'a ExonSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exons;

    #[test]
    fn test_from_endpoints_sorts_and_pairs() {
        let exons = ExonSet::from_endpoints(vec![250.0, 100.0, 275.0, 150.0]);
        assert_eq!(exons, exons![(100, 150), (250, 275)]);
    }

    #[test]
    fn test_validate_touching_is_ok() {
        let exons = exons![(0, 10), (10, 20)];
        assert!(exons.validate().is_ok());
    }

    #[test]
    fn test_validate_overlap() {
        let exons = exons![(0, 10), (5, 20), (30, 40)];
        assert!(matches!(
            exons.validate(),
            Err(ExonPlotError::UnsortedExons(1))
        ));
    }

    #[test]
    fn test_validate_unsorted() {
        let exons = exons![(100, 110), (0, 10)];
        assert!(matches!(
            exons.validate(),
            Err(ExonPlotError::UnsortedExons(1))
        ));
    }

    #[test]
    fn test_validate_reversed_interval() {
        let exons = exons![(0, 10), (30, 20)];
        assert!(matches!(
            exons.validate(),
            Err(ExonPlotError::InvalidInterval(_, _))
        ));
    }

    #[test]
    fn test_json_round_trip_shape() {
        let exons: ExonSet = serde_json::from_str("[[100, 200], [250, 300], [400]]").unwrap();
        assert_eq!(exons.len(), 3);
        assert_eq!(exons.lengths(), vec![100.0, 50.0, 0.0]);
    }
}
