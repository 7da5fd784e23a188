//! Per-dimension sorted index.
//!
//! One ordered multi-map `value → point` per dimension, built once from the
//! [`Dataset`] before any traversal and read-only afterwards. Entries are kept
//! in a flat sorted vector; ranges are resolved with binary search.

use crate::data::dataset::{Dataset, PointId, Preference};
use itertools::Either;

/// Sorted `(value, point)` entries of one dimension.
///
/// Ties on the value are ordered by point id.
#[derive(Clone, Debug)]
pub struct DimensionIndex {
    entries: Vec<(f64, PointId)>,
}

impl DimensionIndex {
    /// Index dimension `dim` of `dataset`.
    pub fn build(dataset: &Dataset, dim: usize) -> Self {
        let mut entries: Vec<(f64, PointId)> = dataset
            .column(dim)
            .iter()
            .enumerate()
            .map(|(p, &v)| (v, PointId::new(p)))
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Self { entries }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Smallest value of the dimension.
    #[inline]
    pub fn min(&self) -> f64 {
        self.entries[0].0
    }

    /// Largest value of the dimension.
    #[inline]
    pub fn max(&self) -> f64 {
        self.entries[self.entries.len() - 1].0
    }

    /// Domain size, `max - min`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max() - self.min()
    }

    /// Entries whose value lies in `[lo, hi]`.
    pub fn range(&self, lo: f64, hi: f64) -> &[(f64, PointId)] {
        debug_assert!(lo <= hi, "contradictory index bounds [{lo}, {hi}]");
        let start = self.entries.partition_point(|e| e.0 < lo);
        let end = self.entries.partition_point(|e| e.0 <= hi);
        &self.entries[start..end.max(start)]
    }

    /// Entries holding exactly `value`.
    pub fn equal_range(&self, value: f64) -> &[(f64, PointId)] {
        self.range(value, value)
    }

    /// Entries holding the preferred extreme value (the 1-D skyline).
    pub fn best(&self, pref: Preference) -> &[(f64, PointId)] {
        match pref {
            Preference::Min => self.equal_range(self.min()),
            Preference::Max => self.equal_range(self.max()),
        }
    }

    /// Entries from the preferred end to the other one.
    pub fn iter_preferred(
        &self,
        pref: Preference,
    ) -> impl DoubleEndedIterator<Item = &(f64, PointId)> + '_ {
        match pref {
            Preference::Min => Either::Left(self.entries.iter()),
            Preference::Max => Either::Right(self.entries.iter().rev()),
        }
    }
}

/// One [`DimensionIndex`] per dimension plus the domain-span table.
#[derive(Clone, Debug)]
pub struct SortedIndex {
    dims: Vec<DimensionIndex>,
    spans: Vec<f64>,
}

impl SortedIndex {
    pub fn build(dataset: &Dataset) -> Self {
        let dims: Vec<DimensionIndex> = (0..dataset.n_dims())
            .map(|d| DimensionIndex::build(dataset, d))
            .collect();
        let spans = dims.iter().map(DimensionIndex::span).collect();
        Self { dims, spans }
    }

    #[inline]
    pub fn dim(&self, dim: usize) -> &DimensionIndex {
        &self.dims[dim]
    }

    #[inline]
    pub fn span(&self, dim: usize) -> f64 {
        self.spans[dim]
    }

    pub fn n_dims(&self) -> usize {
        self.dims.len()
    }

    /// Dimension of `dims` with the largest span; the last one wins ties.
    pub fn widest(&self, dims: &[usize]) -> usize {
        let mut best = dims[0];
        for &d in &dims[1..] {
            if self.spans[d] >= self.spans[best] {
                best = d;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(entries: &[(f64, PointId)]) -> Vec<usize> {
        entries.iter().map(|e| e.1.index()).collect()
    }

    fn sample() -> Dataset {
        Dataset::from_rows(
            &[[3.0, 1.0], [1.0, 1.0], [3.0, 7.0], [2.0, 7.0]],
            vec![Preference::Min, Preference::Max],
        )
        .unwrap()
    }

    #[test]
    fn sorts_values_then_ids() {
        let idx = DimensionIndex::build(&sample(), 0);
        assert_eq!(ids(idx.range(0.0, 10.0)), vec![1, 3, 0, 2]);
        assert_eq!(idx.min(), 1.0);
        assert_eq!(idx.max(), 3.0);
        assert_eq!(idx.span(), 2.0);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let idx = DimensionIndex::build(&sample(), 0);
        assert_eq!(ids(idx.range(2.0, 3.0)), vec![3, 0, 2]);
        assert_eq!(ids(idx.equal_range(3.0)), vec![0, 2]);
        assert!(idx.range(1.5, 1.9).is_empty());
    }

    #[test]
    fn best_follows_preference() {
        let ds = sample();
        let index = SortedIndex::build(&ds);
        assert_eq!(ids(index.dim(0).best(Preference::Min)), vec![1]);
        assert_eq!(ids(index.dim(1).best(Preference::Max)), vec![2, 3]);
        let streamed: Vec<usize> = index
            .dim(1)
            .iter_preferred(Preference::Max)
            .map(|e| e.1.index())
            .collect();
        assert_eq!(streamed, vec![3, 2, 1, 0]);
    }

    #[test]
    fn widest_prefers_last_on_ties() {
        let ds = Dataset::from_rows_minimized(&[[0.0, 0.0, 0.0], [4.0, 4.0, 1.0]]).unwrap();
        let index = SortedIndex::build(&ds);
        assert_eq!(index.widest(&[0, 1, 2]), 1);
        assert_eq!(index.widest(&[2]), 2);
    }
}
