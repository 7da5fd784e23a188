//! `Path`: a subset of dimensions as a strictly increasing index sequence.
//!
//! Paths are generated by extending a parent with a dimension larger than its
//! last one, so every non-empty subset is produced exactly once per traversal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Strictly increasing sequence of dimension indices.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Path(Vec<usize>);

impl Path {
    /// The empty path (lattice root).
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// The single-dimension path `{dim}`.
    pub fn single(dim: usize) -> Self {
        Path(vec![dim])
    }

    /// `{0, 1, ..., n_dims - 1}`.
    pub fn full(n_dims: usize) -> Self {
        Path((0..n_dims).collect())
    }

    /// Build from dimensions that must already be strictly increasing.
    ///
    /// Returns `None` otherwise.
    pub fn from_dims(dims: Vec<usize>) -> Option<Self> {
        dims.windows(2).all(|w| w[0] < w[1]).then_some(Path(dims))
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last (largest) dimension; children only extend beyond it.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// First dimension a child may add.
    #[inline]
    pub fn next_dim(&self) -> usize {
        self.last().map_or(0, |d| d + 1)
    }

    #[inline]
    pub fn contains(&self, dim: usize) -> bool {
        self.0.binary_search(&dim).is_ok()
    }

    /// `self ∪ {dim}`, with `dim` larger than every dimension of `self`.
    pub fn extended(&self, dim: usize) -> Self {
        debug_assert!(self.last().is_none_or(|l| l < dim), "path must stay increasing");
        let mut dims = Vec::with_capacity(self.0.len() + 1);
        dims.extend_from_slice(&self.0);
        dims.push(dim);
        Path(dims)
    }

    /// `self` without the dimension at position `pos`.
    pub fn without(&self, pos: usize) -> Self {
        let mut dims = self.0.clone();
        dims.remove(pos);
        Path(dims)
    }

    /// Index-set inclusion, both sides being sorted.
    pub fn is_subset_of(&self, other: &Path) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        let mut rest = other.0.iter();
        self.0.iter().all(|d| rest.by_ref().any(|o| o == d))
    }

    /// Inclusion with strictly fewer dimensions.
    pub fn is_strict_subset_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && self.is_subset_of(other)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

/// Prints `d0d2d3`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "d{d}")?;
        }
        Ok(())
    }
}
