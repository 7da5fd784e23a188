//! `Dataset`: the immutable point matrix a skycube is computed over.
//!
//! Points are never copied: every algorithm refers to them through
//! [`PointId`], the row index of the point in the input. Values are stored
//! column-major (`values[dim * n_points + point]`) so scanning one dimension
//! touches contiguous memory.

use crate::skycube_error::SkycubeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Row index of a point in its [`Dataset`].
///
/// # Memory layout
/// `repr(transparent)` over `u32`: sets of point ids are the bulk of the
/// memory a skycube holds, so the handle stays half the size of `usize`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PointId(u32);

impl PointId {
    /// Creates a `PointId` from a row index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`. [`Dataset`] constructors
    /// reject such tables before any id is handed out.
    #[inline]
    pub fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "PointId index overflow");
        PointId(index as u32)
    }

    /// Row index of the point.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointId").field(&self.0).finish()
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of a dimension is preferred.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preference {
    /// Smaller values are better (`l`, lowest).
    Min,
    /// Larger values are better (`u`, uppermost).
    Max,
}

impl Preference {
    /// `true` maps to [`Preference::Min`].
    #[inline]
    pub fn from_minimize(minimize: bool) -> Self {
        if minimize { Preference::Min } else { Preference::Max }
    }

    #[inline]
    pub fn minimizes(self) -> bool {
        matches!(self, Preference::Min)
    }

    /// Letter used in direction strings and result-file names.
    pub fn letter(self) -> char {
        match self {
            Preference::Min => 'l',
            Preference::Max => 'u',
        }
    }

    pub fn from_letter(c: char) -> Result<Self, SkycubeError> {
        match c {
            'l' => Ok(Preference::Min),
            'u' => Ok(Preference::Max),
            other => Err(SkycubeError::InvalidPreference(other)),
        }
    }

    /// Parse a direction string such as `"llu"`.
    pub fn parse_all(letters: &str) -> Result<Vec<Self>, SkycubeError> {
        letters.chars().map(Self::from_letter).collect()
    }

    /// `true` when `a` is strictly preferred over `b`.
    #[inline]
    pub fn better(self, a: f64, b: f64) -> bool {
        match self {
            Preference::Min => a < b,
            Preference::Max => a > b,
        }
    }

    /// Value oriented so that smaller is always better.
    #[inline]
    pub fn oriented(self, v: f64) -> f64 {
        match self {
            Preference::Min => v,
            Preference::Max => -v,
        }
    }
}

/// Immutable `n_points × n_dims` matrix plus one [`Preference`] per dimension.
#[derive(Clone, Debug)]
pub struct Dataset {
    values: Vec<f64>,
    n_points: usize,
    n_dims: usize,
    preferences: Vec<Preference>,
    labels: Option<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from row-major input.
    ///
    /// # Errors
    /// * [`SkycubeError::EmptyDataset`] when there is no row or the first row is empty.
    /// * [`SkycubeError::RaggedRow`] when a row length differs from the first one.
    /// * [`SkycubeError::NonFiniteValue`] for NaN or infinite values.
    /// * [`SkycubeError::PreferenceMismatch`] when `preferences` has the wrong length.
    pub fn from_rows<R: AsRef<[f64]>>(
        rows: &[R],
        preferences: Vec<Preference>,
    ) -> Result<Self, SkycubeError> {
        let n_points = rows.len();
        let n_dims = rows.first().map_or(0, |r| r.as_ref().len());
        if n_points == 0 || n_dims == 0 || n_points > u32::MAX as usize {
            return Err(SkycubeError::EmptyDataset);
        }
        if preferences.len() != n_dims {
            return Err(SkycubeError::PreferenceMismatch {
                expected: preferences.len(),
                found: n_dims,
            });
        }

        let mut values = vec![0.0; n_points * n_dims];
        for (p, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_dims {
                return Err(SkycubeError::RaggedRow {
                    line: p + 1,
                    found: row.len(),
                    expected: n_dims,
                });
            }
            for (d, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(SkycubeError::NonFiniteValue {
                        line: p + 1,
                        column: d + 1,
                    });
                }
                // -0.0 == 0.0 under dominance; keep one bit pattern so
                // orders built with `total_cmp` agree with it.
                values[d * n_points + p] = if v == 0.0 { 0.0 } else { v };
            }
        }

        Ok(Self {
            values,
            n_points,
            n_dims,
            preferences,
            labels: None,
        })
    }

    /// Build a dataset where every dimension is minimized.
    pub fn from_rows_minimized<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SkycubeError> {
        let n_dims = rows.first().map_or(0, |r| r.as_ref().len());
        Self::from_rows(rows, vec![Preference::Min; n_dims])
    }

    /// Attach one display label per point.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, SkycubeError> {
        if labels.len() != self.n_points {
            return Err(SkycubeError::LabelMismatch {
                expected: self.n_points,
                found: labels.len(),
            });
        }
        self.labels = Some(labels);
        Ok(self)
    }

    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    #[inline]
    pub fn n_dims(&self) -> usize {
        self.n_dims
    }

    /// Value of point `p` on dimension `dim`.
    #[inline]
    pub fn value(&self, p: PointId, dim: usize) -> f64 {
        self.values[dim * self.n_points + p.index()]
    }

    /// All values of one dimension, indexed by point.
    #[inline]
    pub fn column(&self, dim: usize) -> &[f64] {
        &self.values[dim * self.n_points..(dim + 1) * self.n_points]
    }

    #[inline]
    pub fn preference(&self, dim: usize) -> Preference {
        self.preferences[dim]
    }

    pub fn preferences(&self) -> &[Preference] {
        &self.preferences
    }

    /// Direction string such as `"llu"`.
    pub fn direction_string(&self) -> String {
        self.preferences.iter().map(|p| p.letter()).collect()
    }

    pub fn label(&self, p: PointId) -> Option<&str> {
        self.labels.as_ref().map(|l| l[p.index()].as_str())
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Every point id, in row order.
    pub fn points(&self) -> impl Iterator<Item = PointId> + '_ {
        (0..self.n_points).map(PointId::new)
    }
}
