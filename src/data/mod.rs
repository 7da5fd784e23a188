//! Data module: the point matrix and its per-dimension sorted index

pub mod dataset;
pub mod sorted_index;

pub use dataset::{Dataset, PointId, Preference};
pub use sorted_index::{DimensionIndex, SortedIndex};
