//! Domain-guided residual step of breadth-first traversal.
//!
//! Points are streamed from the sorted index of the subset's widest dimension
//! and each one is tested only against accepted points whose score (the sum
//! of its values, oriented so that smaller is better) does not exceed its
//! own. A dominator always has a strictly smaller score, so the scan over the
//! score-sorted board can stop at the first larger score.
//!
//! Inside a run of equal values on the streamed dimension, points are taken
//! in lexicographic preference order over the other dimensions. Every
//! dominator of a point then comes before it, so accepted points are never
//! retracted.

use crate::algs::dominance::{Dominance, DominanceComparator};
use crate::data::dataset::{Dataset, PointId};
use crate::data::sorted_index::SortedIndex;
use crate::lattice::skyline::{SkylineRead, SkylineSet};
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Accepted points sorted by score, ties in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ScoreBoard {
    entries: Vec<(f64, PointId)>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after every entry with a score `<= score`.
    pub fn insert(&mut self, score: f64, p: PointId) {
        let at = self.entries.partition_point(|e| e.0 <= score);
        self.entries.insert(at, (score, p));
    }

    /// Entries that may dominate a point scoring `score`.
    pub fn at_most(&self, score: f64) -> &[(f64, PointId)] {
        &self.entries[..self.entries.partition_point(|e| e.0 <= score)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.is_sorted_by(|a, b| a.0 <= b.0)
    }
}

/// Oriented sum of `p`'s values over `dims`.
pub fn score(dataset: &Dataset, p: PointId, dims: &[usize]) -> f64 {
    dims.iter()
        .map(|&d| dataset.preference(d).oriented(dataset.value(p, d)))
        .sum()
}

/// Stream order of the points: preference order on `lead`, then
/// lexicographic preference order over the rest of `dims`.
pub fn stream_order(
    dataset: &Dataset,
    index: &SortedIndex,
    lead: usize,
    dims: &[usize],
) -> Vec<PointId> {
    let others: Vec<usize> = dims.iter().copied().filter(|&d| d != lead).collect();
    let lexicographic = |a: &PointId, b: &PointId| {
        others
            .iter()
            .map(|&d| {
                let pref = dataset.preference(d);
                pref.oriented(dataset.value(*a, d))
                    .total_cmp(&pref.oriented(dataset.value(*b, d)))
            })
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    };
    let mut order = Vec::with_capacity(dataset.n_points());
    for (_, run) in &index
        .dim(lead)
        .iter_preferred(dataset.preference(lead))
        .chunk_by(|e| e.0)
    {
        let start = order.len();
        order.extend(run.map(|e| e.1));
        order[start..].sort_by(lexicographic);
    }
    order
}

/// Complete `known`, a partial skyline of `dims`, with the missing points.
pub fn complete_by_domain(
    dataset: &Dataset,
    index: &SortedIndex,
    cmp: &DominanceComparator<'_>,
    dims: &[usize],
    known: SkylineSet,
) -> SkylineSet {
    let lead = index.widest(dims);
    let omega = known.flatten();
    let (mut distinct, combined) = known.into_parts();
    let mut groups: Vec<BTreeSet<PointId>> = combined.into_iter().collect();
    let mut group_of: BTreeMap<PointId, usize> = groups
        .iter()
        .enumerate()
        .flat_map(|(i, g)| g.iter().map(move |&p| (p, i)))
        .collect();

    let mut board = ScoreBoard::new();
    for &p in &omega {
        board.insert(score(dataset, p, dims), p);
    }

    for q in stream_order(dataset, index, lead, dims) {
        if omega.contains(&q) {
            continue;
        }
        let fq = score(dataset, q, dims);
        let mut dominated = false;
        let mut tied_with = None;
        for &(_, p) in board.at_most(fq) {
            match cmp.compare(p, q, dims) {
                Dominance::FirstDominates => {
                    dominated = true;
                    break;
                }
                Dominance::Tied => {
                    tied_with = Some(p);
                    break;
                }
                Dominance::SecondDominates => {
                    debug_assert!(false, "{q} streamed after a point it dominates");
                }
                Dominance::Incomparable => {}
            }
        }
        if dominated {
            continue;
        }
        match tied_with {
            Some(p) => match group_of.get(&p) {
                Some(&g) => {
                    groups[g].insert(q);
                    group_of.insert(q, g);
                }
                None => {
                    distinct.remove(&p);
                    group_of.insert(p, groups.len());
                    group_of.insert(q, groups.len());
                    groups.push(BTreeSet::from([p, q]));
                }
            },
            None => {
                distinct.insert(q);
            }
        }
        board.insert(fq, q);
    }
    debug_assert!(board.is_sorted());
    SkylineSet::from_parts(distinct, groups)
}
