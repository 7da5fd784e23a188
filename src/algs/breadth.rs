//! Breadth-first skycube traversal.
//!
//! Subsets are materialized size by size. A node's skyline is assembled from
//! its co-bases, the subsets one dimension smaller:
//! 1. the union of their Distinct sets is always part of the result;
//! 2. a co-basis tie group untouched by step 1 is split on the dimension the
//!    co-basis lacks, and its best members are kept;
//! 3. the points still missing are found by BNL over a range query on the
//!    sorted index, or by the domain-guided scan of [`crate::algs::domain`].
//!
//! The whole lattice stays in the returned tree.

use crate::algs::bnl::BnlWindow;
use crate::algs::dominance::DominanceComparator;
use crate::algs::domain::complete_by_domain;
use crate::algs::stats::TraversalStats;
use crate::algs::type1::{compose, single_dimension};
use crate::algs::visitor::SkylineVisitor;
use crate::data::dataset::{Dataset, PointId};
use crate::data::sorted_index::SortedIndex;
use crate::debug_invariants::DebugInvariants;
use crate::lattice::node::{LatticeTree, NodeId};
use crate::lattice::path::Path;
use crate::lattice::skyline::{CompactSkyline, GroupRef, Skyline, SkylineRead, SkylineSet};
use itertools::Itertools;
use std::collections::BTreeSet;

/// One breadth-first run over borrowed engine state.
pub struct BreadthFirst<'a, V> {
    pub dataset: &'a Dataset,
    pub index: &'a SortedIndex,
    pub cmp: &'a DominanceComparator<'a>,
    pub stats: &'a mut TraversalStats,
    pub visitor: &'a mut V,
    /// Use the domain-guided scan for step 3 instead of range + BNL.
    pub domain_guided: bool,
}

impl<V: SkylineVisitor> BreadthFirst<'_, V> {
    pub fn run(mut self) -> LatticeTree {
        let n_dims = self.dataset.n_dims();
        log::info!(
            "breadth-first traversal over {} points, {} dimensions (domain guided: {})",
            self.dataset.n_points(),
            n_dims,
            self.domain_guided
        );

        let mut tree = LatticeTree::new();
        let root = tree.root();
        let level1: Vec<CompactSkyline> = (0..n_dims)
            .map(|d| {
                single_dimension(self.index, self.dataset.preference(d), d).into_compact()
            })
            .collect();
        for (d, sky) in level1.iter().enumerate() {
            let covered = sky.covered_len();
            let complete = covered == self.dataset.n_points();
            tree.push_child(root, d, Skyline::Compacted(sky.clone()), true, complete);
            self.stats.record_node(covered);
            self.stats.type1 += 1;
            self.stats.found_directly += covered as u64;
            self.visitor.visit(&Path::single(d), sky);
        }

        for size in 2..=n_dims {
            let parents: Vec<NodeId> = tree.level(size - 1).collect();
            let before = tree.len();
            for parent in parents {
                for dim in tree.node(parent).path().next_dim()..n_dims {
                    let (set, type1, complete) = self.compute(&tree, &level1, parent, dim);
                    let id = tree.push_child(parent, dim, Skyline::Growable(set), type1, complete);
                    let node = tree.node(id);
                    node.skyline().debug_assert_invariants();
                    if let Some(sky) = node.skyline().as_compact() {
                        self.visitor.visit(node.path(), sky);
                    }
                }
            }
            log::info!("level {size}: {} subsets", tree.len() - before);
        }

        crate::debug_invariants!(tree.validate_invariants(), "breadth-first tree");
        log::info!(
            "breadth-first traversal done: {} nodes computed, {} by composition",
            self.stats.processed,
            self.stats.type1
        );
        tree
    }

    /// Skyline, Type-1 flag and Complete flag of `parent ∪ {dim}`.
    fn compute(
        &mut self,
        tree: &LatticeTree,
        level1: &[CompactSkyline],
        parent: NodeId,
        dim: usize,
    ) -> (SkylineSet, bool, bool) {
        let n = self.dataset.n_points();
        let pnode = tree.node(parent);

        // a Distinct point stays Distinct under every superset
        if pnode.is_complete() && pnode.skyline().distinct_len() == n {
            self.stats.record_node(n);
            self.stats.found_directly += n as u64;
            return (SkylineSet::all_distinct(n), false, true);
        }

        if pnode.is_type1()
            && let Some(set) = compose(pnode.skyline(), &level1[dim])
        {
            let covered = set.covered_len();
            self.stats.type1 += 1;
            self.stats.found_directly += covered as u64;
            self.stats.record_node(covered);
            return (set, true, covered == n);
        }

        let path = pnode.path().extended(dim);
        let set = self.from_cobases(tree, &path);
        let covered = set.covered_len();
        self.stats.record_node(covered);
        (set, false, covered == n)
    }

    fn from_cobases(&mut self, tree: &LatticeTree, path: &Path) -> SkylineSet {
        let n = self.dataset.n_points();
        let cobases: Vec<(NodeId, usize)> = (0..path.len())
            .filter_map(|pos| {
                tree.find(&path.without(pos))
                    .map(|id| (id, path.dims()[pos]))
            })
            .collect();
        debug_assert_eq!(cobases.len(), path.len(), "missing co-basis of {path}");

        // step 1
        let mut distinct = BTreeSet::new();
        for &(id, _) in &cobases {
            distinct.extend(tree.node(id).skyline().distinct());
        }
        if distinct.len() == n {
            self.stats.found_directly += n as u64;
            return SkylineSet::from_parts(distinct, []);
        }

        // step 2
        let mut refined = BTreeSet::new();
        for &(id, removed) in &cobases {
            for group in tree.node(id).skyline().groups() {
                if group.iter().any(|p| distinct.contains(&p)) {
                    continue;
                }
                refined.insert(self.best_on(group, removed));
            }
        }
        let known = SkylineSet::from_parts(distinct, refined);
        self.stats.found_directly += known.covered_len() as u64;
        if known.covered_len() == n {
            return known;
        }

        // step 3
        if self.domain_guided {
            complete_by_domain(self.dataset, self.index, self.cmp, path.dims(), known)
        } else {
            self.complete_by_range(path, known)
        }
    }

    /// Members of `group` holding its best value on `dim`.
    fn best_on(&self, group: GroupRef<'_>, dim: usize) -> BTreeSet<PointId> {
        let pref = self.dataset.preference(dim);
        let oriented = |p: PointId| pref.oriented(self.dataset.value(p, dim));
        let best = group.iter().map(oriented).fold(f64::INFINITY, f64::min);
        group.iter().filter(|&p| oriented(p) == best).collect()
    }

    /// BNL over the points inside the bounding box of the known entries.
    fn complete_by_range(&self, path: &Path, known: SkylineSet) -> SkylineSet {
        let reps: Vec<PointId> = known
            .distinct()
            .chain(known.groups().filter_map(|g| g.representative()))
            .collect();

        let mut candidates: Option<BTreeSet<PointId>> = None;
        for &d in path.dims() {
            let Some((lo, hi)) = reps
                .iter()
                .map(|&p| self.dataset.value(p, d))
                .minmax()
                .into_option()
            else {
                break;
            };
            let hits = self.index.dim(d).range(lo, hi).iter().map(|e| e.1);
            let narrowed: BTreeSet<PointId> = match &candidates {
                None => hits.collect(),
                Some(current) => hits.filter(|p| current.contains(p)).collect(),
            };
            let exhausted = narrowed.is_empty();
            candidates = Some(narrowed);
            if exhausted {
                break;
            }
        }

        let classified = known.flatten();
        let rest: Vec<PointId> = candidates
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !classified.contains(p))
            .collect();
        if rest.is_empty() {
            return known;
        }
        let mut window = BnlWindow::seeded(&known);
        window.filter(self.cmp, path.dims(), rest);
        window.into_skyline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::bnl::skyline_of;
    use crate::data::dataset::Preference;

    fn run(dataset: &Dataset, domain_guided: bool) -> (LatticeTree, TraversalStats) {
        let index = SortedIndex::build(dataset);
        let cmp = DominanceComparator::new(dataset);
        let mut stats = TraversalStats::default();
        let tree = BreadthFirst {
            dataset,
            index: &index,
            cmp: &cmp,
            stats: &mut stats,
            visitor: &mut (),
            domain_guided,
        }
        .run();
        (tree, stats)
    }

    #[test]
    fn whole_lattice_matches_bnl() {
        let ds = Dataset::from_rows(
            &[
                [1.0, 5.0, 3.0, 2.0],
                [3.0, 3.0, 3.0, 2.0],
                [5.0, 1.0, 4.0, 2.0],
                [3.0, 3.0, 1.0, 7.0],
                [2.0, 4.0, 4.0, 7.0],
            ],
            vec![Preference::Min, Preference::Min, Preference::Max, Preference::Min],
        )
        .unwrap();
        let cmp = DominanceComparator::new(&ds);
        for domain_guided in [false, true] {
            let (tree, stats) = run(&ds, domain_guided);
            assert_eq!(tree.len(), 16);
            assert_eq!(stats.processed, 15);
            for (_, node) in tree.pre_order() {
                let expected = skyline_of(&cmp, node.path().dims(), ds.points()).into_compact();
                assert_eq!(node.skyline().as_compact(), Some(&expected), "{}", node.path());
            }
        }
    }

    #[test]
    fn complete_parent_makes_complete_children() {
        let ds = Dataset::from_rows_minimized(&[[1.0, 3.0, 0.0], [2.0, 2.0, 0.0], [3.0, 1.0, 0.0]])
            .unwrap();
        let (tree, _) = run(&ds, false);
        let d0d1 = tree.find(&Path::full(2)).unwrap();
        assert!(tree.node(d0d1).is_complete());
        let full = tree.find(&Path::full(3)).unwrap();
        assert!(tree.node(full).is_complete());
        assert_eq!(tree.node(full).skyline().distinct_len(), 3);
        // d2 alone ties every point: Complete, but not all Distinct
        let d2 = tree.child(tree.root(), 2).unwrap();
        assert!(tree.node(d2).is_complete());
        assert_eq!(tree.node(d2).skyline().group_count(), 1);
    }
}
