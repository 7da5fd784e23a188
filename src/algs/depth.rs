//! Depth-first skycube traversal with closure pruning.
//!
//! Subsets are visited by recursive descent, each one computed from its
//! parent and the 1-D skyline of the added dimension. After a subtree is
//! done the subset joins the closure of its skyline; later subsets that the
//! closure provably covers reuse the parent skyline without any work.
//!
//! Only the root and the single-dimension nodes are kept in the returned
//! tree. Every subset is reported to the visitor once.

use crate::algs::bnl::{BnlWindow, skyline_of};
use crate::algs::dominance::DominanceComparator;
use crate::algs::stats::TraversalStats;
use crate::algs::type1::{compose, single_dimension};
use crate::algs::visitor::SkylineVisitor;
use crate::data::dataset::{Dataset, PointId};
use crate::data::sorted_index::SortedIndex;
use crate::debug_invariants::DebugInvariants;
use crate::lattice::closure::{ClosureId, ClosureTable};
use crate::lattice::node::LatticeTree;
use crate::lattice::path::Path;
use crate::lattice::skyline::{CompactSkyline, Skyline, SkylineRead, SkylineSet};
use std::collections::BTreeSet;

/// One depth-first run over borrowed engine state.
pub struct DepthFirst<'a, V> {
    pub dataset: &'a Dataset,
    pub index: &'a SortedIndex,
    pub cmp: &'a DominanceComparator<'a>,
    pub closures: &'a mut ClosureTable,
    pub stats: &'a mut TraversalStats,
    pub visitor: &'a mut V,
    /// Compute the all-dimensions subset first by one exhaustive pass.
    pub full_subset_first: bool,
}

impl<V: SkylineVisitor> DepthFirst<'_, V> {
    pub fn run(mut self) -> LatticeTree {
        let n_dims = self.dataset.n_dims();
        // with one dimension the full subset is a level-1 node
        self.full_subset_first &= n_dims > 1;
        log::info!(
            "depth-first traversal over {} points, {} dimensions (full subset first: {})",
            self.dataset.n_points(),
            n_dims,
            self.full_subset_first
        );

        let mut tree = LatticeTree::new();
        let root = tree.root();
        let level1: Vec<CompactSkyline> = (0..n_dims)
            .map(|d| {
                single_dimension(self.index, self.dataset.preference(d), d).into_compact()
            })
            .collect();
        for (d, sky) in level1.iter().enumerate() {
            let complete = sky.covered_len() == self.dataset.n_points();
            tree.push_child(root, d, Skyline::Compacted(sky.clone()), true, complete);
            self.stats.record_node(sky.covered_len());
            self.stats.type1 += 1;
            self.stats.found_directly += sky.covered_len() as u64;
            self.visitor.visit(&Path::single(d), sky);
        }

        if self.full_subset_first {
            let full = Path::full(n_dims);
            let sky = skyline_of(self.cmp, full.dims(), self.dataset.points()).into_compact();
            sky.debug_assert_invariants();
            self.stats.record_node(sky.covered_len());
            self.visitor.visit(&full, &sky);
            self.closures.register(full, &sky);
        }

        for (d, sky) in level1.iter().enumerate() {
            self.descend(&level1, &Path::single(d), true, sky, None);
        }

        self.stats.closures = self.closures.len() as u64;
        self.stats.closed_nodes = self.closures.closed_node_count() as u64;
        crate::debug_invariants!(self.closures.validate_invariants(), "depth-first closures");
        log::info!(
            "depth-first traversal done: {} nodes computed, {} closures",
            self.stats.processed,
            self.stats.closures
        );
        tree
    }

    /// Visit every extension of `path`, then register `path` unless it
    /// shares its parent's closure.
    fn descend(
        &mut self,
        level1: &[CompactSkyline],
        path: &Path,
        type1: bool,
        sky: &CompactSkyline,
        parent_group: Option<ClosureId>,
    ) {
        let n_dims = self.dataset.n_dims();
        let found = parent_group.or_else(|| self.closures.find(sky));

        if !(self.full_subset_first && path.len() + 1 == n_dims) {
            for i in path.next_dim()..n_dims {
                let child = path.extended(i);
                if let Some(id) = found
                    && self.closures.get(id).prunes(&child, i)
                {
                    log::trace!("{child} pruned by closure {}", id.index());
                    self.visitor.visit(&child, sky);
                    self.descend(level1, &child, type1, sky, Some(id));
                    continue;
                }

                let added = &level1[i];
                let composed = if type1 { compose(sky, added) } else { None };
                let (child_sky, child_type1) = match composed {
                    Some(set) => {
                        self.stats.type1 += 1;
                        self.stats.found_directly += set.covered_len() as u64;
                        (set.into_compact(), true)
                    }
                    None => (self.extend_by_bnl(sky, added, &child).into_compact(), false),
                };
                child_sky.debug_assert_invariants();
                self.stats.record_node(child_sky.covered_len());
                self.visitor.visit(&child, &child_sky);
                self.descend(level1, &child, child_type1, &child_sky, None);
            }
        }

        if parent_group.is_none() {
            self.closures.register(path.clone(), sky);
        }
    }

    /// Skyline of `child` from its parent's skyline: both Distinct sets are
    /// kept as is, every other point goes through BNL.
    fn extend_by_bnl(
        &mut self,
        parent: &CompactSkyline,
        added: &CompactSkyline,
        child: &Path,
    ) -> SkylineSet {
        let seeds: BTreeSet<PointId> = parent.distinct().chain(added.distinct()).collect();
        self.stats.found_directly += seeds.len() as u64;
        let mut window = BnlWindow::new();
        for &p in &seeds {
            window.seed(p);
        }
        window.filter(
            self.cmp,
            child.dims(),
            self.dataset.points().filter(|p| !seeds.contains(p)),
        );
        window.into_skyline()
    }
}
