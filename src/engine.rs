//! `Skycube`: the one-shot engine computing every subset's skyline.
//!
//! The engine owns the dataset, its sorted index, the lattice tree and the
//! closure table. Exactly one traversal may run per instance; the results
//! stay readable afterwards.

use crate::algs::breadth::BreadthFirst;
use crate::algs::depth::DepthFirst;
use crate::algs::dominance::DominanceComparator;
use crate::algs::stats::TraversalStats;
use crate::algs::visitor::SkylineVisitor;
use crate::data::dataset::Dataset;
use crate::data::sorted_index::SortedIndex;
use crate::lattice::closure::ClosureTable;
use crate::lattice::node::LatticeTree;
use crate::skycube_error::SkycubeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Traversal strategy of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Recursive descent with closure pruning.
    Depth {
        /// Compute the all-dimensions subset first and register its closure.
        full_subset_first: bool,
    },
    /// Level-by-level composition, residual points by range query and BNL.
    Breadth,
    /// Level-by-level composition, residual points by the domain-guided scan.
    BreadthDomain,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Depth {
            full_subset_first: true,
        }
    }
}

impl Strategy {
    /// Short tag used in result-file names.
    pub fn tag(self) -> &'static str {
        match self {
            Strategy::Depth {
                full_subset_first: true,
            } => "del",
            Strategy::Depth {
                full_subset_first: false,
            } => "dep",
            Strategy::Breadth => "bre",
            Strategy::BreadthDomain => "brd",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Depth { .. } => "depth",
            Strategy::Breadth => "breadth",
            Strategy::BreadthDomain => "br_dom",
        };
        f.write_str(name)
    }
}

/// Skycube engine over one immutable dataset.
#[derive(Debug)]
pub struct Skycube {
    dataset: Dataset,
    index: SortedIndex,
    tree: Option<LatticeTree>,
    closures: ClosureTable,
    stats: TraversalStats,
    strategy: Option<Strategy>,
}

impl Skycube {
    /// Build the engine and the per-dimension sorted index.
    pub fn new(dataset: Dataset) -> Self {
        log::info!(
            "indexing {} points over {} dimensions ({})",
            dataset.n_points(),
            dataset.n_dims(),
            dataset.direction_string()
        );
        let index = SortedIndex::build(&dataset);
        let closures = ClosureTable::new(dataset.n_dims());
        Self {
            dataset,
            index,
            tree: None,
            closures,
            stats: TraversalStats::default(),
            strategy: None,
        }
    }

    /// Run `strategy` once.
    ///
    /// # Errors
    /// [`SkycubeError::InvalidState`] if a traversal already ran.
    pub fn run(&mut self, strategy: Strategy) -> Result<&TraversalStats, SkycubeError> {
        self.run_with(strategy, &mut ())
    }

    /// Run `strategy` once, reporting every subset's skyline to `visitor`.
    ///
    /// # Errors
    /// [`SkycubeError::InvalidState`] if a traversal already ran.
    pub fn run_with<V: SkylineVisitor>(
        &mut self,
        strategy: Strategy,
        visitor: &mut V,
    ) -> Result<&TraversalStats, SkycubeError> {
        if self.tree.is_some() {
            return Err(SkycubeError::InvalidState(
                "a traversal already ran on this skycube",
            ));
        }
        let cmp = DominanceComparator::new(&self.dataset);
        let tree = match strategy {
            Strategy::Depth { full_subset_first } => DepthFirst {
                dataset: &self.dataset,
                index: &self.index,
                cmp: &cmp,
                closures: &mut self.closures,
                stats: &mut self.stats,
                visitor,
                full_subset_first,
            }
            .run(),
            Strategy::Breadth | Strategy::BreadthDomain => BreadthFirst {
                dataset: &self.dataset,
                index: &self.index,
                cmp: &cmp,
                stats: &mut self.stats,
                visitor,
                domain_guided: strategy == Strategy::BreadthDomain,
            }
            .run(),
        };
        self.stats.comparisons = cmp.comparisons();
        self.tree = Some(tree);
        self.strategy = Some(strategy);
        Ok(&self.stats)
    }

    /// Depth-first traversal.
    pub fn depth_first(
        &mut self,
        full_subset_first: bool,
    ) -> Result<&TraversalStats, SkycubeError> {
        self.run(Strategy::Depth { full_subset_first })
    }

    /// Breadth-first traversal, domain-guided or not.
    pub fn breadth_first(&mut self, domain_guided: bool) -> Result<&TraversalStats, SkycubeError> {
        self.run(if domain_guided {
            Strategy::BreadthDomain
        } else {
            Strategy::Breadth
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index(&self) -> &SortedIndex {
        &self.index
    }

    /// Lattice tree, once a traversal ran.
    pub fn tree(&self) -> Option<&LatticeTree> {
        self.tree.as_ref()
    }

    /// Closure table; empty unless the depth-first strategy ran.
    pub fn closures(&self) -> &ClosureTable {
        &self.closures
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Strategy of the traversal that ran, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    pub fn closure_count(&self) -> usize {
        self.closures.len()
    }

    pub fn closed_node_count(&self) -> usize {
        self.closures.closed_node_count()
    }
}
