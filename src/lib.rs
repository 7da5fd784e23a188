#![cfg_attr(docsrs, feature(doc_cfg))]
//! # skycube
//!
//! skycube computes the skyline (Pareto-optimal set) of a fixed table of
//! points for every non-empty subset of its dimensions at once, each dimension
//! being minimized or maximized. Skylines of neighbouring subsets are derived
//! from each other instead of being recomputed from scratch.
//!
//! ## Features
//! - Depth-first traversal with closure pruning: subsets sharing a skyline are
//!   grouped into closures, and covered subsets reuse their parent's result
//! - Breadth-first traversal composing each subset from its co-bases, with an
//!   optional domain-guided scan that saves dominance tests
//! - Skylines as Distinct points plus Combined tie groups
//! - Text dataset reader and report writer matching the classic `.res` output
//!
//! ## Determinism
//!
//! Traversals are single-threaded and never consult a clock or a random
//! source; the same table and preferences always give the same lattice,
//! closures and counters.
//!
//! ## Usage
//!
//! ```
//! use skycube::prelude::*;
//!
//! let data = Dataset::from_rows_minimized(&[[1.0, 5.0], [3.0, 3.0], [5.0, 1.0]])?;
//! let mut cube = Skycube::new(data);
//! let mut all = SkycubeCollector::new();
//! cube.run_with(Strategy::Depth { full_subset_first: true }, &mut all)?;
//! let both = all.get(&Path::full(2)).expect("every subset is reported");
//! assert_eq!(both.distinct_len(), 3);
//! # Ok::<(), SkycubeError>(())
//! ```

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod engine;
pub mod io;
pub mod lattice;
pub mod skycube_error;

pub use debug_invariants::DebugInvariants;
pub use engine::{Skycube, Strategy};
pub use skycube_error::SkycubeError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::dominance::{Dominance, DominanceComparator};
    pub use crate::algs::stats::TraversalStats;
    pub use crate::algs::visitor::{SkycubeCollector, SkylineVisitor};
    pub use crate::data::dataset::{Dataset, PointId, Preference};
    pub use crate::data::sorted_index::SortedIndex;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::engine::{Skycube, Strategy};
    pub use crate::io::reader::DatasetReader;
    pub use crate::io::report::{ReportWriter, result_path};
    pub use crate::lattice::closure::{Closure, ClosureTable};
    pub use crate::lattice::node::{LatticeNode, LatticeTree, NodeId};
    pub use crate::lattice::path::Path;
    pub use crate::lattice::skyline::{CompactSkyline, Skyline, SkylineRead};
    pub use crate::skycube_error::SkycubeError;
}
