//! Skycube algorithms: dominance, BNL, Type-1 composition and the
//! depth-first and breadth-first traversals.

pub mod bnl;
pub mod breadth;
pub mod depth;
pub mod domain;
pub mod dominance;
pub mod stats;
pub mod type1;
pub mod visitor;

pub use bnl::{BnlWindow, skyline_of};
pub use breadth::BreadthFirst;
pub use depth::DepthFirst;
pub use dominance::{Dominance, DominanceComparator};
pub use stats::TraversalStats;
pub use visitor::{SkycubeCollector, SkylineVisitor};
