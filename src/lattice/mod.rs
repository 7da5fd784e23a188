//! Lattice model: subset paths, skyline representations, the node arena and
//! the closure table.

pub mod closure;
pub mod node;
pub mod path;
pub mod skyline;

pub use closure::{Closure, ClosureId, ClosureTable, Registration};
pub use node::{LatticeNode, LatticeTree, NodeId};
pub use path::Path;
pub use skyline::{CompactSkyline, GroupRef, Skyline, SkylineRead, SkylineSet};
