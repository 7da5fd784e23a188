//! Counters gathered during one traversal.

use serde::Serialize;

/// Diagnostic counters of a traversal; not part of the result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Nodes whose skyline was computed (level 1 included).
    pub processed: u64,
    /// Nodes resolved by Type-1 composition (level 1 included).
    pub type1: u64,
    /// Skyline points placed without any dominance test.
    pub found_directly: u64,
    /// Skyline points over all computed nodes.
    pub found_total: u64,
    /// Dominance tests run.
    pub comparisons: u64,
    /// Closures registered (depth-first only).
    pub closures: u64,
    /// Closed nodes over all closures (depth-first only).
    pub closed_nodes: u64,
}

impl TraversalStats {
    /// Count one computed node holding `skyline_points` points.
    pub(crate) fn record_node(&mut self, skyline_points: usize) {
        self.processed += 1;
        self.found_total += skyline_points as u64;
        if self.processed & 0x1FF == 0 {
            log::info!("generated {} nodes", self.processed);
        }
    }
}
