//! Per-subset result callbacks.
//!
//! The depth-first tree keeps only its first level, so deeper skylines are
//! handed to a [`SkylineVisitor`] as they are finalized. Both traversals call
//! the visitor exactly once per non-empty subset.

use crate::lattice::path::Path;
use crate::lattice::skyline::CompactSkyline;
use std::collections::BTreeMap;

/// Receives every finalized `(path, skyline)` pair.
pub trait SkylineVisitor {
    fn visit(&mut self, path: &Path, skyline: &CompactSkyline);
}

/// Ignores every subset.
impl SkylineVisitor for () {
    fn visit(&mut self, _path: &Path, _skyline: &CompactSkyline) {}
}

impl<F> SkylineVisitor for F
where
    F: FnMut(&Path, &CompactSkyline),
{
    fn visit(&mut self, path: &Path, skyline: &CompactSkyline) {
        self(path, skyline)
    }
}

/// Visitor storing the whole skycube, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct SkycubeCollector {
    skylines: BTreeMap<Path, CompactSkyline>,
}

impl SkycubeCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&CompactSkyline> {
        self.skylines.get(path)
    }

    pub fn len(&self) -> usize {
        self.skylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skylines.is_empty()
    }

    /// Subsets in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &CompactSkyline)> + '_ {
        self.skylines.iter()
    }

    pub fn into_map(self) -> BTreeMap<Path, CompactSkyline> {
        self.skylines
    }
}

impl SkylineVisitor for SkycubeCollector {
    fn visit(&mut self, path: &Path, skyline: &CompactSkyline) {
        let previous = self.skylines.insert(path.clone(), skyline.clone());
        debug_assert!(previous.is_none(), "subset {path} visited twice");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::PointId;

    #[test]
    fn closures_and_collector_receive_paths() {
        let sky = CompactSkyline::new(vec![PointId::new(0)], vec![]);
        let mut seen = Vec::new();
        let mut f = |p: &Path, _: &CompactSkyline| seen.push(p.to_string());
        f.visit(&Path::single(1), &sky);
        f.visit(&Path::full(2), &sky);
        assert_eq!(seen, ["d1", "d0d1"]);

        let mut collector = SkycubeCollector::new();
        collector.visit(&Path::single(0), &sky);
        assert_eq!(collector.get(&Path::single(0)), Some(&sky));
        assert_eq!(collector.len(), 1);
    }
}
