//! Block-nested-loop skyline filter over tie groups.

use crate::algs::dominance::{Dominance, DominanceComparator};
use crate::data::dataset::PointId;
use crate::lattice::skyline::{SkylineRead, SkylineSet};
use std::collections::VecDeque;

/// Window of tie groups forming the front seen so far.
///
/// The first member of a group is its representative; every member is equal
/// to it on the filtered dimensions.
#[derive(Clone, Debug, Default)]
pub struct BnlWindow {
    groups: VecDeque<Vec<PointId>>,
}

impl BnlWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window seeded with the entries of a known partial skyline.
    ///
    /// Seeds must already be skyline points of the dimensions filtered later.
    pub fn seeded(known: &impl SkylineRead) -> Self {
        let mut window = Self::new();
        window.groups.extend(known.distinct().map(|p| vec![p]));
        window.groups.extend(known.groups().map(|g| g.iter().collect()));
        window
    }

    /// Add a known singleton entry without comparing it.
    pub fn seed(&mut self, p: PointId) {
        self.groups.push_back(vec![p]);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Feed `candidates` through the window under `dims`.
    ///
    /// A dominated candidate is dropped, a tied one joins the group, and a
    /// dominating one evicts every group it beats before entering at the front.
    pub fn filter(
        &mut self,
        cmp: &DominanceComparator<'_>,
        dims: &[usize],
        candidates: impl IntoIterator<Item = PointId>,
    ) {
        'candidates: for c in candidates {
            let mut i = 0;
            while i < self.groups.len() {
                match cmp.compare(c, self.groups[i][0], dims) {
                    Dominance::SecondDominates => continue 'candidates,
                    Dominance::Tied => {
                        self.groups[i].push(c);
                        continue 'candidates;
                    }
                    Dominance::FirstDominates => {
                        self.groups.remove(i);
                    }
                    Dominance::Incomparable => i += 1,
                }
            }
            self.groups.push_front(vec![c]);
        }
    }

    /// Split into Distinct singletons and Combined groups.
    pub fn into_skyline(self) -> SkylineSet {
        SkylineSet::from_groups(self.groups)
    }
}

/// Skyline of `candidates` under `dims` by one exhaustive pass.
pub fn skyline_of(
    cmp: &DominanceComparator<'_>,
    dims: &[usize],
    candidates: impl IntoIterator<Item = PointId>,
) -> SkylineSet {
    let mut window = BnlWindow::new();
    window.filter(cmp, dims, candidates);
    window.into_skyline()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Dataset;

    fn ids(set: &std::collections::BTreeSet<PointId>) -> Vec<usize> {
        set.iter().map(|p| p.index()).collect()
    }

    #[test]
    fn keeps_incomparable_points() {
        let ds = Dataset::from_rows_minimized(&[[1.0, 5.0], [3.0, 3.0], [5.0, 1.0], [4.0, 4.0]])
            .unwrap();
        let cmp = DominanceComparator::new(&ds);
        let sky = skyline_of(&cmp, &[0, 1], ds.points());
        assert_eq!(ids(sky.distinct_set()), vec![0, 1, 2]);
        assert_eq!(sky.group_count(), 0);
    }

    #[test]
    fn groups_ties_and_evicts_many() {
        let ds = Dataset::from_rows_minimized(&[[5.0, 5.0], [4.0, 6.0], [6.0, 4.0], [2.0, 2.0], [2.0, 2.0]])
            .unwrap();
        let cmp = DominanceComparator::new(&ds);
        let sky = skyline_of(&cmp, &[0, 1], ds.points());
        assert!(sky.distinct_set().is_empty());
        let groups: Vec<Vec<usize>> = sky
            .combined_sets()
            .iter()
            .map(|g| g.iter().map(|p| p.index()).collect())
            .collect();
        assert_eq!(groups, vec![vec![3, 4]]);
    }

    #[test]
    fn seeded_window_keeps_seeds() {
        let ds = Dataset::from_rows_minimized(&[[1.0, 5.0], [5.0, 1.0], [6.0, 6.0], [3.0, 3.0]])
            .unwrap();
        let cmp = DominanceComparator::new(&ds);
        let mut window = BnlWindow::new();
        window.seed(PointId::new(0));
        window.seed(PointId::new(1));
        window.filter(&cmp, &[0, 1], [PointId::new(2), PointId::new(3)]);
        assert_eq!(window.len(), 3);
        assert_eq!(ids(window.into_skyline().distinct_set()), vec![0, 1, 3]);
    }
}
