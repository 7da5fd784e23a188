//! Pairwise dominance test under a subset of dimensions.

use crate::data::dataset::{Dataset, PointId};
use std::cell::Cell;

/// Outcome of comparing a first point against a second one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dominance {
    FirstDominates,
    SecondDominates,
    Tied,
    Incomparable,
}

impl Dominance {
    /// Result of the same comparison with the arguments swapped.
    pub fn mirrored(self) -> Self {
        match self {
            Dominance::FirstDominates => Dominance::SecondDominates,
            Dominance::SecondDominates => Dominance::FirstDominates,
            other => other,
        }
    }
}

const SECOND_WORSE: u8 = 0b01;
const FIRST_WORSE: u8 = 0b10;

/// Indexed by the accumulated `FIRST_WORSE | SECOND_WORSE` bits.
const OUTCOME: [Dominance; 4] = [
    Dominance::Tied,
    Dominance::FirstDominates,
    Dominance::SecondDominates,
    Dominance::Incomparable,
];

/// Dominance comparator over one dataset, counting the tests it runs.
#[derive(Debug)]
pub struct DominanceComparator<'a> {
    dataset: &'a Dataset,
    comparisons: Cell<u64>,
}

impl<'a> DominanceComparator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            comparisons: Cell::new(0),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Compare `a` against `b` on `dims`.
    ///
    /// Stops as soon as each point is worse somewhere.
    pub fn compare(&self, a: PointId, b: PointId, dims: &[usize]) -> Dominance {
        self.comparisons.set(self.comparisons.get() + 1);
        let mut bits = 0u8;
        for &d in dims {
            let (va, vb) = (self.dataset.value(a, d), self.dataset.value(b, d));
            let pref = self.dataset.preference(d);
            if pref.better(va, vb) {
                bits |= SECOND_WORSE;
            } else if pref.better(vb, va) {
                bits |= FIRST_WORSE;
            }
            if bits == FIRST_WORSE | SECOND_WORSE {
                break;
            }
        }
        OUTCOME[bits as usize]
    }

    /// Number of [`compare`](Self::compare) calls so far.
    pub fn comparisons(&self) -> u64 {
        self.comparisons.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Preference;
    use proptest::prelude::*;

    fn id(p: usize) -> PointId {
        PointId::new(p)
    }

    #[test]
    fn respects_direction() {
        let ds = Dataset::from_rows(
            &[[1.0, 9.0], [9.0, 1.0], [1.0, 1.0]],
            vec![Preference::Min, Preference::Max],
        )
        .unwrap();
        let cmp = DominanceComparator::new(&ds);
        assert_eq!(cmp.compare(id(0), id(2), &[0, 1]), Dominance::FirstDominates);
        assert_eq!(cmp.compare(id(2), id(1), &[0, 1]), Dominance::FirstDominates);
        assert_eq!(cmp.compare(id(0), id(1), &[0, 1]), Dominance::FirstDominates);
        assert_eq!(cmp.compare(id(0), id(2), &[0]), Dominance::Tied);
        assert_eq!(cmp.compare(id(1), id(2), &[0, 1]), Dominance::SecondDominates);
        assert_eq!(cmp.comparisons(), 5);
    }

    #[test]
    fn incomparable_when_each_wins_once() {
        let ds = Dataset::from_rows_minimized(&[[1.0, 5.0, 0.0], [5.0, 1.0, 0.0]]).unwrap();
        let cmp = DominanceComparator::new(&ds);
        assert_eq!(cmp.compare(id(0), id(1), &[0, 1, 2]), Dominance::Incomparable);
        assert_eq!(cmp.compare(id(0), id(1), &[2]), Dominance::Tied);
    }

    proptest! {
        #[test]
        fn comparisons_mirror(
            rows in prop::collection::vec(prop::collection::vec(0u8..4, 3), 2..6),
            maximize in prop::collection::vec(any::<bool>(), 3),
            dims in prop::sample::subsequence(vec![0usize, 1, 2], 1..=3),
        ) {
            let rows: Vec<Vec<f64>> = rows
                .iter()
                .map(|r| r.iter().map(|&v| f64::from(v)).collect())
                .collect();
            let prefs = maximize.iter().map(|&m| Preference::from_minimize(!m)).collect();
            let ds = Dataset::from_rows(&rows, prefs).unwrap();
            let cmp = DominanceComparator::new(&ds);
            for a in ds.points() {
                prop_assert_eq!(cmp.compare(a, a, &dims), Dominance::Tied);
                for b in ds.points() {
                    prop_assert_eq!(cmp.compare(a, b, &dims), cmp.compare(b, a, &dims).mirrored());
                }
            }
        }
    }
}
