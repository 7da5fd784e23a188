//! Cheap composition of single-entry skylines.
//!
//! A 1-D skyline is one Distinct point or one tie group. When the parent
//! skyline has that shape too, the child's skyline can often be read off the
//! two entries without any comparison.

use crate::data::dataset::Preference;
use crate::data::sorted_index::SortedIndex;
use crate::lattice::skyline::{SkylineRead, SkylineSet};
use std::collections::BTreeSet;

/// 1-D skyline of `dim`: every point holding the preferred extreme value.
pub fn single_dimension(index: &SortedIndex, pref: Preference, dim: usize) -> SkylineSet {
    let best: BTreeSet<_> = index.dim(dim).best(pref).iter().map(|e| e.1).collect();
    SkylineSet::from_groups([best])
}

/// Compose a single-entry `parent` skyline with the 1-D skyline `added` of
/// the new dimension.
///
/// Returns `None` when the entries do not overlap and the child needs a full
/// computation.
pub fn compose(parent: &impl SkylineRead, added: &impl SkylineRead) -> Option<SkylineSet> {
    let mut out = SkylineSet::new();
    match (parent.first_distinct(), added.first_distinct()) {
        (Some(p), Some(n)) => {
            if p != n {
                return None;
            }
            out.insert_distinct(p);
        }
        (Some(p), None) => {
            if !added.first_group()?.contains(p) {
                return None;
            }
            out.insert_distinct(p);
        }
        (None, Some(n)) => {
            if !parent.first_group()?.contains(n) {
                return None;
            }
            out.insert_distinct(n);
        }
        (None, None) => {
            let added = added.first_group()?;
            let common: BTreeSet<_> = parent
                .first_group()?
                .iter()
                .filter(|p| added.contains(*p))
                .collect();
            if common.is_empty() {
                return None;
            }
            out.insert_group(common);
        }
    }
    Some(out)
}
