//! Skyline representation of one dimension subset.
//!
//! A skyline is a pair *(Distinct, Combined)*:
//! - **Distinct**: points that are non-dominated and have no tie partner;
//! - **Combined**: groups (size ≥ 2) of points equal on every dimension of the
//!   subset and jointly non-dominated.
//!
//! Two storage forms share the [`SkylineRead`] contract:
//! - [`SkylineSet`], ordered sets that grow while a node is being computed;
//! - [`CompactSkyline`], sorted boxed slices once the node is finalized. The
//!   compact form is canonical, so it doubles as the equality/hash key
//!   (the *signature*) of the closure table.
//!
//! [`Skyline`] holds either form and is converted once, at finalization.

use crate::data::dataset::PointId;
use crate::debug_invariants::{DebugInvariants, ensure};
use crate::skycube_error::SkycubeError;
use itertools::Either;
use serde::Serialize;
use std::collections::BTreeSet;

/// Borrowed view of one Combined group, whatever the storage form.
#[derive(Copy, Clone, Debug)]
pub enum GroupRef<'a> {
    Set(&'a BTreeSet<PointId>),
    Slice(&'a [PointId]),
}

impl<'a> GroupRef<'a> {
    pub fn len(&self) -> usize {
        match self {
            GroupRef::Set(s) => s.len(),
            GroupRef::Slice(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest member; every member has the same values on the subset.
    pub fn representative(&self) -> Option<PointId> {
        match self {
            GroupRef::Set(s) => s.first().copied(),
            GroupRef::Slice(s) => s.first().copied(),
        }
    }

    pub fn contains(&self, p: PointId) -> bool {
        match self {
            GroupRef::Set(s) => s.contains(&p),
            GroupRef::Slice(s) => s.binary_search(&p).is_ok(),
        }
    }

    /// Members in increasing id order.
    pub fn iter(&self) -> impl Iterator<Item = PointId> + 'a {
        match *self {
            GroupRef::Set(s) => Either::Left(s.iter().copied()),
            GroupRef::Slice(s) => Either::Right(s.iter().copied()),
        }
    }
}

/// Shared read contract of both storage forms.
pub trait SkylineRead {
    /// Distinct points in increasing id order.
    fn distinct(&self) -> impl Iterator<Item = PointId> + '_;

    /// Combined groups in canonical order.
    fn groups(&self) -> impl Iterator<Item = GroupRef<'_>> + '_;

    fn distinct_len(&self) -> usize;

    fn group_count(&self) -> usize;

    /// Number of points in Distinct ∪ flatten(Combined).
    fn covered_len(&self) -> usize {
        self.distinct_len() + self.groups().map(|g| g.len()).sum::<usize>()
    }

    fn first_distinct(&self) -> Option<PointId> {
        self.distinct().next()
    }

    fn first_group(&self) -> Option<GroupRef<'_>> {
        self.groups().next()
    }

    fn is_empty(&self) -> bool {
        self.distinct_len() == 0 && self.group_count() == 0
    }

    /// Distinct ∪ flatten(Combined).
    fn flatten(&self) -> BTreeSet<PointId> {
        let mut out: BTreeSet<PointId> = self.distinct().collect();
        for g in self.groups() {
            out.extend(g.iter());
        }
        out
    }

    /// Canonical compact copy, usable as a closure-table key.
    fn signature(&self) -> CompactSkyline {
        CompactSkyline::new(
            self.distinct().collect(),
            self.groups().map(|g| g.iter().collect()).collect(),
        )
    }
}

fn validate_parts<'a>(
    distinct: impl Iterator<Item = PointId>,
    groups: impl Iterator<Item = GroupRef<'a>>,
) -> Result<(), SkycubeError> {
    let mut seen = BTreeSet::new();
    for p in distinct {
        ensure(seen.insert(p), || format!("distinct point {p} listed twice"))?;
    }
    for g in groups {
        ensure(g.len() >= 2, || format!("combined group of size {}", g.len()))?;
        for p in g.iter() {
            ensure(seen.insert(p), || format!("point {p} appears in two skyline entries"))?;
        }
    }
    Ok(())
}

/// Growable, build-time form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkylineSet {
    distinct: BTreeSet<PointId>,
    combined: BTreeSet<BTreeSet<PointId>>,
}

impl SkylineSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every point of a table of `n_points` as Distinct.
    pub fn all_distinct(n_points: usize) -> Self {
        Self {
            distinct: (0..n_points).map(PointId::new).collect(),
            combined: BTreeSet::new(),
        }
    }

    /// Build from tie groups: singletons become Distinct, the rest Combined.
    pub fn from_groups<G>(groups: impl IntoIterator<Item = G>) -> Self
    where
        G: IntoIterator<Item = PointId>,
    {
        let mut out = Self::new();
        for g in groups {
            out.insert_group(g.into_iter().collect());
        }
        out
    }

    pub fn insert_distinct(&mut self, p: PointId) -> bool {
        self.distinct.insert(p)
    }

    /// Insert a tie group; a singleton goes to Distinct.
    pub fn insert_group(&mut self, group: BTreeSet<PointId>) {
        debug_assert!(!group.is_empty(), "empty tie group");
        if group.len() == 1 {
            self.distinct.extend(group);
        } else {
            self.combined.insert(group);
        }
    }

    pub fn distinct_set(&self) -> &BTreeSet<PointId> {
        &self.distinct
    }

    pub fn combined_sets(&self) -> &BTreeSet<BTreeSet<PointId>> {
        &self.combined
    }

    /// `true` if `p` is Distinct or in a Combined group.
    pub fn covers(&self, p: PointId) -> bool {
        self.distinct.contains(&p) || self.combined.iter().any(|g| g.contains(&p))
    }

    pub fn into_parts(self) -> (BTreeSet<PointId>, BTreeSet<BTreeSet<PointId>>) {
        (self.distinct, self.combined)
    }

    pub fn from_parts(
        distinct: BTreeSet<PointId>,
        combined: impl IntoIterator<Item = BTreeSet<PointId>>,
    ) -> Self {
        let mut out = Self {
            distinct,
            combined: BTreeSet::new(),
        };
        for g in combined {
            out.insert_group(g);
        }
        out
    }

    /// Finalized form; already canonical since both levels are ordered sets.
    pub fn into_compact(self) -> CompactSkyline {
        CompactSkyline {
            distinct: self.distinct.into_iter().collect(),
            combined: self
                .combined
                .into_iter()
                .map(|g| g.into_iter().collect())
                .collect(),
        }
    }
}

impl SkylineRead for SkylineSet {
    fn distinct(&self) -> impl Iterator<Item = PointId> + '_ {
        self.distinct.iter().copied()
    }

    fn groups(&self) -> impl Iterator<Item = GroupRef<'_>> + '_ {
        self.combined.iter().map(GroupRef::Set)
    }

    fn distinct_len(&self) -> usize {
        self.distinct.len()
    }

    fn group_count(&self) -> usize {
        self.combined.len()
    }
}

impl DebugInvariants for SkylineSet {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        validate_parts(SkylineRead::distinct(self), self.groups())
    }
}

/// Compacted, read-only form; canonical and hashable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CompactSkyline {
    distinct: Box<[PointId]>,
    combined: Box<[Box<[PointId]>]>,
}

impl CompactSkyline {
    /// Canonicalize: sort Distinct, sort each group, sort the group list.
    pub fn new(mut distinct: Vec<PointId>, combined: Vec<Vec<PointId>>) -> Self {
        distinct.sort_unstable();
        let mut combined: Vec<Box<[PointId]>> = combined
            .into_iter()
            .map(|mut g| {
                g.sort_unstable();
                g.into_boxed_slice()
            })
            .collect();
        combined.sort_unstable();
        Self {
            distinct: distinct.into_boxed_slice(),
            combined: combined.into_boxed_slice(),
        }
    }

    pub fn distinct_slice(&self) -> &[PointId] {
        &self.distinct
    }

    pub fn group_slices(&self) -> impl Iterator<Item = &[PointId]> + '_ {
        self.combined.iter().map(|g| &g[..])
    }

    pub fn to_set(&self) -> SkylineSet {
        SkylineSet::from_parts(
            self.distinct.iter().copied().collect(),
            self.combined.iter().map(|g| g.iter().copied().collect()),
        )
    }
}

impl SkylineRead for CompactSkyline {
    fn distinct(&self) -> impl Iterator<Item = PointId> + '_ {
        self.distinct.iter().copied()
    }

    fn groups(&self) -> impl Iterator<Item = GroupRef<'_>> + '_ {
        self.combined.iter().map(|g| GroupRef::Slice(&g[..]))
    }

    fn distinct_len(&self) -> usize {
        self.distinct.len()
    }

    fn group_count(&self) -> usize {
        self.combined.len()
    }
}

impl DebugInvariants for CompactSkyline {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        ensure(self.distinct.is_sorted(), || "distinct ids not sorted".into())?;
        ensure(self.combined.iter().all(|g| g.is_sorted()), || {
            "group members not sorted".into()
        })?;
        validate_parts(SkylineRead::distinct(self), self.groups())
    }
}

/// Skyline of a lattice node, in build-time or finalized form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Skyline {
    Growable(SkylineSet),
    Compacted(CompactSkyline),
}

impl Default for Skyline {
    fn default() -> Self {
        Skyline::Growable(SkylineSet::new())
    }
}

impl Skyline {
    /// Convert to the compact form; idempotent.
    pub fn finalize(&mut self) {
        if let Skyline::Growable(set) = self {
            let set = std::mem::take(set);
            *self = Skyline::Compacted(set.into_compact());
        }
    }

    pub fn is_compacted(&self) -> bool {
        matches!(self, Skyline::Compacted(_))
    }

    pub fn as_compact(&self) -> Option<&CompactSkyline> {
        match self {
            Skyline::Compacted(c) => Some(c),
            Skyline::Growable(_) => None,
        }
    }
}

impl SkylineRead for Skyline {
    fn distinct(&self) -> impl Iterator<Item = PointId> + '_ {
        match self {
            Skyline::Growable(s) => Either::Left(SkylineRead::distinct(s)),
            Skyline::Compacted(c) => Either::Right(SkylineRead::distinct(c)),
        }
    }

    fn groups(&self) -> impl Iterator<Item = GroupRef<'_>> + '_ {
        match self {
            Skyline::Growable(s) => Either::Left(s.groups()),
            Skyline::Compacted(c) => Either::Right(c.groups()),
        }
    }

    fn distinct_len(&self) -> usize {
        match self {
            Skyline::Growable(s) => s.distinct_len(),
            Skyline::Compacted(c) => c.distinct_len(),
        }
    }

    fn group_count(&self) -> usize {
        match self {
            Skyline::Growable(s) => s.group_count(),
            Skyline::Compacted(c) => c.group_count(),
        }
    }
}

impl DebugInvariants for Skyline {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        match self {
            Skyline::Growable(s) => s.validate_invariants(),
            Skyline::Compacted(c) => c.validate_invariants(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<PointId> {
        raw.iter().copied().map(PointId::new).collect()
    }

    #[test]
    fn singleton_groups_become_distinct() {
        let set = SkylineSet::from_groups([ids(&[3]), ids(&[1, 2]), ids(&[0])]);
        assert_eq!(set.distinct_set().len(), 2);
        assert_eq!(set.group_count(), 1);
        assert_eq!(set.covered_len(), 4);
        assert!(set.covers(PointId::new(2)));
        set.validate_invariants().unwrap();
    }

    #[test]
    fn signature_is_canonical() {
        let a = CompactSkyline::new(ids(&[4, 0]), vec![ids(&[3, 2]), ids(&[1, 5])]);
        let b = SkylineSet::from_groups([ids(&[2, 3]), ids(&[0]), ids(&[5, 1]), ids(&[4])])
            .into_compact();
        assert_eq!(a, b);
        assert_eq!(a.signature(), b);
        assert_eq!(a.to_set().into_compact(), a);
    }

    #[test]
    fn finalize_keeps_content() {
        let mut sky = Skyline::Growable(SkylineSet::from_groups([ids(&[1]), ids(&[2, 3])]));
        let before = sky.signature();
        sky.finalize();
        assert!(sky.is_compacted());
        assert_eq!(sky.as_compact(), Some(&before));
        sky.finalize();
        assert_eq!(sky.first_distinct(), Some(PointId::new(1)));
        let g = sky.first_group().unwrap();
        assert_eq!(g.representative(), Some(PointId::new(2)));
        assert!(g.contains(PointId::new(3)));
    }

    #[test]
    fn invariants_catch_overlap_and_small_groups() {
        let overlapping = CompactSkyline::new(ids(&[1]), vec![ids(&[1, 2])]);
        assert!(overlapping.validate_invariants().is_err());
        let lonely = CompactSkyline::new(vec![], vec![ids(&[7])]);
        assert!(matches!(
            lonely.validate_invariants(),
            Err(SkycubeError::InvariantViolation(_))
        ));
    }

    #[test]
    fn all_distinct_covers_every_point() {
        let set = SkylineSet::all_distinct(4);
        assert_eq!(set.flatten().len(), 4);
        assert_eq!(set.group_count(), 0);
    }
}
