//! Closure table: equivalence classes of subsets sharing one skyline.
//!
//! Closures live in an arena indexed by [`ClosureId`]; a `hashbrown`
//! [`HashTable`] maps a skyline signature to its id. Entries only grow during
//! a run and are dropped together with the table.

use crate::debug_invariants::{DebugInvariants, ensure};
use crate::lattice::path::Path;
use crate::lattice::skyline::CompactSkyline;
use crate::skycube_error::SkycubeError;
use hashbrown::HashTable;
use std::hash::{BuildHasher, RandomState};

/// Index of a closure in its [`ClosureTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ClosureId(u32);

impl ClosureId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Subsets whose skylines share one signature.
#[derive(Clone, Debug)]
pub struct Closure {
    signature: CompactSkyline,
    closed: Vec<Path>,
    generators: Vec<Path>,
    pruned: Vec<bool>,
}

impl Closure {
    fn new(path: Path, signature: CompactSkyline, n_dims: usize) -> Self {
        let mut pruned = vec![false; n_dims];
        for &d in path.dims() {
            pruned[d] = true;
        }
        Self {
            signature,
            closed: vec![path.clone()],
            generators: vec![path],
            pruned,
        }
    }

    pub fn signature(&self) -> &CompactSkyline {
        &self.signature
    }

    /// Maximal member paths.
    pub fn closed_nodes(&self) -> &[Path] {
        &self.closed
    }

    /// Minimal member paths.
    pub fn generators(&self) -> &[Path] {
        &self.generators
    }

    /// Union of the closed nodes' dimensions.
    pub fn pruned_dims(&self) -> &[bool] {
        &self.pruned
    }

    /// `true` when `child`, the parent path plus `dim`, provably keeps this
    /// closure's skyline: `dim` is marked and a closed node contains `child`.
    ///
    /// Any member path lies below `child`, and skylines are convex along
    /// inclusion, so every subset between a member and a closed node shares
    /// the signature.
    pub fn prunes(&self, child: &Path, dim: usize) -> bool {
        self.pruned.get(dim).copied().unwrap_or(false)
            && self.closed.iter().any(|c| child.is_subset_of(c))
    }

    /// Add `path` as a member; returns `true` if it became a closed node.
    fn extend(&mut self, path: Path) -> bool {
        let is_new_closed = !self.closed.iter().any(|c| path.is_subset_of(c));
        if is_new_closed {
            for &d in path.dims() {
                self.pruned[d] = true;
            }
            self.closed.push(path.clone());
        }
        let covered = self
            .generators
            .iter()
            .any(|g| g.is_strict_subset_of(&path) || *g == path);
        if !covered {
            self.generators.retain(|g| !path.is_strict_subset_of(g));
            self.generators.push(path);
        }
        is_new_closed
    }
}

impl DebugInvariants for Closure {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        ensure(!self.closed.is_empty(), || "closure without closed node".into())?;
        ensure(!self.generators.is_empty(), || "closure without generator".into())?;
        for (i, g) in self.generators.iter().enumerate() {
            for h in &self.generators[i + 1..] {
                ensure(!g.is_subset_of(h) && !h.is_subset_of(g), || {
                    format!("generators {g} and {h} are nested")
                })?;
            }
        }
        for c in &self.closed {
            ensure(self.generators.iter().any(|g| g.is_subset_of(c)), || {
                format!("closed node {c} covers no generator")
            })?;
        }
        let mut expected = vec![false; self.pruned.len()];
        for c in &self.closed {
            for &d in c.dims() {
                expected[d] = true;
            }
        }
        ensure(expected == self.pruned, || {
            "pruned dimensions differ from the closed nodes' union".into()
        })?;
        self.signature.validate_invariants()
    }
}

/// Outcome of [`ClosureTable::register`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    Created(ClosureId),
    /// Joined an existing closure; `closed` tells if it became a closed node.
    Extended { id: ClosureId, closed: bool },
}

/// Arena of closures plus the signature lookup.
#[derive(Clone, Debug)]
pub struct ClosureTable {
    n_dims: usize,
    closures: Vec<Closure>,
    table: HashTable<ClosureId>,
    hasher: RandomState,
}

impl ClosureTable {
    pub fn new(n_dims: usize) -> Self {
        Self {
            n_dims,
            closures: Vec::new(),
            table: HashTable::new(),
            hasher: RandomState::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.closures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closures.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ClosureId) -> &Closure {
        &self.closures[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Closure> + '_ {
        self.closures.iter()
    }

    /// Closure whose signature equals `signature`.
    pub fn find(&self, signature: &CompactSkyline) -> Option<ClosureId> {
        let hash = self.hasher.hash_one(signature);
        self.table
            .find(hash, |id| self.closures[id.index()].signature == *signature)
            .copied()
    }

    /// Register `path` under `signature`, creating the closure if needed.
    pub fn register(&mut self, path: Path, signature: &CompactSkyline) -> Registration {
        if let Some(id) = self.find(signature) {
            let closed = self.closures[id.index()].extend(path);
            return Registration::Extended { id, closed };
        }
        let id = ClosureId(self.closures.len() as u32);
        log::debug!("closure {} created by {path}", id.index());
        self.closures
            .push(Closure::new(path, signature.clone(), self.n_dims));
        let hash = self.hasher.hash_one(signature);
        let closures = &self.closures;
        let hasher = &self.hasher;
        self.table.insert_unique(hash, id, |id| {
            hasher.hash_one(&closures[id.index()].signature)
        });
        Registration::Created(id)
    }

    /// Total closed nodes across closures.
    pub fn closed_node_count(&self) -> usize {
        self.closures.iter().map(|c| c.closed.len()).sum()
    }
}

impl DebugInvariants for ClosureTable {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        ensure(self.table.len() == self.closures.len(), || {
            "lookup table and arena disagree".into()
        })?;
        for (i, c) in self.closures.iter().enumerate() {
            ensure(self.find(&c.signature) == Some(ClosureId(i as u32)), || {
                format!("closure {i} is not reachable by its signature")
            })?;
            c.validate_invariants()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::PointId;

    fn p(dims: &[usize]) -> Path {
        Path::from_dims(dims.to_vec()).unwrap()
    }

    fn sig(distinct: &[usize]) -> CompactSkyline {
        CompactSkyline::new(distinct.iter().copied().map(PointId::new).collect(), vec![])
    }

    #[test]
    fn creates_then_extends() {
        let mut table = ClosureTable::new(4);
        let s = sig(&[1, 2]);
        let id = match table.register(p(&[0, 1, 2]), &s) {
            Registration::Created(id) => id,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(table.find(&s), Some(id));
        assert_eq!(table.find(&sig(&[1])), None);
        assert_eq!(
            table.register(p(&[0, 1]), &s),
            Registration::Extended { id, closed: false }
        );
        assert_eq!(
            table.register(p(&[3]), &s),
            Registration::Extended { id, closed: true }
        );
        let c = table.get(id);
        assert_eq!(c.closed_nodes(), &[p(&[0, 1, 2]), p(&[3])]);
        assert_eq!(c.generators(), &[p(&[0, 1]), p(&[3])]);
        assert_eq!(c.pruned_dims(), &[true, true, true, true]);
        assert_eq!(table.closed_node_count(), 2);
        table.validate_invariants().unwrap();
    }

    #[test]
    fn generators_stay_minimal() {
        let mut table = ClosureTable::new(3);
        let s = sig(&[0]);
        table.register(p(&[0, 1, 2]), &s);
        table.register(p(&[0, 2]), &s);
        table.register(p(&[0]), &s);
        // {0} supersedes {0,2}; {1,2} is not above it
        table.register(p(&[1, 2]), &s);
        table.register(p(&[0, 1]), &s);
        let id = table.find(&s).unwrap();
        assert_eq!(table.get(id).generators(), &[p(&[0]), p(&[1, 2])]);
        table.validate_invariants().unwrap();
    }

    #[test]
    fn pruning_needs_a_covering_closed_node() {
        let mut table = ClosureTable::new(4);
        let s = sig(&[3]);
        table.register(p(&[0, 1]), &s);
        table.register(p(&[2, 3]), &s);
        let c = table.get(table.find(&s).unwrap());
        assert!(c.prunes(&p(&[0, 1]), 1));
        assert!(!c.prunes(&p(&[0, 2]), 2));
        assert!(c.prunes(&p(&[3]), 3));
    }
}
