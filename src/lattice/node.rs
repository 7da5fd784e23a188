//! Arena of lattice nodes.
//!
//! Every node is owned by the [`LatticeTree`] and addressed by [`NodeId`];
//! parent and child links are ids into the same arena, so the tree is dropped
//! as one unit. Children of a node are stored in increasing order of the
//! dimension they add, and every node gets all of its children or none, which
//! makes [`LatticeTree::child`] a direct index.

use crate::debug_invariants::{DebugInvariants, ensure};
use crate::lattice::path::Path;
use crate::lattice::skyline::{Skyline, SkylineRead};
use crate::skycube_error::SkycubeError;
use std::fmt;

/// Index of a node in its [`LatticeTree`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeId index overflow");
        NodeId(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One subset's entry in the traversal tree.
#[derive(Clone, Debug)]
pub struct LatticeNode {
    path: Path,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    type1: bool,
    complete: bool,
    skyline: Skyline,
}

impl LatticeNode {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Last dimension of the path; children extend beyond it.
    pub fn offset(&self) -> Option<usize> {
        self.path.last()
    }

    /// Subset size.
    pub fn level(&self) -> usize {
        self.path.len()
    }

    /// Skyline derived from the parent by set algebra alone.
    pub fn is_type1(&self) -> bool {
        self.type1
    }

    /// Skyline covers every point of the table.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn skyline(&self) -> &Skyline {
        &self.skyline
    }
}

/// Arena-backed subset tree rooted at the empty path.
#[derive(Clone, Debug)]
pub struct LatticeTree {
    nodes: Vec<LatticeNode>,
}

impl LatticeTree {
    /// Tree holding only the root (empty path, empty skyline).
    pub fn new() -> Self {
        Self {
            nodes: vec![LatticeNode {
                path: Path::root(),
                parent: None,
                children: Vec::new(),
                type1: false,
                complete: false,
                skyline: Skyline::default(),
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &LatticeNode {
        &self.nodes[id.index()]
    }

    /// Append a child extending `parent` with `dim`, the skyline finalized.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        dim: usize,
        mut skyline: Skyline,
        type1: bool,
        complete: bool,
    ) -> NodeId {
        let path = self.nodes[parent.index()].path.extended(dim);
        debug_assert!(
            self.child(parent, dim).is_none(),
            "child {path} created twice"
        );
        skyline.finalize();
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(LatticeNode {
            path,
            parent: Some(parent),
            children: Vec::new(),
            type1,
            complete,
            skyline,
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Child of `id` that adds dimension `dim`.
    pub fn child(&self, id: NodeId, dim: usize) -> Option<NodeId> {
        let node = self.node(id);
        let pos = dim.checked_sub(node.path.next_dim())?;
        let child = *node.children.get(pos)?;
        (self.node(child).offset() == Some(dim)).then_some(child)
    }

    /// Node holding `path`, found by walking down from the root.
    pub fn find(&self, path: &Path) -> Option<NodeId> {
        path.dims()
            .iter()
            .try_fold(self.root(), |id, &d| self.child(id, d))
    }

    /// Non-root nodes in pre-order (parent, then children by added dimension).
    pub fn pre_order(&self) -> PreOrder<'_> {
        let mut stack: Vec<NodeId> = self.node(self.root()).children.clone();
        stack.reverse();
        PreOrder { tree: self, stack }
    }

    /// Non-root nodes by subset size, lexicographic inside one size.
    pub fn level_order(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = (1..self.nodes.len()).map(NodeId::new).collect();
        ids.sort_by(|a, b| {
            let (pa, pb) = (&self.node(*a).path, &self.node(*b).path);
            pa.len().cmp(&pb.len()).then_with(|| pa.cmp(pb))
        });
        ids
    }

    /// Non-root nodes of one subset size, in arena order.
    pub fn level(&self, size: usize) -> impl Iterator<Item = NodeId> + '_ {
        (1..self.nodes.len())
            .map(NodeId::new)
            .filter(move |id| self.node(*id).level() == size)
    }

    /// Largest subset size present.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(LatticeNode::level).max().unwrap_or(0)
    }
}

impl Default for LatticeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`LatticeTree::pre_order`].
pub struct PreOrder<'a> {
    tree: &'a LatticeTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a LatticeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}

impl DebugInvariants for LatticeTree {
    fn validate_invariants(&self) -> Result<(), SkycubeError> {
        let root = self.node(self.root());
        ensure(root.path.is_empty() && root.parent.is_none(), || {
            "root must hold the empty path".into()
        })?;
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            let Some(parent) = node.parent else {
                return Err(SkycubeError::InvariantViolation(format!(
                    "node {i} ({}) has no parent",
                    node.path
                )));
            };
            let pnode = self.node(parent);
            let dim = node.offset().unwrap_or(0);
            ensure(
                !node.path.is_empty()
                    && pnode.path.next_dim() <= dim
                    && pnode.path.extended(dim) == node.path,
                || format!("{} does not extend its parent {}", node.path, pnode.path),
            )?;
            ensure(
                self.child(parent, dim) == Some(NodeId::new(i)),
                || format!("{} is not reachable from its parent", node.path),
            )?;
            ensure(node.skyline.is_compacted(), || {
                format!("{} holds a growable skyline", node.path)
            })?;
            ensure(!node.skyline.is_empty(), || {
                format!("{} has an empty skyline", node.path)
            })?;
            node.skyline.validate_invariants()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(NodeId, u32);
    assert_eq_size!(Option<NodeId>, u64);
}
