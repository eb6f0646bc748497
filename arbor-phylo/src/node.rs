#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt::{Display, Formatter};

/// A stable handle to a [`Node`] inside a [`NodeArena`](crate::NodeArena).
///
/// Handles are positions in the arena, they are not the pre-order or post-order ids
/// assigned by [`Tree::index`](crate::Tree::index).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct NodeId(pub(crate) usize);

#[rustfmt::skip]
impl NodeId { pub fn index(&self) -> usize { self.0 } }
#[rustfmt::skip]
impl Display for NodeId { fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) } }

/// A [`Node`] in the [`Tree`](crate::Tree), either a leaf or an internal node.
///
/// Parent and child links are handles into the owning [`NodeArena`](crate::NodeArena).
/// They can only be changed through the arena, which guarantees that every non-root node
/// has exactly one parent.
///
/// The index fields (ids, depth and subtree aggregates) are written by
/// [`Tree::index`](crate::Tree::index) and are stale or unset otherwise.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node {
    pub(crate) id: NodeId,
    label: String,
    /// Length of the branch to the parent.
    branch_length: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) preorder_id: Option<usize>,
    pub(crate) postorder_id: Option<usize>,
    pub(crate) depth: usize,
    /// Total branch length strictly below this node.
    pub(crate) subtree_branch_length: f64,
    /// Number of nodes strictly below this node.
    pub(crate) num_nodes: usize,
    /// Number of leaves below this node, a leaf counts itself.
    pub(crate) num_leaves: usize,
}

#[rustfmt::skip]
impl Display for Node { fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.label) } }

/// Only the post-order id and the label take part in the comparison.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.postorder_id == other.postorder_id && self.label == other.label
    }
}

impl Node {
    /// Returns a detached [`Node`] with an empty label, zero branch length and unset ids.
    pub(crate) fn new(id: NodeId) -> Self {
        Node {
            id,
            label: String::default(),
            branch_length: 0.0,
            parent: None,
            children: Vec::new(),
            preorder_id: None,
            postorder_id: None,
            depth: 0,
            subtree_branch_length: 0.0,
            num_nodes: 0,
            num_leaves: 0,
        }
    }

    /// Returns the handle of this node in its arena.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label<S: Into<String>>(&mut self, label: S) {
        self.label = label.into();
    }

    /// Returns the length of the branch to the parent, `0.0` if unset.
    pub fn branch_length(&self) -> f64 {
        self.branch_length
    }

    pub fn set_branch_length(&mut self, length: f64) {
        self.branch_length = length;
    }

    /// Returns the handle of the parent, [`None`] for a root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child handles in Newick (left to right) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn preorder_id(&self) -> Option<usize> {
        self.preorder_id
    }

    pub fn postorder_id(&self) -> Option<usize> {
        self.postorder_id
    }

    /// Returns the number of branches between this node and the root.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn subtree_branch_length(&self) -> f64 {
        self.subtree_branch_length
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
