use crate::{Node, NodeArena, NodeId};

use color_eyre::eyre::{eyre, Report, Result};
use petgraph::visit::Walker;
use std::fmt::{Display, Formatter};


/// Depth-first visiting order of a [`Traversal`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    /// A node, then the subtrees of its children from left to right.
    PreOrder,
    /// The subtrees of the children from left to right, then the node.
    #[default]
    PostOrder,
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let order = match self {
            Order::PreOrder => "pre-order",
            Order::PostOrder => "post-order",
        };
        write!(f, "{order}")
    }
}

/// A depth-first walk over the subtree of a start node.
///
/// Like petgraph's [`Dfs`](petgraph::visit::Dfs), the walker keeps only its own stack and
/// borrows the arena for one step at a time, through [`Walker::walk_next`]. The same walker
/// therefore drives read-only iteration and in-place updates between steps. The stack holds
/// `(node, children_queued)` entries, so tree depth never grows the call stack.
///
/// Every call to [`Traversal::new`] starts a fresh, independent walk.
///
/// ## Examples
///
/// Read-only iteration as a standard [`Iterator`].
///
/// ```rust
/// use arbor_phylo::{newick, Order, Traversal};
/// use petgraph::visit::Walker;
///
/// let tree = newick::parse_newick("((A,B)C,D)E;")?;
/// let walk = Traversal::new(tree.arena(), tree.root(), Order::PreOrder)?;
/// let labels: Vec<_> = walk.iter(tree.arena()).map(|id| tree[id].label()).collect();
/// assert_eq!(labels, ["E", "C", "A", "B", "D"]);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
///
/// Mutable updates between steps.
///
/// ```rust
/// use arbor_phylo::{newick, Order, Traversal};
/// use petgraph::visit::Walker;
///
/// let mut tree = newick::parse_newick("((A,B)C,D)E;")?;
/// let mut walk = Traversal::new(tree.arena(), tree.root(), Order::PostOrder)?;
/// while let Some(id) = walk.walk_next(tree.arena()) {
///     tree[id].set_branch_length(1.0);
/// }
/// assert_eq!(tree.iter().map(|n| n.branch_length()).sum::<f64>(), 5.0);
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Clone, Debug)]
pub struct Traversal {
    order: Order,
    stack: Vec<(NodeId, bool)>,
}

impl Traversal {
    /// Returns a new walk over the subtree of `start`.
    ///
    /// - If `start` is not in the arena, returns an Error.
    pub fn new(arena: &NodeArena, start: NodeId, order: Order) -> Result<Self, Report> {
        match arena.contains(start) {
            true => Ok(Traversal::unchecked(start, order)),
            false => Err(eyre!("Failed to start a {order} traversal, node {start} is not in the tree.")),
        }
    }

    /// Starts a walk from a node known to be live, such as the root of a [`Tree`](crate::Tree).
    pub(crate) fn unchecked(start: NodeId, order: Order) -> Self {
        Traversal { order, stack: vec![(start, false)] }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Turns the walk into an iterator of node references.
    pub fn nodes(self, arena: &NodeArena) -> NodeIter<'_> {
        NodeIter { walk: self, arena }
    }

    fn queue_children(&mut self, node: &Node) {
        // reversed, so that the leftmost child is on top of the stack
        self.stack.extend(node.children.iter().rev().map(|child| (*child, false)));
    }
}

impl<'a> Walker<&'a NodeArena> for Traversal {
    type Item = NodeId;

    fn walk_next(&mut self, arena: &'a NodeArena) -> Option<NodeId> {
        while let Some((id, queued)) = self.stack.pop() {
            let Some(node) = arena.get(id) else { continue };
            match (self.order, queued) {
                (Order::PreOrder, _) => {
                    self.queue_children(node);
                    return Some(id);
                }
                (Order::PostOrder, false) => {
                    self.stack.push((id, true));
                    self.queue_children(node);
                }
                (Order::PostOrder, true) => return Some(id),
            }
        }
        None
    }
}

/// An [`Iterator`] of node references produced by a [`Traversal`].
#[derive(Clone, Debug)]
pub struct NodeIter<'a> {
    walk: Traversal,
    arena: &'a NodeArena,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let arena = self.arena;
        self.walk.walk_next(arena).and_then(|id| arena.get(id))
    }
}
