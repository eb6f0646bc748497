use crate::{Node, NodeId, Order, Traversal};

use color_eyre::eyre::{eyre, Report, Result};
use petgraph::visit::Walker;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};


/// Owning storage for the [`Node`]s of one tree-shaped structure.
///
/// Nodes are addressed by [`NodeId`] handles that stay valid until the node is moved out
/// with [`NodeArena::remove_child`]. Parent and child links can only be created and removed
/// here, so every non-root node has exactly one parent and there are no cycles.
///
/// Dropping the arena drops every node in a flat loop, regardless of tree depth.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
}

impl Index<NodeId> for NodeArena {
    type Output = Node;
    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("Node {id} is not in the arena."),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("Node {id} is not in the arena."),
        }
    }
}

impl NodeArena {
    /// Returns a new empty [`NodeArena`].
    pub fn new() -> Self {
        NodeArena { slots: Vec::new() }
    }

    /// Adds a detached node and returns its handle.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::NodeArena;
    /// let mut arena = NodeArena::new();
    /// let a = arena.add_node("A", 0.5);
    /// assert_eq!(arena[a].label(), "A");
    /// assert!(arena[a].is_root() && arena[a].is_leaf());
    /// assert_eq!(arena[a].postorder_id(), None);
    /// ```
    pub fn add_node<S: Into<String>>(&mut self, label: S, branch_length: f64) -> NodeId {
        let id = NodeId(self.slots.len());
        let mut node = Node::new(id);
        node.set_label(label);
        node.set_branch_length(branch_length);
        self.slots.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of nodes currently owned by the arena.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all owned nodes in the order they were added.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Appends `child` to the children of `parent` and sets the parent of `child`.
    ///
    /// - If `child` already has a parent, returns an Error.
    /// - If the new branch would create a cycle, returns an Error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::NodeArena;
    /// let mut arena = NodeArena::new();
    /// let root = arena.add_node("R", 0.0);
    /// let a = arena.add_node("A", 1.0);
    /// let b = arena.add_node("B", 2.0);
    /// arena.add_child(root, a)?;
    /// arena.add_child(root, b)?;
    /// assert_eq!(arena[root].children(), [a, b]);
    /// assert_eq!(arena[b].parent(), Some(root));
    ///
    /// // a node is owned by exactly one parent
    /// assert!(arena.add_child(a, b).is_err());
    /// // and can't become its own ancestor
    /// assert!(arena.add_child(a, root).is_err());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Report> {
        if parent == child {
            Err(eyre!("Failed to add node {child} as a child of itself."))?
        }
        if !self.contains(parent) {
            Err(eyre!("Failed to add child, parent node {parent} is not in the arena."))?
        }
        let child_node = self
            .get(child)
            .ok_or_else(|| eyre!("Failed to add child, node {child} is not in the arena."))?;
        if let Some(owner) = child_node.parent {
            Err(eyre!("Failed to add child, node {child} is already owned by node {owner}."))?
        }

        // walk up from the parent, the child must not be one of its ancestors
        // (a leaf is nobody's ancestor)
        if !child_node.children.is_empty() {
            let mut ancestor = Some(parent);
            while let Some(id) = ancestor {
                if id == child {
                    Err(eyre!("New branch between {parent} and {child} introduced a cycle."))?
                }
                ancestor = self[id].parent;
            }
        }

        self[child].parent = Some(parent);
        self[parent].children.push(child);
        Ok(())
    }

    /// Detaches `child` from `parent` and moves its whole subtree into a new arena.
    ///
    /// Returns the new arena and the handle of the detached subtree root within it. The
    /// handles of the moved nodes are no longer valid in `self`.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::NodeArena;
    /// let mut arena = NodeArena::new();
    /// let root = arena.add_node("R", 0.0);
    /// let a = arena.add_node("A", 1.0);
    /// let b = arena.add_node("B", 2.0);
    /// arena.add_child(root, a)?;
    /// arena.add_child(a, b)?;
    ///
    /// let (subtree, a_root) = arena.remove_child(root, a)?;
    /// assert!(arena[root].is_leaf());
    /// assert!(!arena.contains(b));
    /// assert_eq!(subtree.len(), 2);
    /// assert!(subtree[a_root].is_root());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn remove_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(NodeArena, NodeId), Report> {
        let is_child = self.get(child).map(|node| node.parent == Some(parent)).unwrap_or(false);
        if !is_child {
            Err(eyre!("Failed to remove node {child}, it is not a child of node {parent}."))?
        }

        let (subtree, root) = self.copy_subtree(child)?;
        let moved: Vec<NodeId> = Traversal::new(self, child, Order::PreOrder)?.iter(&*self).collect();
        moved.into_iter().for_each(|id| self.slots[id.0] = None);
        self[parent].children.retain(|id| *id != child);

        Ok((subtree, root))
    }

    /// Returns a deep copy of the subtree rooted at `root` in a new arena.
    ///
    /// The copy keeps labels, branch lengths, child order and the cached index fields; the
    /// root of the copy has no parent.
    pub fn copy_subtree(&self, root: NodeId) -> Result<(NodeArena, NodeId), Report> {
        match self.contains(root) {
            true => Ok(self.copy_from(root)),
            false => Err(eyre!("Failed to copy subtree, node {root} is not in the arena.")),
        }
    }

    /// Copies the subtree of a node known to be live.
    pub(crate) fn copy_from(&self, root: NodeId) -> (NodeArena, NodeId) {
        let mut copy = NodeArena::new();
        let mut id_map: HashMap<NodeId, NodeId> = HashMap::new();

        // pre-order guarantees that a parent is copied before its children
        let mut walk = Traversal::unchecked(root, Order::PreOrder);
        while let Some(old_id) = walk.walk_next(self) {
            let new_id = NodeId(copy.slots.len());
            let mut node = self[old_id].clone();
            node.id = new_id;
            node.children.clear();
            node.parent = match old_id == root {
                true => None,
                false => node.parent.and_then(|p| id_map.get(&p).copied()),
            };
            if let Some(new_parent) = node.parent {
                copy[new_parent].children.push(new_id);
            }
            copy.slots.push(Some(node));
            id_map.insert(old_id, new_id);
        }

        (copy, NodeId(0))
    }
}
