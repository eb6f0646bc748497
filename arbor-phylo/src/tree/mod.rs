use crate::{lca, newick, FromNewick, Node, NodeArena, NodeId, NodeIter, Order, ToNewick, Traversal};

use color_eyre::eyre::{eyre, Report, Result};
use log::debug;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{EdgeReference, Graph, NodeIndex};
use petgraph::visit::Walker;
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

#[cfg(test)]
mod tests;

/// An indexed phylogenetic [`Tree`].
///
/// ## Introduction
///
/// - The tree owns a [`NodeArena`] with every node, and the handle of the root.
/// - Construction runs [`Tree::index`], which assigns pre-order and post-order ids, depths
///   and subtree aggregates, and builds the id and label lookup tables.
/// - The topology can't be edited in place. Node fields can be updated through
///   [`Tree::node_mut`], and [`Tree::set_root`] swaps in a whole new structure.
///
/// ```mermaid
/// graph TD;
///   Root-->N3;
///   Root-->N4;
///   N3-->N1;
///   N3-->N2;
///   N1-->A;
///   N1-->B;
///   N2-->C;
///   N2-->D;
///   N4-->E;
///   N4-->F;
///   N4-->G;
/// ```
///
/// ```rust
/// let tree = arbor_phylo::examples::example_1()?;
/// assert_eq!(tree.node_count(), 12);
/// assert_eq!(tree.get_by_label("N4").map(|n| n.num_leaves()), Some(3));
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Debug)]
pub struct Tree {
    arena: NodeArena,
    root: NodeId,
    /// Total number of nodes reachable from the root.
    node_count: usize,
    /// Node handles by pre-order id.
    preorder: Vec<NodeId>,
    /// Node handles by post-order id.
    postorder: Vec<NodeId>,
    /// Node handles by label, the last visited node wins on duplicates.
    labels: HashMap<String, NodeId>,
}

#[rustfmt::skip]
impl Index<NodeId> for Tree { type Output = Node; fn index(&self, id: NodeId) -> &Node { &self.arena[id] } }
#[rustfmt::skip]
impl IndexMut<NodeId> for Tree { fn index_mut(&mut self, id: NodeId) -> &mut Node { &mut self.arena[id] } }
#[rustfmt::skip]
impl Clone for Tree { fn clone(&self) -> Self { self.copy() } }

impl<'t> IntoIterator for &'t Tree {
    type Item = &'t Node;
    type IntoIter = NodeIter<'t>;

    /// Visits every node in post-order from the root.
    fn into_iter(self) -> NodeIter<'t> {
        self.iter()
    }
}

impl Tree {
    /// Returns a new [`Tree`] that owns `arena`, rooted at `root`, and indexes it.
    ///
    /// - If `root` has a parent, returns an Error.
    /// - If `root` is not in the arena, returns an Error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::{NodeArena, Tree};
    ///
    /// let mut arena = NodeArena::new();
    /// let root = arena.add_node("R", 0.0);
    /// let a = arena.add_node("A", 1.5);
    /// arena.add_child(root, a)?;
    ///
    /// // a tree can't be rooted at a node that has a parent
    /// assert!(Tree::new(arena.clone(), a).is_err());
    ///
    /// let tree = Tree::new(arena, root)?;
    /// assert_eq!(tree.node_count(), 2);
    /// assert_eq!(tree.root_node().subtree_branch_length(), 1.5);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn new(arena: NodeArena, root: NodeId) -> Result<Self, Report> {
        let root_node = arena
            .get(root)
            .ok_or_else(|| eyre!("Failed to create a tree, root node {root} is not in the arena."))?;
        if let Some(parent) = root_node.parent() {
            Err(eyre!(
                "Failed to create a tree from non-root node {root}: it is owned by node {parent}."
            ))?
        }
        Ok(Tree::from_root(arena, root))
    }

    /// Builds and indexes a tree from a root already known to have no parent.
    fn from_root(arena: NodeArena, root: NodeId) -> Self {
        let mut tree = Tree {
            arena,
            root,
            node_count: 0,
            preorder: Vec::new(),
            postorder: Vec::new(),
            labels: HashMap::new(),
        };
        tree.reindex();
        tree
    }

    /// Replaces the whole node structure with `arena` rooted at `root`, and re-indexes.
    ///
    /// - If `root` has a parent or is not in the arena, returns an Error and the current
    ///   tree is left untouched.
    pub fn set_root(&mut self, arena: NodeArena, root: NodeId) -> Result<(), Report> {
        *self = Tree::new(arena, root)?;
        Ok(())
    }

    /// Returns an independent deep copy of the tree, with its own indices.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// let tree = arbor_phylo::examples::example_2()?;
    /// let mut copy = tree.copy();
    /// let a = copy.get_by_label("A").map(|n| n.id()).unwrap();
    /// copy[a].set_label("X");
    /// assert!(tree.get_by_label("A").is_some());
    /// assert_eq!(tree.node_count(), copy.node_count());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn copy(&self) -> Tree {
        let (arena, root) = self.arena.copy_from(self.root);
        Tree::from_root(arena, root)
    }

    // ------------------------------------------------------------------------
    // Indexing

    /// Recomputes every index of the tree from the current node structure.
    ///
    /// Runs, in order: pre-order ids, post-order ids, labels, depths and subtree
    /// aggregates. Ids and labels fetched before this call may no longer resolve.
    pub fn index(&mut self) -> Result<(), Report> {
        if let Some(parent) = self.arena[self.root].parent() {
            Err(eyre!("Failed to index tree, the root is owned by node {parent}."))?
        }
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index_preorder_ids();
        self.index_postorder_ids();
        self.index_labels();
        self.index_depth();
        self.index_nodes();
        debug!("Indexed a tree of {} nodes.", self.node_count);
    }

    fn index_preorder_ids(&mut self) {
        self.preorder.clear();
        let mut walk = Traversal::unchecked(self.root, Order::PreOrder);
        while let Some(id) = walk.walk_next(&self.arena) {
            self.arena[id].preorder_id = Some(self.preorder.len());
            self.preorder.push(id);
        }
    }

    fn index_postorder_ids(&mut self) {
        self.postorder.clear();
        let mut walk = Traversal::unchecked(self.root, Order::PostOrder);
        while let Some(id) = walk.walk_next(&self.arena) {
            self.arena[id].postorder_id = Some(self.postorder.len());
            self.postorder.push(id);
        }
    }

    fn index_labels(&mut self) {
        self.labels.clear();
        for node in Traversal::unchecked(self.root, Order::PostOrder).nodes(&self.arena) {
            self.labels.insert(node.label().to_string(), node.id());
        }
    }

    /// Parents come before children in pre-order, so one pass sets every depth.
    fn index_depth(&mut self) {
        let mut walk = Traversal::unchecked(self.root, Order::PreOrder);
        while let Some(id) = walk.walk_next(&self.arena) {
            let depth = match self.arena[id].parent() {
                Some(parent) => self.arena[parent].depth + 1,
                None => 0,
            };
            self.arena[id].depth = depth;
        }
    }

    /// Children come before parents in post-order, so their aggregates are ready.
    fn index_nodes(&mut self) {
        self.node_count = 0;
        let mut walk = Traversal::unchecked(self.root, Order::PostOrder);
        while let Some(id) = walk.walk_next(&self.arena) {
            self.node_count += 1;

            let (mut num_nodes, mut num_leaves, mut length) = (0, 0, 0.0);
            match self.arena[id].is_leaf() {
                true => num_leaves = 1,
                false => {
                    for child in self.arena[id].children() {
                        let child = &self.arena[*child];
                        num_nodes += 1 + child.num_nodes;
                        num_leaves += child.num_leaves;
                        length += child.branch_length() + child.subtree_branch_length;
                    }
                }
            }

            let node = &mut self.arena[id];
            node.num_nodes = num_nodes;
            node.num_leaves = num_leaves;
            node.subtree_branch_length = length;
        }
    }

    // ------------------------------------------------------------------------
    // Access

    /// Returns the arena that owns the nodes of the tree.
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.arena[self.root]
    }

    /// Returns the total number of nodes, as counted by the last [`Tree::index`].
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Returns a node for field updates. Label changes are visible to
    /// [`Tree::get_by_label`] after the next [`Tree::index`].
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.arena.get_mut(id)
    }

    /// Returns true if the root has fewer than 3 children.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::{FromNewick, Tree};
    /// assert!(Tree::from_newick("((A,B),C);")?.is_rooted());
    /// assert!(!Tree::from_newick("(A,B,C);")?.is_rooted());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn is_rooted(&self) -> bool {
        self.root_node().children().len() < 3
    }

    /// Returns the node with a pre-order id, in O(1).
    pub fn get_by_preorder_id(&self, preorder_id: usize) -> Option<&Node> {
        self.preorder.get(preorder_id).and_then(|id| self.arena.get(*id))
    }

    /// Returns the node with a post-order id, in O(1).
    ///
    /// ## Examples
    ///
    /// ```rust
    /// let tree = arbor_phylo::examples::example_2()?;
    /// assert_eq!(tree.get_by_postorder_id(0).map(|n| n.label()), Some("A"));
    /// assert_eq!(tree.get_by_postorder_id(2).map(|n| n.label()), Some(""));
    /// assert!(tree.get_by_postorder_id(7).is_none());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn get_by_postorder_id(&self, postorder_id: usize) -> Option<&Node> {
        self.postorder.get(postorder_id).and_then(|id| self.arena.get(*id))
    }

    /// Returns the node with a label. If several nodes share the label, returns the one
    /// visited last in post-order.
    pub fn get_by_label(&self, label: &str) -> Option<&Node> {
        self.labels.get(label).and_then(|id| self.arena.get(*id))
    }

    // ------------------------------------------------------------------------
    // Traversal

    /// Visits every node in post-order from the root.
    pub fn iter(&self) -> NodeIter<'_> {
        Traversal::unchecked(self.root, Order::PostOrder).nodes(&self.arena)
    }

    /// Visits the subtree of `start`, including `start`, in pre-order.
    ///
    /// - If `start` is not in the tree, returns an Error.
    pub fn preorder(&self, start: NodeId) -> Result<NodeIter<'_>, Report> {
        Ok(Traversal::new(&self.arena, start, Order::PreOrder)?.nodes(&self.arena))
    }

    /// Visits the subtree of `start`, including `start`, in post-order.
    ///
    /// - If `start` is not in the tree, returns an Error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// let tree = arbor_phylo::examples::example_1()?;
    /// let n3 = tree.get_by_label("N3").unwrap().id();
    /// let labels: Vec<_> = tree.postorder(n3)?.map(|n| n.label()).collect();
    /// assert_eq!(labels, ["A", "B", "N1", "C", "D", "N2", "N3"]);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn postorder(&self, start: NodeId) -> Result<NodeIter<'_>, Report> {
        Ok(Traversal::new(&self.arena, start, Order::PostOrder)?.nodes(&self.arena))
    }

    /// Applies `f` to every node of the subtree of `start`, in the requested order.
    ///
    /// - If `start` is not in the tree, returns an Error.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use arbor_phylo::Order;
    /// let mut tree = arbor_phylo::examples::example_2()?;
    /// let root = tree.root();
    /// tree.visit_mut(root, Order::PreOrder, |node| {
    ///     let length = node.branch_length();
    ///     node.set_branch_length(length * 2.0);
    /// })?;
    /// tree.index()?;
    /// assert!((tree.root_node().subtree_branch_length() - 2.1).abs() < 1e-9);
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn visit_mut<F>(&mut self, start: NodeId, order: Order, mut f: F) -> Result<(), Report>
    where
        F: FnMut(&mut Node),
    {
        let mut walk = Traversal::new(&self.arena, start, order)?;
        while let Some(id) = walk.walk_next(&self.arena) {
            f(&mut self.arena[id]);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Queries

    /// Returns the lowest common ancestor of two nodes of this tree.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// let tree = arbor_phylo::examples::example_1()?;
    /// let a = tree.get_by_label("A").unwrap();
    /// let d = tree.get_by_label("D").unwrap();
    /// assert_eq!(tree.lca(a, d).map(|n| n.label()), Some("N3"));
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn lca<'t>(&'t self, x: &'t Node, y: &'t Node) -> Option<&'t Node> {
        lca::lca(&self.arena, x, y)
    }

    /// Returns the lowest common ancestor of all `nodes`, [`None`] if there are none.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// let tree = arbor_phylo::examples::example_1()?;
    /// let nodes: Vec<_> = ["A", "C", "E"].iter().filter_map(|l| tree.get_by_label(l)).collect();
    /// assert_eq!(tree.lca_all(nodes).map(|n| n.label()), Some("Root"));
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    pub fn lca_all<'t, I>(&'t self, nodes: I) -> Option<&'t Node>
    where
        I: IntoIterator<Item = &'t Node>,
    {
        lca::lca_all(&self.arena, nodes)
    }

    // ------------------------------------------------------------------------
    // Export

    /// Returns the tree as a directed [`Graph`] of labels and branch lengths, with nodes
    /// added in pre-order (the graph index of a node is its pre-order id).
    pub fn to_graph(&self) -> Graph<String, f64> {
        let mut graph = Graph::with_capacity(self.node_count, self.node_count.saturating_sub(1));
        let mut indices: HashMap<NodeId, NodeIndex> = HashMap::new();
        for node in Traversal::unchecked(self.root, Order::PreOrder).nodes(&self.arena) {
            let index = graph.add_node(node.label().to_string());
            if let Some(parent) = node.parent().and_then(|p| indices.get(&p)) {
                graph.add_edge(*parent, index, node.branch_length());
            }
            indices.insert(node.id(), index);
        }
        graph
    }

    /// Returns the tree as a [Dot](https://graphviz.org/doc/info/lang.html) graphviz String.
    ///
    /// ```rust
    /// use arbor_phylo::{FromNewick, Tree};
    /// let tree = Tree::from_newick("(A:1,B:2)R;")?;
    /// println!("{}", tree.to_dot());
    /// # Ok::<(), color_eyre::eyre::Report>(())
    /// ```
    ///
    /// ```test
    /// digraph {
    ///     rankdir="LR"
    ///     0 [ label="R" ]
    ///     1 [ label="A" ]
    ///     2 [ label="B" ]
    ///     0 -> 1 [ label="1" ]
    ///     0 -> 2 [ label="2" ]
    /// }
    /// ```
    pub fn to_dot(&self) -> String {
        let graph = self.to_graph();
        let config = &[Config::NodeNoLabel, Config::EdgeNoLabel];
        let edges = |_, e: EdgeReference<'_, f64>| format!("label=\"{}\" ", e.weight());
        let nodes = |_, (_i, label): (NodeIndex, &String)| format!("label={label:?} ");
        let dot = Dot::with_attr_getters(&graph, config, &edges, &nodes).to_string();

        // add direction LR
        dot.replace("digraph {", "digraph {\n    rankdir=\"LR\"")
    }
}

impl FromNewick for Tree {
    /// Returns a [`Tree`] parsed from a [Newick](https://en.wikipedia.org/wiki/Newick_format) string.
    fn from_newick(newick: &str) -> Result<Tree, Report> {
        newick::parse_newick(newick)
    }
}

impl ToNewick for Tree {
    /// Returns the tree as plain Newick, without post-order ids.
    fn to_newick(&self) -> Result<String, Report> {
        Ok(newick::to_newick(self, false))
    }
}
