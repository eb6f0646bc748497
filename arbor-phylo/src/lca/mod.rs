//! Lowest common ancestor (LCA) queries over the depth index.
//!
//! Both functions assume the nodes belong to one indexed [`Tree`](crate::Tree), so that
//! [`Node::depth`] is current. A walk costs O(depth).

use crate::{Node, NodeArena};

#[cfg(test)]
mod tests;

/// Returns the lowest common ancestor of `x` and `y`.
///
/// The deeper node is lifted until both are at the same depth, then both are lifted in
/// lock-step until they meet. Returns [`None`] only if a parent link leaves the arena,
/// which can't happen for nodes of the same tree.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::lca;
/// let tree = arbor_phylo::examples::example_1()?;
/// let a = tree.get_by_label("A").unwrap();
/// let b = tree.get_by_label("B").unwrap();
/// let n1 = lca::lca(tree.arena(), a, b).unwrap();
/// assert_eq!(n1.label(), "N1");
///
/// // an ancestor is the lca of itself and any descendant
/// assert_eq!(lca::lca(tree.arena(), n1, a).map(|n| n.label()), Some("N1"));
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn lca<'a>(arena: &'a NodeArena, x: &'a Node, y: &'a Node) -> Option<&'a Node> {
    let (mut x, mut y) = (x, y);

    // Step 1: bring x and y to the same depth
    while x.depth() > y.depth() {
        x = arena.get(x.parent()?)?;
    }
    while y.depth() > x.depth() {
        y = arena.get(y.parent()?)?;
    }

    // Step 2: walk up together until the paths meet
    while x.id() != y.id() {
        x = arena.get(x.parent()?)?;
        y = arena.get(y.parent()?)?;
    }

    Some(x)
}

/// Returns the lowest common ancestor of all `nodes`, folding [`lca`] from left to right.
///
/// - Returns [`None`] for an empty input.
/// - Returns the node itself for a single node.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::lca;
/// let tree = arbor_phylo::examples::example_1()?;
/// let nodes: Vec<_> = ["E", "F", "G"].iter().filter_map(|l| tree.get_by_label(l)).collect();
/// assert_eq!(lca::lca_all(tree.arena(), nodes).map(|n| n.label()), Some("N4"));
/// assert!(lca::lca_all(tree.arena(), Vec::new()).is_none());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn lca_all<'a, I>(arena: &'a NodeArena, nodes: I) -> Option<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    let mut nodes = nodes.into_iter();
    let first = nodes.next()?;
    nodes.try_fold(first, |current, node| lca(arena, current, node))
}
