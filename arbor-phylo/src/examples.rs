//! Small example trees, used throughout the documentation and the tests.

use crate::{newick, Tree};
use color_eyre::eyre::{Report, Result};

/// Returns the `Example 1` [Tree], shown in the [Tree] documentation.
///
/// Every internal node is labelled, the root has two children and `N4` has three.
///
/// ```text
/// (((A:0.1,B:0.2)N1:0.3,(C:0.4,D:0.5)N2:0.6)N3:0.7,(E:0.8,F:0.9,G:1.0)N4:1.1)Root:1.2;
/// ```
///
/// ```rust
/// let tree = arbor_phylo::examples::example_1()?;
/// assert_eq!(tree.root_node().label(), "Root");
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn example_1() -> Result<Tree, Report> {
    let newick = "(((A:0.1,B:0.2)N1:0.3,(C:0.4,D:0.5)N2:0.6)N3:0.7,(E:0.8,F:0.9,G:1.0)N4:1.1)Root:1.2;";
    newick::parse_newick(newick)
}

/// Returns the `Example 2` [Tree], a balanced tree of 4 leaves and unnamed internal nodes.
///
/// ```text
/// ((A:0.05,B:0.1):0.15,(C:0.2,D:0.25):0.3):0.35;
/// ```
pub fn example_2() -> Result<Tree, Report> {
    newick::parse_newick("((A:0.05,B:0.1):0.15,(C:0.2,D:0.25):0.3):0.35;")
}
