use arbor_phylo::{newick, Tree};
use clap::Parser;
use color_eyre::eyre::{Report, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Structs

/// Arguments for tree statistics.
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Newick tree file.
    pub tree: PathBuf,
}

/// Summary statistics of a [`Tree`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Stats {
    pub nodes: usize,
    pub leaves: usize,
    /// True if the root has fewer than 3 children.
    pub rooted: bool,
    /// Sum of the branch lengths below the root.
    pub total_branch_length: f64,
    pub max_depth: usize,
}

impl From<&Tree> for Stats {
    fn from(tree: &Tree) -> Self {
        let root = tree.root_node();
        Stats {
            nodes: tree.node_count(),
            leaves: root.num_leaves(),
            rooted: tree.is_rooted(),
            total_branch_length: root.subtree_branch_length(),
            max_depth: tree.iter().map(|n| n.depth()).max().unwrap_or_default(),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions

/// Loads a tree and returns its summary statistics.
pub fn summary(args: &Args) -> Result<Stats, Report> {
    let tree = newick::load_newick(&args.tree)?;
    Ok(Stats::from(&tree))
}
