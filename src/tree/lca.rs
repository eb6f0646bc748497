use arbor_phylo::newick;
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result};
use color_eyre::Section;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ----------------------------------------------------------------------------
// Structs

/// Arguments for a lowest common ancestor query.
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Newick tree file.
    pub tree: PathBuf,

    /// Labels of the nodes whose lowest common ancestor is requested.
    #[clap(required = true)]
    pub labels: Vec<String>,
}

/// The lowest common ancestor of a set of nodes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Ancestor {
    pub label: String,
    pub postorder_id: Option<usize>,
    pub depth: usize,
}

// ----------------------------------------------------------------------------
// Functions

/// Loads a tree and returns the lowest common ancestor of the labelled nodes.
///
/// - If a label is not in the tree, returns an Error.
pub fn ancestor(args: &Args) -> Result<Ancestor, Report> {
    let tree = newick::load_newick(&args.tree)?;

    let missing = args.labels.iter().filter(|l| tree.get_by_label(l).is_none()).collect_vec();
    if !missing.is_empty() {
        Err(eyre!("Labels not found in tree: {}", missing.iter().join(", ")))
            .suggestion("Run `arbor nodes` to list the labels of the tree.")?
    }

    let nodes = args.labels.iter().filter_map(|l| tree.get_by_label(l)).collect_vec();
    debug!("Searching the lowest common ancestor of {} nodes.", nodes.len());
    let node = tree
        .lca_all(nodes)
        .ok_or_else(|| eyre!("Failed to find the lowest common ancestor of: {}", args.labels.join(", ")))?;

    Ok(Ancestor {
        label: node.label().to_string(),
        postorder_id: node.postorder_id(),
        depth: node.depth(),
    })
}
