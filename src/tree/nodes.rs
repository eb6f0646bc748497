use arbor_phylo::{newick, Node};
use clap::Parser;
use color_eyre::eyre::{Report, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments for listing the nodes of a tree.
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct Args {
    /// Newick tree file.
    pub tree: PathBuf,
}

/// Loads a tree and returns a copy of every node, in post-order, with its indices.
pub fn list(args: &Args) -> Result<Vec<Node>, Report> {
    let tree = newick::load_newick(&args.tree)?;
    Ok(tree.iter().cloned().collect())
}
