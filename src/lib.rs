//! `arbor` loads, indexes, queries and converts phylogenetic trees in the
//! [Newick](https://en.wikipedia.org/wiki/Newick_format) format.
//!
//! The trees themselves live in the [`arbor_phylo`] crate. This crate adds the
//! [command-line interface](Cli) and the [commands](tree) it runs:
//!
//! - `arbor stats <tree>`: node count, leaf count, rootedness, total branch length and maximum depth.
//! - `arbor convert <tree> --output <path> [--format newick|jplace|dot]`
//! - `arbor lca <tree> <label>...`: the lowest common ancestor of the labelled nodes.
//! - `arbor nodes <tree>`: every node with its indices, in post-order.

pub mod cli;
pub mod tree;
mod utils;

#[doc(inline)]
pub use crate::cli::Cli;
#[doc(inline)]
pub use utils::verbosity::Verbosity;
