#![doc = include_str!("../README.md")]

use color_eyre::eyre::{Report, Result};

mod arena;
pub mod examples;
pub mod io;
pub mod lca;
pub mod newick;
mod node;
mod traversal;
mod tree;

#[doc(inline)]
pub use arena::NodeArena;
#[doc(inline)]
pub use node::{Node, NodeId};
#[doc(inline)]
pub use traversal::{NodeIter, Order, Traversal};
#[doc(inline)]
pub use tree::Tree;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Returns an object created from a [Newick](https://en.wikipedia.org/wiki/Newick_format) [`str`].
pub trait FromNewick {
    fn from_newick(newick: &str) -> Result<Self, Report>
    where
        Self: Sized;
}

/// Returns a [Newick](https://en.wikipedia.org/wiki/Newick_format) [`str`] created from an object.
pub trait ToNewick {
    fn to_newick(&self) -> Result<String, Report>;
}
