//! Commands that load a Newick tree, then report on it or convert it.
//!
//! Every command takes its [clap](https://docs.rs/clap) arguments as a struct, so it can be
//! run from the [CLI](crate::Cli) or directly from code.

pub mod convert;
pub mod lca;
pub mod nodes;
pub mod stats;

#[cfg(test)]
mod tests;
