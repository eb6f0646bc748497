//! Chunked byte sources that feed the [Newick parser](crate::newick::NewickParser).
//!
//! This module provides the [ChunkSource] trait, a file reader with fixed-size windows
//! ([BufferedReader]) and an in-memory source with a configurable chunk size
//! ([InMemorySource]).

mod buffered;
mod memory;

#[cfg(test)]
mod tests;

pub use buffered::BufferedReader;
pub use memory::InMemorySource;

use color_eyre::eyre::{Report, Result, WrapErr};
use std::fmt::Debug;
use std::path::Path;

// ----------------------------------------------------------------------------
// Chunk Source (Trait)
// ----------------------------------------------------------------------------

/// A source of bytes delivered in chunks of arbitrary size.
///
/// Chunk boundaries carry no meaning, they can fall inside a label, a number or a
/// multi-byte character.
pub trait ChunkSource {
    /// Returns true once every byte has been read.
    fn is_empty(&self) -> bool;

    /// Returns the next chunk of bytes, empty when the source is exhausted.
    ///
    /// The slice is only valid until the next read.
    fn read_next_chunk(&mut self) -> Result<&[u8], Report>;

    /// Returns true if the source was opened and no read has failed.
    fn is_good(&self) -> bool;
}

/// Reads a whole file into a [`String`].
pub fn read_as_string<P>(path: &P) -> Result<String, Report>
where
    P: AsRef<Path> + Debug,
{
    std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read file: {path:?}."))
}
