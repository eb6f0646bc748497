//! Read and write trees in the [Newick](https://en.wikipedia.org/wiki/Newick_format) format.
//!
//! Input is parsed incrementally by [NewickParser], fed from any [ChunkSource]. Output
//! always carries a branch length for every node, and optionally the post-order id of
//! each node in the [jplace](https://doi.org/10.1371/journal.pone.0031009) style.

mod parser;
mod writer;


pub use parser::NewickParser;
pub use writer::to_newick;

use crate::io::{BufferedReader, ChunkSource, InMemorySource};
use crate::Tree;

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use log::info;
use std::fmt::Debug;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Parses a tree from a Newick string.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::newick;
/// let tree = newick::parse_newick("(A:0.1,B:0.2)R;")?;
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.root_node().label(), "R");
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn parse_newick(newick: &str) -> Result<Tree, Report> {
    let source = InMemorySource::new(newick, newick.len());
    parse_source(source)
}

/// Parses a tree from a chunked source, one chunk at a time.
///
/// - If the source fails, or its content is not a complete Newick tree, returns an Error.
pub fn parse_source<S: ChunkSource>(mut source: S) -> Result<Tree, Report> {
    let mut parser = NewickParser::new();
    while !source.is_empty() && !parser.is_finished() {
        let chunk = source.read_next_chunk()?;
        parser.parse(chunk)?;
    }
    if !source.is_good() {
        Err(eyre!("Failed to read newick, the source is in a bad state."))?
    }
    parser.into_tree()
}

/// Loads a tree from a Newick file, read in windows of [`BufferedReader::BUFFER_SIZE`].
///
/// - If the file can't be opened or read, returns an Error.
/// - If the content is not valid Newick, returns an Error.
pub fn load_newick<P>(path: &P) -> Result<Tree, Report>
where
    P: AsRef<Path> + Debug,
{
    info!("Loading newick: {path:?}");
    let reader = BufferedReader::open(path)?;
    let tree = parse_source(reader).wrap_err_with(|| eyre!("Failed to load newick: {path:?}"))?;
    info!("Loaded a tree of {} nodes.", tree.node_count());
    Ok(tree)
}

/// Writes `tree` in Newick format to `writer`, followed by a newline.
pub fn write_tree<W: Write>(tree: &Tree, writer: &mut W, jplace: bool) -> Result<(), Report> {
    let newick = to_newick(tree, jplace);
    writeln!(writer, "{newick}").wrap_err("Failed to write newick.")?;
    Ok(())
}

/// Saves `tree` in Newick format to a file, replacing any existing content.
///
/// - If the file can't be created or written, returns an Error.
pub fn save_tree<P>(tree: &Tree, path: &P) -> Result<(), Report>
where
    P: AsRef<Path> + Debug,
{
    let mut file = File::create(path).wrap_err_with(|| eyre!("Failed to create file: {path:?}"))?;
    write_tree(tree, &mut file, false).wrap_err_with(|| eyre!("Failed to save tree: {path:?}"))?;
    info!("Saved a tree of {} nodes: {path:?}", tree.node_count());
    Ok(())
}
