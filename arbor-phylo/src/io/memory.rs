use crate::io::ChunkSource;

use color_eyre::eyre::{Report, Result};

/// An in-memory byte source that owns its data and serves it in chunks of a fixed size.
///
/// ## Examples
///
/// ```rust
/// use arbor_phylo::io::{ChunkSource, InMemorySource};
/// let mut source = InMemorySource::new("(A,B);", 4);
/// assert_eq!(source.read_next_chunk()?, b"(A,B");
/// assert_eq!(source.read_next_chunk()?, b");");
/// assert!(source.is_empty());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Clone, Debug)]
pub struct InMemorySource {
    input: Vec<u8>,
    chunk_size: usize,
    /// Current position in the input.
    pos: usize,
}

impl InMemorySource {
    /// Creates a source over `input`. A `chunk_size` of 0 is treated as 1.
    pub fn new<B: Into<Vec<u8>>>(input: B, chunk_size: usize) -> Self {
        InMemorySource { input: input.into(), chunk_size: chunk_size.max(1), pos: 0 }
    }
}

impl ChunkSource for InMemorySource {
    fn is_empty(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn read_next_chunk(&mut self) -> Result<&[u8], Report> {
        let start = self.pos;
        let end = (start + self.chunk_size).min(self.input.len());
        self.pos = end;
        Ok(&self.input[start..end])
    }

    fn is_good(&self) -> bool {
        true
    }
}
