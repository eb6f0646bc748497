use crate::io::ChunkSource;

use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Section;
use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a file in fixed-size windows.
///
/// The file is closed when the reader is dropped, which the loader does as soon as the
/// file is consumed or a read fails.
#[derive(Debug)]
pub struct BufferedReader {
    file: File,
    /// Total number of bytes in the file.
    file_length: u64,
    /// Number of bytes read so far.
    read: u64,
    buffer: Vec<u8>,
    good: bool,
}

impl BufferedReader {
    /// Size of the window used for every read.
    pub const BUFFER_SIZE: usize = 4096;

    /// Opens `path` for chunked reading.
    ///
    /// - If the file can't be opened, returns an Error.
    pub fn open<P>(path: &P) -> Result<Self, Report>
    where
        P: AsRef<Path> + Debug,
    {
        let file = File::open(path)
            .wrap_err_with(|| eyre!("Cannot open file: {path:?}"))
            .suggestion("Check that the path exists and is readable.")?;
        let file_length = file
            .metadata()
            .wrap_err_with(|| eyre!("Failed to get file length: {path:?}"))?
            .len();

        Ok(BufferedReader {
            file,
            file_length,
            read: 0,
            buffer: vec![0; Self::BUFFER_SIZE],
            good: true,
        })
    }
}

impl ChunkSource for BufferedReader {
    fn is_empty(&self) -> bool {
        self.read >= self.file_length
    }

    fn read_next_chunk(&mut self) -> Result<&[u8], Report> {
        if self.is_empty() {
            return Ok(&[]);
        }

        let size = match self.file.read(&mut self.buffer) {
            Ok(size) => size,
            Err(e) => {
                self.good = false;
                return Err(e).wrap_err("Failed to read next chunk.");
            }
        };

        // the file shrank while reading, stop here
        if size == 0 {
            self.read = self.file_length;
        }
        self.read += size as u64;
        Ok(&self.buffer[..size])
    }

    fn is_good(&self) -> bool {
        self.good
    }
}
