use crate::io::{read_as_string, BufferedReader, ChunkSource, InMemorySource};
use color_eyre::eyre::{Report, Result};
use std::io::Write;

#[test]
fn in_memory_chunks() -> Result<(), Report> {
    let mut source = InMemorySource::new("abcdefg", 3);
    let mut chunks = Vec::new();
    while !source.is_empty() {
        chunks.push(source.read_next_chunk()?.to_vec());
    }
    assert_eq!(chunks, [b"abc".to_vec(), b"def".to_vec(), b"g".to_vec()]);
    assert!(source.read_next_chunk()?.is_empty());
    assert!(source.is_good());
    Ok(())
}

#[test]
fn in_memory_zero_chunk_size() -> Result<(), Report> {
    let mut source = InMemorySource::new("ab", 0);
    assert_eq!(source.read_next_chunk()?, b"a");
    assert_eq!(source.read_next_chunk()?, b"b");
    assert!(source.is_empty());
    Ok(())
}

#[test]
fn buffered_windows() -> Result<(), Report> {
    // three full windows and a partial one
    let content: Vec<u8> = (0..BufferedReader::BUFFER_SIZE * 3 + 10).map(|i| b'a' + (i % 26) as u8).collect();
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(&content)?;
    file.flush()?;

    let mut reader = BufferedReader::open(&file.path())?;
    let mut sizes = Vec::new();
    let mut observed = Vec::new();
    while !reader.is_empty() {
        let chunk = reader.read_next_chunk()?;
        sizes.push(chunk.len());
        observed.extend_from_slice(chunk);
    }

    let size = BufferedReader::BUFFER_SIZE;
    assert_eq!(sizes, [size, size, size, 10]);
    assert_eq!(observed, content);
    assert!(reader.is_good());
    Ok(())
}

#[test]
fn buffered_empty_file() -> Result<(), Report> {
    let file = tempfile::NamedTempFile::new()?;
    let mut reader = BufferedReader::open(&file.path())?;
    assert!(reader.is_empty());
    assert!(reader.read_next_chunk()?.is_empty());
    Ok(())
}

#[test]
fn buffered_missing_file() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("missing.nwk");
    assert!(BufferedReader::open(&path).is_err());
    Ok(())
}

#[test]
fn read_string() -> Result<(), Report> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "(A,B);")?;
    file.flush()?;
    assert_eq!(read_as_string(&file.path())?, "(A,B);");

    let dir = tempfile::tempdir()?;
    assert!(read_as_string(&dir.path().join("missing.nwk")).is_err());
    Ok(())
}
