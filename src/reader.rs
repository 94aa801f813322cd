//! Opening interval files, with transparent gzip/BGZF decompression.
//!
//! Compression is detected from the leading magic bytes rather than the file
//! extension, so `foo.bed` that happens to be gzipped still reads correctly.

use crate::error::Result;
use flate2::read::MultiGzDecoder;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read up to `n` leading bytes of a file.
fn read_header(path: &Path, n: usize) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(n);
    file.take(n as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// Returns true if the file starts with the gzip magic bytes.
pub fn is_gzip<P: AsRef<Path>>(path: P) -> Result<bool> {
    let header = read_header(path.as_ref(), 2)?;
    Ok(header == GZIP_MAGIC)
}

/// Returns true if the file is BGZF: gzip with the `BC` extra subfield.
pub fn is_bgzip<P: AsRef<Path>>(path: P) -> Result<bool> {
    let header = read_header(path.as_ref(), 15)?;
    if header.len() < 15 {
        return Ok(false);
    }
    Ok(header[0] == 0x1f
        && header[1] == 0x8b
        && header[2] == 8
        && header[3] == 4
        && header[12] == b'B'
        && header[13] == b'C'
        && header[14] == 2)
}

/// Open a path as a buffered line source, decompressing gzip/BGZF input.
///
/// BGZF is a series of gzip members, so a multi-member decoder handles both.
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if is_gzip(path)? {
        debug!("{}: gzip-compressed input", path.display());
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::with_capacity(64 * 1024, file)))
    }
}
