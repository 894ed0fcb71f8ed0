//! Bounded reads of package inputs from disk.

use crate::error::RuntimeError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Result of a bounded read.
#[derive(Debug, PartialEq, Eq)]
pub enum BoundedRead {
    /// File content, no longer than the limit
    Within(Vec<u8>),
    /// File is larger than the limit; nothing was buffered
    TooLarge(u64),
}

/// Read `path` fully if it holds at most `limit` bytes.
///
/// The size is checked from metadata before reading, and the read itself is
/// capped so a file growing underneath is still caught.
pub fn read_bounded(path: &Path, limit: usize) -> Result<BoundedRead, RuntimeError> {
    let file = File::open(path).map_err(|e| RuntimeError::io(path, e))?;
    let len = file.metadata().map_err(|e| RuntimeError::io(path, e))?.len();

    let limit = limit as u64;
    if len > limit {
        return Ok(BoundedRead::TooLarge(len));
    }

    let mut buffer = Vec::with_capacity(len as usize);
    file.take(limit + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| RuntimeError::io(path, e))?;

    if buffer.len() as u64 > limit {
        return Ok(BoundedRead::TooLarge(buffer.len() as u64));
    }
    Ok(BoundedRead::Within(buffer))
}
