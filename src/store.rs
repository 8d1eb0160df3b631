use std::path::Path;

use memchr::memmem;
use tracing::debug;

use crate::error::OffsetError;

/// Verbatim contents of the input file, loaded fully into memory and
/// immutable from then on. The same bytes serve as the backing of the
/// parser's input stream and as the haystack for offset reconciliation.
#[derive(Debug, Clone, Default)]
pub struct ByteStore {
    data: Vec<u8>,
}

impl ByteStore {
    /// Load a file, failing on any I/O error. The driver treats this
    /// failure as fatal.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ByteStore, OffsetError> {
        let data = std::fs::read(path)?;
        Ok(ByteStore { data })
    }

    /// Load a file, yielding an empty store if it cannot be opened or read.
    /// Downstream consumers see an empty buffer and find zero occurrences.
    pub fn load_lossy<P: AsRef<Path>>(path: P) -> ByteStore {
        match std::fs::read(path.as_ref()) {
            Ok(data) => ByteStore { data },
            Err(e) => {
                debug!("failed to read {:?}: {}", path.as_ref(), e);
                ByteStore::default()
            }
        }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> ByteStore {
        ByteStore { data: data.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All offsets at which `needle` occurs in the buffer, in ascending
    /// order. Exact byte-for-byte matches over the whole buffer; an empty
    /// needle or one longer than the buffer has no occurrences.
    pub fn find_all(&self, needle: &[u8]) -> Vec<usize> {
        find_all(&self.data, needle)
    }
}

pub(crate) fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return Vec::new();
    }
    // Restart one byte past each match so overlapping occurrences are
    // found; memmem's find_iter skips them.
    let finder = memmem::Finder::new(needle);
    let mut out = Vec::new();
    let mut start = 0;
    while let Some(pos) = finder.find(&haystack[start..]) {
        out.push(start + pos);
        start += pos + 1;
    }
    out
}
