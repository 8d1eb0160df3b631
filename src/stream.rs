use std::fmt;
use std::io::SeekFrom;

/// Error returned by [`InputStream::seek`]. A failed seek never moves the
/// cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The requested position lies outside `0..=len`.
    OutOfRange,
    /// The seek mode is not supported by this stream.
    Unsupported,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::OutOfRange => write!(f, "seek position out of range"),
            StreamError::Unsupported => write!(f, "unsupported seek mode"),
        }
    }
}

impl std::error::Error for StreamError {}

/// The sequential/seekable read contract the external parser consumes its
/// input through. Flat byte sources only: the structured-storage surface is
/// present for interface compatibility but always reports "not structured,
/// zero sub-streams".
pub trait InputStream {
    /// Read up to `num_bytes` bytes, advancing the cursor. Returns fewer
    /// bytes than requested only at end-of-data.
    fn read(&mut self, num_bytes: usize) -> &[u8];

    /// Absolute (`Start`) or relative (`Current`) reposition of the cursor.
    /// Out-of-range targets fail with [`StreamError::OutOfRange`];
    /// `SeekFrom::End` fails with [`StreamError::Unsupported`]. Returns the
    /// new cursor position on success.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError>;

    /// Current cursor position.
    fn tell(&self) -> u64;

    /// True once the cursor has reached end-of-data.
    fn is_end(&self) -> bool;

    fn is_structured(&self) -> bool {
        false
    }

    fn sub_stream_count(&self) -> usize {
        0
    }

    fn sub_stream_name(&self, _id: usize) -> Option<&str> {
        None
    }

    fn sub_stream_by_id(&mut self, _id: usize) -> Option<Box<dyn InputStream + '_>> {
        None
    }

    fn sub_stream_by_name(&mut self, _name: &str) -> Option<Box<dyn InputStream + '_>> {
        None
    }
}

/// [`InputStream`] over a borrowed byte buffer, typically the
/// [`ByteStore`](crate::ByteStore)'s contents. The cursor starts at 0.
#[derive(Debug)]
pub struct MemoryStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemoryStream<'a> {
    pub fn new(data: &'a [u8]) -> MemoryStream<'a> {
        MemoryStream { data, pos: 0 }
    }
}

impl InputStream for MemoryStream<'_> {
    fn read(&mut self, num_bytes: usize) -> &[u8] {
        let remaining = self.data.len() - self.pos;
        let n = num_bytes.min(remaining);
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        out
    }

    fn seek(&mut self, pos: SeekFrom) -> Result<u64, StreamError> {
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).map_err(|_| StreamError::OutOfRange)?,
            SeekFrom::Current(delta) => (self.pos as i64)
                .checked_add(delta)
                .ok_or(StreamError::OutOfRange)?,
            SeekFrom::End(_) => return Err(StreamError::Unsupported),
        };
        if target < 0 || target as usize > self.data.len() {
            return Err(StreamError::OutOfRange);
        }
        self.pos = target as usize;
        Ok(self.pos as u64)
    }

    fn tell(&self) -> u64 {
        self.pos as u64
    }

    fn is_end(&self) -> bool {
        self.pos >= self.data.len()
    }
}
