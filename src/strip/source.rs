//! Fixed-size chunk reads from a byte stream.

use std::io::{self, Read};

use tracing::trace;

/// Nominal chunk size used when nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// One read from a [`ChunkSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Bytes read, at most the nominal chunk size.
    pub bytes: Vec<u8>,
    /// The underlying reader reached end of stream during this read.
    pub eof: bool,
}

impl Chunk {
    /// Number of bytes in the chunk.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the chunk carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Pulls chunks of a fixed nominal size from a reader.
///
/// A chunk is short only at end of stream: each read keeps going until the
/// chunk is full or the reader reports EOF.
pub struct ChunkSource<R> {
    reader: R,
    chunk_size: usize,
    eof: bool,
}

impl<R: Read> ChunkSource<R> {
    /// Wrap a reader. A `chunk_size` of zero is treated as one.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size: chunk_size.max(1),
            eof: false,
        }
    }

    /// Wrap a reader using [`DEFAULT_CHUNK_SIZE`].
    pub fn with_default_size(reader: R) -> Self {
        Self::new(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Nominal chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read the next chunk.
    ///
    /// Interrupted reads are reissued; any other error is returned as is.
    /// After EOF every call yields an empty EOF chunk without touching the
    /// reader again.
    pub fn read_chunk(&mut self) -> io::Result<Chunk> {
        if self.eof {
            return Ok(Chunk {
                bytes: Vec::new(),
                eof: true,
            });
        }

        let mut bytes = vec![0u8; self.chunk_size];
        let mut filled = 0;

        while filled < bytes.len() {
            match self.reader.read(&mut bytes[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        bytes.truncate(filled);
        trace!(len = filled, eof = self.eof, "chunk read");

        Ok(Chunk {
            bytes,
            eof: self.eof,
        })
    }
}
