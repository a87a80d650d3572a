//! Fixed-size chunker for splitting data into raw leaf blocks.

use bytes::Bytes;
use reef_types::{CHUNK_SIZE, Codec, ContentId};
use tracing::debug;

use crate::error::CasError;
use crate::identify::identify;

/// A single leaf chunk with its content identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Raw-codec identifier: `cidv1(raw, sha256(data))`.
    pub id: ContentId,
    /// Byte offset within the original input.
    pub offset: u64,
    /// The raw chunk data.
    pub data: Bytes,
}

impl Chunk {
    /// Logical size of the chunk (raw leaves carry no envelope).
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Fixed-size chunker that splits data into chunks of a configured size.
///
/// The last chunk may be smaller than `chunk_size`. Empty input produces a
/// single empty chunk so that every build has a leaf to root the tree at.
pub struct Chunker {
    chunk_size: u32,
}

impl Chunker {
    /// Create a new chunker with the given chunk size in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(chunk_size: u32) -> Self {
        assert!(chunk_size > 0, "chunk_size must be non-zero");
        Self { chunk_size }
    }

    /// Configured chunk size in bytes.
    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    /// Split data into fixed-size chunks.
    ///
    /// Concatenating the chunk payloads in order reproduces `data` exactly.
    pub fn chunk(&self, data: &[u8]) -> Result<Vec<Chunk>, CasError> {
        if data.is_empty() {
            let id = identify(&[], Codec::Raw)?;
            return Ok(vec![Chunk {
                id,
                offset: 0,
                data: Bytes::new(),
            }]);
        }

        let chunk_size = self.chunk_size as usize;
        let mut chunks = Vec::with_capacity(data.len().div_ceil(chunk_size));
        let mut offset = 0u64;

        for slice in data.chunks(chunk_size) {
            let id = identify(slice, Codec::Raw)?;
            chunks.push(Chunk {
                id,
                offset,
                data: Bytes::copy_from_slice(slice),
            });
            offset += slice.len() as u64;
        }

        debug!(
            total_size = data.len(),
            chunk_size = self.chunk_size,
            num_chunks = chunks.len(),
            "chunked input"
        );
        Ok(chunks)
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(CHUNK_SIZE)
    }
}
