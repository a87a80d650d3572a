//! The finished product of a build.

use bytes::Bytes;
use reef_types::ContentId;
use tokio::io::AsyncWrite;

use crate::error::EngineError;

/// Counters describing one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Length of the input buffer.
    pub input_size: u64,
    /// Leaf chunks produced by the chunker.
    pub leaf_count: usize,
    /// Stem nodes synthesized by the tree builder.
    pub stem_count: usize,
    /// Distinct blocks written (identical leaves are stored once).
    pub block_count: usize,
    /// Stem levels above the leaves.
    pub depth: usize,
    /// Length of the v1 container.
    pub v1_len: usize,
    /// Length of the v2 container.
    pub v2_len: usize,
}

/// Both container encodings of one input plus its root identifier.
#[derive(Debug, Clone)]
pub struct Archive {
    /// v1 container bytes.
    pub v1: Bytes,
    /// v2 container bytes.
    pub v2: Bytes,
    /// Root identifier of the tree.
    pub root: ContentId,
    /// Build counters.
    pub stats: ArchiveStats,
}

impl Archive {
    /// Canonical string form of the root identifier.
    pub fn root_identifier(&self) -> String {
        self.root.to_string()
    }

    /// Persist the v1 container to an async sink.
    pub async fn write_v1_to(&self, sink: impl AsyncWrite + Unpin) -> Result<(), EngineError> {
        Ok(reef_car::write_to(sink, &self.v1).await?)
    }

    /// Persist the v2 container to an async sink.
    pub async fn write_v2_to(&self, sink: impl AsyncWrite + Unpin) -> Result<(), EngineError> {
        Ok(reef_car::write_to(sink, &self.v2).await?)
    }
}
