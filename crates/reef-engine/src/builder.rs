//! [`ArchiveBuilder`] runs the full build for one input buffer.

use std::time::Instant;

use bytes::Bytes;
use reef_cas::Chunker;
use reef_car::{wrap_v2, write_v1};
use reef_dag::build_tree;
use reef_types::{ArchiveConfig, CHUNK_SIZE};
use tracing::{debug, info};

use crate::archive::{Archive, ArchiveStats};
use crate::error::EngineError;

/// Builds archives with a fixed configuration.
///
/// A builder holds no per-build state, so one instance can serve any number
/// of sequential or concurrent builds. Each build owns its own node store,
/// dropped once the containers are written.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    config: ArchiveConfig,
}

impl ArchiveBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder applies.
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Build both containers for `data`.
    ///
    /// Any failure aborts the build; no partial archive is returned.
    pub fn build(&self, data: &[u8]) -> Result<Archive, EngineError> {
        let started = Instant::now();
        debug!(input_size = data.len(), "build: starting");

        // Step 1: chunk and identify the leaves.
        let chunks = Chunker::new(CHUNK_SIZE).chunk(data)?;

        // Step 2: arrange them into the stem-node tree.
        let tree = build_tree(chunks)?;
        debug!(
            root = %tree.root,
            leaves = tree.leaf_count,
            stems = tree.stem_count,
            blocks = tree.store.len(),
            "build: tree ready"
        );

        // Step 3: serialize. The store is dropped at the end of this scope.
        let car = write_v1(&tree.store, tree.root)?;
        let v2 = wrap_v2(&car, self.config.index_offsets)?;
        let v1 = car.to_bytes();

        let stats = ArchiveStats {
            input_size: data.len() as u64,
            leaf_count: tree.leaf_count,
            stem_count: tree.stem_count,
            block_count: car.block_count(),
            depth: tree.depth,
            v1_len: v1.len(),
            v2_len: v2.len(),
        };

        info!(
            root = %tree.root,
            input_size = stats.input_size,
            leaves = stats.leaf_count,
            blocks = stats.block_count,
            v1_len = stats.v1_len,
            v2_len = stats.v2_len,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "build: archive complete"
        );

        Ok(Archive {
            v1,
            v2,
            root: tree.root,
            stats,
        })
    }

    /// Build on a blocking worker thread.
    ///
    /// Hashing runs on tokio's blocking pool rather than the async executor.
    /// Concurrent calls share no state.
    pub async fn build_async(&self, data: Bytes) -> Result<Archive, EngineError> {
        let builder = self.clone();
        tokio::task::spawn_blocking(move || builder.build(&data)).await?
    }
}

/// Build both containers for `data` with the default configuration.
pub fn build_archive(data: &[u8]) -> Result<Archive, EngineError> {
    ArchiveBuilder::default().build(data)
}
