//! Level-by-level construction of the balanced stem-node tree.

use bytes::Bytes;
use reef_cas::{Chunk, identify};
use reef_types::{Codec, ContentId, MAX_LINKS};
use tracing::debug;

use crate::error::DagError;
use crate::store::NodeStore;
use crate::unixfs::encode_stem_node;

/// Reference to a child used as input to the next tree level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    /// Identifier of the child leaf or stem.
    pub id: ContentId,
    /// Logical (unencoded) size of the subtree.
    pub size: u64,
    /// Encoded size of the subtree: own payload plus all descendants.
    pub encoded_size: u64,
}

impl LinkSummary {
    /// Summary of a raw leaf: both sizes equal the payload length.
    pub fn from_chunk(chunk: &Chunk) -> Self {
        Self {
            id: chunk.id,
            size: chunk.size(),
            encoded_size: chunk.size(),
        }
    }
}

/// An encoded intermediate or root node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemNode {
    /// DAG-PB identifier of `bytes`.
    pub id: ContentId,
    /// Canonical DAG-PB payload.
    pub bytes: Bytes,
    /// Summary for promotion to the next level.
    pub summary: LinkSummary,
}

/// Build one stem node over 1..=[`MAX_LINKS`] children.
pub fn build_stem_node(links: &[LinkSummary]) -> Result<StemNode, DagError> {
    if links.is_empty() || links.len() > MAX_LINKS {
        return Err(DagError::LinkCount {
            got: links.len(),
            max: MAX_LINKS,
        });
    }

    let bytes = encode_stem_node(links)?;
    let id = identify(&bytes, Codec::DagPb)?;

    let size = links.iter().map(|l| l.size).sum();
    let encoded_size = bytes.len() as u64 + links.iter().map(|l| l.encoded_size).sum::<u64>();

    Ok(StemNode {
        id,
        bytes: Bytes::from(bytes),
        summary: LinkSummary {
            id,
            size,
            encoded_size,
        },
    })
}

/// Result of a tree build.
#[derive(Debug)]
pub struct DagTree {
    /// Every leaf and stem block, leaves first then stems level by level.
    pub store: NodeStore,
    /// Identifier of the root block.
    pub root: ContentId,
    /// Number of leaf chunks the tree was built from.
    pub leaf_count: usize,
    /// Number of stem nodes synthesized.
    pub stem_count: usize,
    /// Number of stem levels above the leaves (0 for a single leaf).
    pub depth: usize,
    /// Logical size of the whole tree (sum of leaf sizes).
    pub total_size: u64,
}

/// Arrange ordered leaf chunks into a balanced tree.
///
/// A single chunk is its own root. Otherwise each level is split into
/// consecutive groups of at most [`MAX_LINKS`] entries, one stem node per
/// group, until one node remains. Tree shape depends only on the number and
/// order of the leaves.
pub fn build_tree(chunks: Vec<Chunk>) -> Result<DagTree, DagError> {
    if chunks.is_empty() {
        return Err(DagError::NoLeaves);
    }

    let leaf_count = chunks.len();
    let mut level: Vec<LinkSummary> = chunks.iter().map(LinkSummary::from_chunk).collect();
    let total_size = level.iter().map(|l| l.size).sum();

    let mut store = NodeStore::new();
    for chunk in chunks {
        store.insert(chunk.id, chunk.data);
    }

    if leaf_count == 1 {
        let root = level[0].id;
        debug!(%root, "single chunk, leaf is root");
        return Ok(DagTree {
            store,
            root,
            leaf_count,
            stem_count: 0,
            depth: 0,
            total_size,
        });
    }

    let mut stem_count = 0;
    let mut depth = 0;

    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(MAX_LINKS));
        for group in level.chunks(MAX_LINKS) {
            let node = build_stem_node(group)?;
            store.insert(node.id, node.bytes);
            next.push(node.summary);
        }
        depth += 1;
        stem_count += next.len();
        debug!(depth, width = level.len(), nodes = next.len(), "built tree level");
        level = next;
    }

    let root = level[0].id;
    debug!(%root, leaf_count, stem_count, depth, "tree complete");

    Ok(DagTree {
        store,
        root,
        leaf_count,
        stem_count,
        depth,
        total_size,
    })
}
