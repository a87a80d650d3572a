//! In-memory node store accumulating every block of one build.

use std::collections::HashMap;

use bytes::Bytes;
use reef_types::ContentId;
use tracing::trace;

/// A stored block: identifier plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Content identifier of `data`.
    pub id: ContentId,
    /// Exact payload bytes the identifier was computed over.
    pub data: Bytes,
}

/// Mapping from [`ContentId`] to payload, iterated in insertion order.
///
/// Each distinct block is stored once: inserting an ID that is already
/// present keeps the first payload and its position. Iteration order is
/// therefore a pure function of the insertion sequence, which keeps
/// serialized containers reproducible.
#[derive(Debug, Default)]
pub struct NodeStore {
    index: HashMap<ContentId, usize>,
    blocks: Vec<Block>,
}

impl NodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block. Returns `false` if the ID was already present.
    pub fn insert(&mut self, id: ContentId, data: Bytes) -> bool {
        if self.index.contains_key(&id) {
            trace!(%id, "block already stored");
            return false;
        }
        self.index.insert(id, self.blocks.len());
        self.blocks.push(Block { id, data });
        true
    }

    /// Look up a payload by identifier.
    pub fn get(&self, id: &ContentId) -> Option<&Bytes> {
        self.index.get(id).map(|&i| &self.blocks[i].data)
    }

    /// Look up a payload by the identifier's string form.
    ///
    /// Returns `None` for strings that are not valid identifiers.
    pub fn get_by_str(&self, id: &str) -> Option<&Bytes> {
        let id: ContentId = id.parse().ok()?;
        self.get(&id)
    }

    /// Check whether an identifier is stored.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct blocks stored.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate blocks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Sum of all payload lengths.
    pub fn total_bytes(&self) -> u64 {
        self.blocks.iter().map(|b| b.data.len() as u64).sum()
    }
}

impl<'a> IntoIterator for &'a NodeStore {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
