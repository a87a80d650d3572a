//! Balanced, bounded-fanout Merkle tree over leaf chunks.
//!
//! [`build_tree`] arranges leaf [`Chunk`](reef_cas::Chunk)s into a tree of
//! stem nodes, left to right and level by level, with at most
//! [`MAX_LINKS`](reef_types::MAX_LINKS) children per node. Every leaf and
//! every stem node lands in a [`NodeStore`] keyed by its content identifier.
//!
//! Stem nodes are UnixFS `File` nodes in DAG-PB form: the block sizes of
//! their children plus one link per child. A single-chunk input is not
//! wrapped; its raw leaf is the root.

mod builder;
mod error;
mod store;
mod unixfs;

pub use builder::{DagTree, LinkSummary, StemNode, build_stem_node, build_tree};
pub use error::DagError;
pub use store::{Block, NodeStore};
pub use unixfs::{DecodedLink, DecodedStem, decode_stem_node, encode_stem_node};
