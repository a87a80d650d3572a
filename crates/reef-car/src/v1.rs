//! v1 container: header record followed by block records.

use bytes::Bytes;
use reef_dag::NodeStore;
use reef_types::{CAR_V1_VERSION, ContentId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CarError;
use crate::{put_varint, varint_len};

/// The v1 header record, serialized as DAG-CBOR.
///
/// Roots are written in their canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarV1Header {
    /// Root identifiers, in order.
    pub roots: Vec<String>,
    /// Container format version (always 1).
    pub version: u64,
}

impl CarV1Header {
    /// Header naming the given roots.
    pub fn new(roots: &[ContentId]) -> Self {
        Self {
            roots: roots.iter().map(ToString::to_string).collect(),
            version: CAR_V1_VERSION,
        }
    }
}

/// Encode the varint-prefixed header record for `roots`.
pub fn encode_v1_header(roots: &[ContentId]) -> Result<Vec<u8>, CarError> {
    let cbor = serde_ipld_dagcbor::to_vec(&CarV1Header::new(roots))
        .map_err(|e| CarError::Encoding(e.to_string()))?;

    let mut buf = Vec::with_capacity(varint_len(cbor.len() as u64) + cbor.len());
    put_varint(&mut buf, cbor.len() as u64);
    buf.extend_from_slice(&cbor);
    Ok(buf)
}

/// Append one block record, `varint(len(cid) + len(data)) ++ cid ++ data`.
///
/// Returns the number of bytes written.
pub fn encode_block(buf: &mut Vec<u8>, id: &ContentId, data: &[u8]) -> usize {
    let cid = id.to_bytes();
    let body_len = (cid.len() + data.len()) as u64;
    let start = buf.len();
    buf.reserve(varint_len(body_len) + cid.len() + data.len());
    put_varint(buf, body_len);
    buf.extend_from_slice(&cid);
    buf.extend_from_slice(data);
    buf.len() - start
}

/// Encoded block records plus where each one starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockSection {
    /// Concatenated block records.
    pub bytes: Vec<u8>,
    /// `(id, offset)` of each record, offsets relative to the section start.
    pub offsets: Vec<(ContentId, u64)>,
}

/// Encode every stored block, in store order.
pub fn encode_v1_blocks(store: &NodeStore) -> BlockSection {
    let capacity = store
        .iter()
        .map(|b| b.id.encoded_len() + b.data.len() + 10)
        .sum();
    let mut section = BlockSection {
        bytes: Vec::with_capacity(capacity),
        offsets: Vec::with_capacity(store.len()),
    };

    for block in store {
        let offset = section.bytes.len() as u64;
        encode_block(&mut section.bytes, &block.id, &block.data);
        section.offsets.push((block.id, offset));
    }

    section
}

/// A finished v1 container, kept in its two parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarV1 {
    /// Varint-prefixed header record.
    pub header: Bytes,
    /// Concatenated block records.
    pub blocks: Bytes,
    /// `(id, offset)` of each block record within `blocks`.
    pub offsets: Vec<(ContentId, u64)>,
}

impl CarV1 {
    /// Total container length.
    pub fn len(&self) -> usize {
        self.header.len() + self.blocks.len()
    }

    /// Whether the container is empty (never true for a written container).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of block records.
    pub fn block_count(&self) -> usize {
        self.offsets.len()
    }

    /// The contiguous container: header then blocks.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = Vec::with_capacity(self.len());
        buf.extend_from_slice(&self.header);
        buf.extend_from_slice(&self.blocks);
        Bytes::from(buf)
    }
}

/// Serialize `store` as a v1 container rooted at `root`.
pub fn write_v1(store: &NodeStore, root: ContentId) -> Result<CarV1, CarError> {
    let header = encode_v1_header(&[root])?;
    let section = encode_v1_blocks(store);

    debug!(
        %root,
        header_len = header.len(),
        blocks_len = section.bytes.len(),
        block_count = section.offsets.len(),
        "wrote v1 container"
    );

    Ok(CarV1 {
        header: Bytes::from(header),
        blocks: Bytes::from(section.bytes),
        offsets: section.offsets,
    })
}
