//! v2 container: pragma, fixed envelope header, v1 payload, trailing index.

use bytes::Bytes;
use reef_types::{
    CARV2_DATA_OFFSET, CARV2_HEADER_SIZE, CARV2_PRAGMA, ContentId, IndexOffsetMode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CarError;
use crate::v1::CarV1;

/// Fixed 40-byte envelope header that follows the pragma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarV2Header {
    /// Feature flags, reserved and zero-filled.
    pub characteristics: [u8; 16],
    /// Byte offset of the v1 payload from the start of the container.
    pub data_offset: u64,
    /// Length of the v1 payload.
    pub data_size: u64,
    /// Byte offset of the index from the start of the container.
    pub index_offset: u64,
}

impl CarV2Header {
    /// Header for a v1 payload of `data_size` bytes placed right after it.
    pub fn for_payload(data_size: u64) -> Self {
        Self {
            characteristics: [0; 16],
            data_offset: CARV2_DATA_OFFSET,
            data_size,
            index_offset: CARV2_DATA_OFFSET + data_size,
        }
    }

    /// Little-endian wire form.
    pub fn to_bytes(&self) -> [u8; CARV2_HEADER_SIZE] {
        let mut buf = [0u8; CARV2_HEADER_SIZE];
        buf[..16].copy_from_slice(&self.characteristics);
        buf[16..24].copy_from_slice(&self.data_offset.to_le_bytes());
        buf[24..32].copy_from_slice(&self.data_size.to_le_bytes());
        buf[32..40].copy_from_slice(&self.index_offset.to_le_bytes());
        buf
    }

    /// Parse the wire form produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(buf: &[u8; CARV2_HEADER_SIZE]) -> Self {
        let u64_at = |at: usize| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&buf[at..at + 8]);
            u64::from_le_bytes(word)
        };
        let mut characteristics = [0u8; 16];
        characteristics.copy_from_slice(&buf[..16]);
        Self {
            characteristics,
            data_offset: u64_at(16),
            data_size: u64_at(24),
            index_offset: u64_at(32),
        }
    }
}

/// One index record: a block's binary CID and its offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Binary form of the block's identifier.
    #[serde(with = "serde_bytes")]
    pub cid: Vec<u8>,
    /// Offset of the block, as selected by [`IndexOffsetMode`].
    pub offset: u64,
}

impl IndexEntry {
    /// Parse the binary CID back into a [`ContentId`].
    pub fn content_id(&self) -> Option<ContentId> {
        ContentId::try_from(self.cid.as_slice()).ok()
    }
}

/// Index entries for `car`, one per block record in container order.
///
/// In [`IndexOffsetMode::Byte`] each offset is the position of the block
/// record within the data section, i.e. relative to the first byte of the
/// v1 header.
pub fn index_entries(car: &CarV1, mode: IndexOffsetMode) -> Vec<IndexEntry> {
    let header_len = car.header.len() as u64;
    car.offsets
        .iter()
        .enumerate()
        .map(|(ordinal, (id, offset))| IndexEntry {
            cid: id.to_bytes(),
            offset: match mode {
                IndexOffsetMode::Byte => header_len + offset,
                IndexOffsetMode::Ordinal => ordinal as u64,
            },
        })
        .collect()
}

/// Encode the index as a DAG-CBOR list of `{cid, offset}` maps.
pub fn encode_index(entries: &[IndexEntry]) -> Result<Vec<u8>, CarError> {
    serde_ipld_dagcbor::to_vec(&entries).map_err(|e| CarError::Encoding(e.to_string()))
}

/// Assemble a v2 container from v1 parts and a prepared index.
pub fn create_v2(
    header: &[u8],
    blocks: &[u8],
    entries: &[IndexEntry],
) -> Result<Bytes, CarError> {
    let data_size = (header.len() + blocks.len()) as u64;
    let envelope = CarV2Header::for_payload(data_size);
    let index = encode_index(entries)?;

    let envelope_len = CARV2_PRAGMA.len() + CARV2_HEADER_SIZE;
    let mut buf = Vec::with_capacity(envelope_len + header.len() + blocks.len() + index.len());
    buf.extend_from_slice(&CARV2_PRAGMA);
    buf.extend_from_slice(&envelope.to_bytes());
    buf.extend_from_slice(header);
    buf.extend_from_slice(blocks);
    buf.extend_from_slice(&index);

    debug!(
        data_offset = envelope.data_offset,
        data_size = envelope.data_size,
        index_offset = envelope.index_offset,
        index_len = index.len(),
        "wrote v2 container"
    );
    Ok(Bytes::from(buf))
}

/// Wrap a v1 container in the v2 envelope.
pub fn wrap_v2(car: &CarV1, mode: IndexOffsetMode) -> Result<Bytes, CarError> {
    create_v2(&car.header, &car.blocks, &index_entries(car, mode))
}
