//! Shared test harness for reef integration tests.
//!
//! Provides a minimal container parser ([`parse_v1`], [`parse_v2`]) and a
//! tree walker ([`reassemble`]) so tests can check that a written archive
//! carries exactly the blocks it was built from and that the tree
//! reproduces the original input.

use std::collections::HashMap;

use anyhow::{Context, Result, bail, ensure};
use reef_car::{CarV1Header, CarV2Header, IndexEntry};
use reef_dag::decode_stem_node;
use reef_types::{CARV2_HEADER_SIZE, CARV2_PRAGMA, Codec, ContentId};

/// Generate deterministic, non-repeating test data.
pub fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

// =========================================================================
// v1
// =========================================================================

/// One block record read back from a v1 container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBlock {
    /// Identifier stored in the record.
    pub id: ContentId,
    /// Payload stored in the record.
    pub data: Vec<u8>,
    /// Offset of the record from the start of the v1 container.
    pub offset: usize,
    /// Full record length including the varint prefix.
    pub record_len: usize,
}

/// A v1 container read back into its parts.
#[derive(Debug, Clone)]
pub struct ParsedV1 {
    /// Decoded header record.
    pub header: CarV1Header,
    /// Length of the varint-prefixed header record.
    pub header_len: usize,
    /// Block records in container order.
    pub blocks: Vec<ParsedBlock>,
}

impl ParsedV1 {
    /// Blocks keyed by identifier.
    pub fn block_map(&self) -> HashMap<ContentId, &[u8]> {
        self.blocks
            .iter()
            .map(|b| (b.id, b.data.as_slice()))
            .collect()
    }

    /// The single root named by the header.
    pub fn root(&self) -> Result<ContentId> {
        ensure!(self.header.roots.len() == 1, "expected exactly one root");
        self.header.roots[0]
            .parse()
            .context("root is not a valid identifier")
    }
}

fn read_varint(bytes: &[u8]) -> Result<(u64, &[u8])> {
    unsigned_varint::decode::u64(bytes).map_err(|e| anyhow::anyhow!("bad varint: {e}"))
}

/// Length of the binary CID at the start of `bytes`.
fn cid_len(bytes: &[u8]) -> Result<usize> {
    let (_version, rest) = read_varint(bytes)?;
    let (_codec, rest) = read_varint(rest)?;
    let (_hash_code, rest) = read_varint(rest)?;
    let (digest_len, rest) = read_varint(rest)?;
    ensure!(rest.len() >= digest_len as usize, "truncated digest");
    Ok(bytes.len() - rest.len() + digest_len as usize)
}

/// Parse a v1 container: header record, then block records to the end.
pub fn parse_v1(bytes: &[u8]) -> Result<ParsedV1> {
    let (header_body_len, rest) = read_varint(bytes)?;
    ensure!(rest.len() >= header_body_len as usize, "truncated header");
    let prefix_len = bytes.len() - rest.len();
    let header: CarV1Header = serde_ipld_dagcbor::from_slice(&rest[..header_body_len as usize])
        .context("header is not valid dag-cbor")?;
    let header_len = prefix_len + header_body_len as usize;

    let mut blocks = Vec::new();
    let mut pos = header_len;
    while pos < bytes.len() {
        let (len, body) = read_varint(&bytes[pos..])?;
        let prefix = bytes.len() - pos - body.len();
        let len = len as usize;
        ensure!(body.len() >= len, "truncated block record at {pos}");

        let record = &body[..len];
        let n = cid_len(record)?;
        let id = ContentId::try_from(&record[..n]).context("invalid block cid")?;
        blocks.push(ParsedBlock {
            id,
            data: record[n..].to_vec(),
            offset: pos,
            record_len: prefix + len,
        });
        pos += prefix + len;
    }

    Ok(ParsedV1 {
        header,
        header_len,
        blocks,
    })
}

// =========================================================================
// v2
// =========================================================================

/// A v2 container read back into its parts.
#[derive(Debug, Clone)]
pub struct ParsedV2 {
    /// Envelope header.
    pub envelope: CarV2Header,
    /// The embedded v1 payload, as raw bytes.
    pub data: Vec<u8>,
    /// The embedded v1 payload, parsed.
    pub v1: ParsedV1,
    /// Decoded index entries.
    pub index: Vec<IndexEntry>,
}

/// Parse a v2 container: pragma, envelope, data section, index.
pub fn parse_v2(bytes: &[u8]) -> Result<ParsedV2> {
    let envelope_end = CARV2_PRAGMA.len() + CARV2_HEADER_SIZE;
    ensure!(bytes.len() >= envelope_end, "shorter than the v2 envelope");
    ensure!(bytes[..CARV2_PRAGMA.len()] == CARV2_PRAGMA, "bad pragma");

    let mut raw = [0u8; CARV2_HEADER_SIZE];
    raw.copy_from_slice(&bytes[CARV2_PRAGMA.len()..envelope_end]);
    let envelope = CarV2Header::from_bytes(&raw);

    let start = envelope.data_offset as usize;
    let end = start + envelope.data_size as usize;
    ensure!(end <= bytes.len(), "data section overruns container");
    ensure!(
        envelope.index_offset as usize == end,
        "index does not follow data"
    );

    let data = bytes[start..end].to_vec();
    let v1 = parse_v1(&data)?;
    let index: Vec<IndexEntry> =
        serde_ipld_dagcbor::from_slice(&bytes[end..]).context("index is not valid dag-cbor")?;

    Ok(ParsedV2 {
        envelope,
        data,
        v1,
        index,
    })
}

// =========================================================================
// Tree walking
// =========================================================================

/// Rebuild the original input by walking the tree from `root`.
pub fn reassemble(blocks: &HashMap<ContentId, &[u8]>, root: ContentId) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    walk(blocks, root, &mut out)?;
    Ok(out)
}

fn walk(blocks: &HashMap<ContentId, &[u8]>, id: ContentId, out: &mut Vec<u8>) -> Result<()> {
    let Some(payload) = blocks.get(&id) else {
        bail!("missing block {id}");
    };
    match id.codec() {
        Some(Codec::Raw) => out.extend_from_slice(payload),
        Some(Codec::DagPb) => {
            let stem = decode_stem_node(payload)?;
            let before = out.len();
            for link in &stem.links {
                walk(blocks, link.id, out)?;
            }
            let written = (out.len() - before) as u64;
            ensure!(
                stem.filesize == Some(written),
                "stem {id} declares {:?} bytes, subtree holds {written}",
                stem.filesize
            );
        }
        None => bail!("unexpected codec in {id}"),
    }
    Ok(())
}
