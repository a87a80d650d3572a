//! UnixFS / DAG-PB encoding of stem nodes.
//!
//! A stem node is a `PBNode` whose `Data` field holds a UnixFS `Data`
//! message of type `File` (no inline bytes, `filesize` = sum of block sizes,
//! one `blocksizes` entry per child) and whose `Links` reference each child
//! with an empty name and the child's cumulative encoded size.
//!
//! The canonical DAG-PB byte order puts every `Links` record (field 2) before
//! the `Data` record (field 1). `prost` emits fields in tag order, so the
//! `PBNode` envelope is assembled by hand while the inner messages use the
//! derived encoders.

use prost::Message;
use reef_types::ContentId;

use crate::builder::LinkSummary;
use crate::error::DagError;

/// Key byte of a `PBNode.Data` record: field 1, length-delimited.
const PB_NODE_DATA_KEY: u8 = 0x0a;

/// Key byte of a `PBNode.Links` record: field 2, length-delimited.
const PB_NODE_LINKS_KEY: u8 = 0x12;

/// UnixFS node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub(crate) enum DataType {
    Raw = 0,
    Directory = 1,
    File = 2,
    Metadata = 3,
    Symlink = 4,
    HamtShard = 5,
}

/// UnixFS `Data` message (proto2).
#[derive(Clone, PartialEq, prost::Message)]
pub(crate) struct UnixFsData {
    #[prost(enumeration = "DataType", required, tag = "1")]
    pub data_type: i32,
    #[prost(bytes = "vec", optional, tag = "2")]
    pub data: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "3")]
    pub filesize: Option<u64>,
    #[prost(uint64, repeated, packed = "false", tag = "4")]
    pub blocksizes: Vec<u64>,
}

/// DAG-PB `PBLink` message.
#[derive(Clone, PartialEq, prost::Message)]
pub(crate) struct PbLink {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub hash: Option<Vec<u8>>,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
    #[prost(uint64, optional, tag = "3")]
    pub tsize: Option<u64>,
}

/// DAG-PB `PBNode` message. Only used for decoding; see [`encode_stem_node`].
#[derive(Clone, PartialEq, prost::Message)]
pub(crate) struct PbNode {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub data: Option<Vec<u8>>,
    #[prost(message, repeated, tag = "2")]
    pub links: Vec<PbLink>,
}

/// Encode a stem node over `links` into canonical DAG-PB bytes.
pub fn encode_stem_node(links: &[LinkSummary]) -> Result<Vec<u8>, DagError> {
    let blocksizes: Vec<u64> = links.iter().map(|l| l.size).collect();
    let unixfs = UnixFsData {
        data_type: DataType::File as i32,
        data: None,
        filesize: Some(blocksizes.iter().sum()),
        blocksizes,
    };
    let data = unixfs.encode_to_vec();

    let mut buf = Vec::with_capacity(data.len() + links.len() * 48 + 4);
    for link in links {
        let pb_link = PbLink {
            hash: Some(link.id.to_bytes()),
            name: Some(String::new()),
            tsize: Some(link.encoded_size),
        };
        buf.push(PB_NODE_LINKS_KEY);
        pb_link.encode_length_delimited(&mut buf)?;
    }

    buf.push(PB_NODE_DATA_KEY);
    prost::encode_length_delimiter(data.len(), &mut buf)?;
    buf.extend_from_slice(&data);

    Ok(buf)
}

/// A child reference recovered from an encoded stem node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLink {
    /// Child identifier.
    pub id: ContentId,
    /// Link name (always empty for nodes reef writes).
    pub name: Option<String>,
    /// Cumulative encoded size of the child subtree.
    pub tsize: Option<u64>,
}

/// Contents of an encoded stem node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStem {
    /// Declared total logical size.
    pub filesize: Option<u64>,
    /// Logical size of each child, in link order.
    pub blocksizes: Vec<u64>,
    /// Child references, in order.
    pub links: Vec<DecodedLink>,
}

/// Decode a stem node produced by [`encode_stem_node`].
pub fn decode_stem_node(bytes: &[u8]) -> Result<DecodedStem, DagError> {
    let node = PbNode::decode(bytes)?;
    let unixfs = UnixFsData::decode(node.data.as_deref().unwrap_or_default())?;

    let links = node
        .links
        .into_iter()
        .map(|link| {
            let hash = link
                .hash
                .ok_or_else(|| DagError::InvalidLink("missing hash".into()))?;
            let id = ContentId::try_from(hash.as_slice())
                .map_err(|e| DagError::InvalidLink(e.to_string()))?;
            Ok(DecodedLink {
                id,
                name: link.name,
                tsize: link.tsize,
            })
        })
        .collect::<Result<Vec<_>, DagError>>()?;

    Ok(DecodedStem {
        filesize: unixfs.filesize,
        blocksizes: unixfs.blocksizes,
        links,
    })
}
