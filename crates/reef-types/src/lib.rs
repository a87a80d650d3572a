//! Shared types and constants for reef.
//!
//! This crate defines the types every stage of the archive pipeline agrees on:
//! the content identifier ([`ContentId`]) and its [`Codec`], the fixed
//! chunking and fan-out parameters, the container wire constants, and the
//! [`ArchiveConfig`] consumed by the builder.

use std::fmt;
use std::str::FromStr;

use cid::Cid;
use multihash::Multihash;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Size of every leaf chunk except possibly the last (256 KiB).
pub const CHUNK_SIZE: u32 = 262_144;

/// Maximum number of children a single stem node may link to.
///
/// Readers that enforce the same limit reject wider nodes, so this value is
/// part of the archive format.
pub const MAX_LINKS: usize = 174;

/// Multihash code for SHA2-256.
pub const SHA2_256: u64 = 0x12;

/// Length in bytes of a SHA2-256 digest.
pub const SHA2_256_LEN: usize = 32;

/// Version number written into the v1 container header.
pub const CAR_V1_VERSION: u64 = 1;

/// Magic prefix of a v2 container: `varint(10) ++ cbor({"version": 2})`.
pub const CARV2_PRAGMA: [u8; 11] = [
    0x0a, 0xa1, 0x67, 0x76, 0x65, 0x72, 0x73, 0x69, 0x6f, 0x6e, 0x02,
];

/// Size of the fixed v2 envelope header that follows the pragma.
pub const CARV2_HEADER_SIZE: usize = 40;

/// Byte offset of the data section in every v2 container.
pub const CARV2_DATA_OFFSET: u64 = (CARV2_PRAGMA.len() + CARV2_HEADER_SIZE) as u64;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Content-type tag carried by a [`ContentId`].
///
/// The same bytes identified under different codecs yield different IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Uninterpreted leaf bytes.
    Raw,
    /// Structured stem node (DAG-PB).
    DagPb,
}

impl Codec {
    /// Multicodec value of this codec.
    pub const fn code(self) -> u64 {
        match self {
            Codec::Raw => 0x55,
            Codec::DagPb => 0x70,
        }
    }

    /// Look up a codec by its multicodec value.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x55 => Some(Codec::Raw),
            0x70 => Some(Codec::DagPb),
            _ => None,
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Raw => f.write_str("raw"),
            Codec::DagPb => f.write_str("dag-pb"),
        }
    }
}

/// Self-describing content identifier: CIDv1 over a SHA2-256 multihash.
///
/// Displayed and serialized in its canonical base32 string form
/// (`bafk…` for raw leaves, `bafy…` for stem nodes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ContentId(Cid);

impl ContentId {
    /// Build a CIDv1 from a codec and a finished multihash.
    pub fn new(codec: Codec, hash: Multihash<64>) -> Self {
        Self(Cid::new_v1(codec.code(), hash))
    }

    /// The codec tag, if it is one reef produces.
    pub fn codec(&self) -> Option<Codec> {
        Codec::from_code(self.0.codec())
    }

    /// The raw digest bytes inside the multihash.
    pub fn digest(&self) -> &[u8] {
        self.0.hash().digest()
    }

    /// The multihash function code.
    pub fn hash_code(&self) -> u64 {
        self.0.hash().code()
    }

    /// Binary form: `varint(version) ++ varint(codec) ++ multihash`.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Length of the binary form in bytes.
    pub fn encoded_len(&self) -> usize {
        self.0.encoded_len()
    }

    /// Borrow the underlying [`Cid`].
    pub fn as_cid(&self) -> &Cid {
        &self.0
    }
}

impl From<Cid> for ContentId {
    fn from(cid: Cid) -> Self {
        Self(cid)
    }
}

impl TryFrom<&[u8]> for ContentId {
    type Error = cid::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Cid::try_from(bytes).map(Self)
    }
}

impl FromStr for ContentId {
    type Err = cid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cid::from_str(s).map(Self)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What the v2 index records as the offset of each block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexOffsetMode {
    /// Byte offset of the block record within the data section.
    #[default]
    Byte,
    /// Position of the block among stored blocks (0, 1, 2, …).
    ///
    /// Reproduces archives written by older tooling; conformant v2 readers
    /// cannot seek with these values.
    Ordinal,
}

/// Parameters for a single archive build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Offset encoding used in the v2 index.
    pub index_offsets: IndexOffsetMode,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
