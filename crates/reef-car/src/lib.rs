//! Archive containers.
//!
//! - **v1** ([`write_v1`]): `varint(len) ++ dag-cbor({roots, version: 1})`
//!   followed by one `varint(len) ++ cid ++ payload` record per stored block.
//! - **v2** ([`wrap_v2`]): an 11-byte pragma, a 40-byte envelope header
//!   (characteristics, data offset, data size, index offset), the unmodified
//!   v1 payload, then a DAG-CBOR index of `{cid, offset}` entries.
//!
//! All envelope integers are fixed-width little-endian `u64`.

mod error;
mod v1;
mod v2;
mod writer;

pub use error::CarError;
pub use v1::{
    BlockSection, CarV1, CarV1Header, encode_block, encode_v1_blocks, encode_v1_header, write_v1,
};
pub use v2::{CarV2Header, IndexEntry, create_v2, encode_index, index_entries, wrap_v2};
pub use writer::{write_file, write_to};

/// Append an unsigned LEB128 varint to `buf`.
pub(crate) fn put_varint(buf: &mut Vec<u8>, value: u64) {
    let mut scratch = unsigned_varint::encode::u64_buffer();
    buf.extend_from_slice(unsigned_varint::encode::u64(value, &mut scratch));
}

/// Number of bytes `value` occupies as a varint.
pub(crate) fn varint_len(value: u64) -> usize {
    let mut scratch = unsigned_varint::encode::u64_buffer();
    unsigned_varint::encode::u64(value, &mut scratch).len()
}
