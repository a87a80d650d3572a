//! Shared test utilities for reef-engine tests.

use reef_car::CarV2Header;
use reef_types::CARV2_HEADER_SIZE;

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

/// Read the envelope header of a v2 container.
pub fn envelope(v2: &[u8]) -> CarV2Header {
    let mut raw = [0u8; CARV2_HEADER_SIZE];
    raw.copy_from_slice(&v2[11..11 + CARV2_HEADER_SIZE]);
    CarV2Header::from_bytes(&raw)
}

/// Length of the varint-prefixed header record at the start of a v1 container.
pub fn v1_header_len(v1: &[u8]) -> usize {
    let (len, rest) = unsigned_varint::decode::u64(v1).unwrap();
    v1.len() - rest.len() + len as usize
}

/// Lengths of every block record following the v1 header.
pub fn v1_record_lens(v1: &[u8]) -> Vec<usize> {
    let mut rest = &v1[v1_header_len(v1)..];
    let mut lens = Vec::new();
    while !rest.is_empty() {
        let (len, body) = unsigned_varint::decode::u64(rest).unwrap();
        let record_len = rest.len() - body.len() + len as usize;
        lens.push(record_len);
        rest = &rest[record_len..];
    }
    lens
}
