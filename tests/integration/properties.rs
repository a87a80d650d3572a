//! Whole-pipeline properties that hold for every input.

use bytes::Bytes;
use reef_cas::identify;
use reef_dag::decode_stem_node;
use reef_engine::{ArchiveBuilder, build_archive};
use reef_integration_tests::{parse_v1, parse_v2, test_data};
use reef_types::{CHUNK_SIZE, Codec, MAX_LINKS};

const SIZES: &[usize] = &[0, 1, 4096, 262_144, 262_145, 524_288, 1_000_003];

#[test]
fn test_determinism() {
    for &size in SIZES {
        let data = test_data(size);
        let a = build_archive(&data).unwrap();
        let b = build_archive(&data).unwrap();
        assert_eq!(a.v1, b.v1, "v1 differs for size {size}");
        assert_eq!(a.v2, b.v2, "v2 differs for size {size}");
        assert_eq!(a.root_identifier(), b.root_identifier());
    }
}

#[test]
fn test_small_inputs_root_is_raw_identity() {
    for size in [0, 1, 100, 262_144] {
        let data = test_data(size);
        let archive = build_archive(&data).unwrap();
        assert_eq!(archive.root, identify(&data, Codec::Raw).unwrap());
        assert_eq!(parse_v1(&archive.v1).unwrap().blocks.len(), 1);
    }
}

#[test]
fn test_root_size_accounting() {
    for &size in SIZES.iter().filter(|&&s| s > CHUNK_SIZE as usize) {
        let data = test_data(size);
        let archive = build_archive(&data).unwrap();
        let parsed = parse_v1(&archive.v1).unwrap();
        let blocks = parsed.block_map();

        let root = decode_stem_node(blocks[&archive.root]).unwrap();
        assert_eq!(root.filesize, Some(size as u64));
        assert_eq!(root.blocksizes.iter().sum::<u64>(), size as u64);
    }
}

#[test]
fn test_fanout_bound_over_large_input() {
    // 180 leaves: forces a second stem level at the real chunk size.
    let data = test_data(180 * CHUNK_SIZE as usize);
    let archive = build_archive(&data).unwrap();
    assert_eq!(archive.stats.depth, 2);
    assert_eq!(archive.stats.stem_count, 3);

    let parsed = parse_v1(&archive.v1).unwrap();
    for block in &parsed.blocks {
        if block.id.codec() == Some(Codec::DagPb) {
            let stem = decode_stem_node(&block.data).unwrap();
            assert!(stem.links.len() <= MAX_LINKS);
        }
    }
}

#[test]
fn test_envelope_arithmetic() {
    for &size in SIZES {
        let archive = build_archive(&test_data(size)).unwrap();
        let parsed = parse_v2(&archive.v2).unwrap();
        let env = parsed.envelope;

        assert_eq!(env.data_offset, 51);
        assert_eq!(env.index_offset, env.data_offset + env.data_size);
        assert_eq!(env.characteristics, [0u8; 16]);

        let records: usize = parsed.v1.blocks.iter().map(|b| b.record_len).sum();
        assert_eq!(env.data_size as usize, parsed.v1.header_len + records);
    }
}

#[test]
fn test_empty_input_scenario() {
    let archive = build_archive(b"").unwrap();
    let parsed = parse_v2(&archive.v2).unwrap();

    assert_eq!(archive.root, identify(b"", Codec::Raw).unwrap());
    assert_eq!(parsed.v1.blocks.len(), 1);
    assert!(parsed.v1.blocks[0].data.is_empty());
    assert_eq!(parsed.index.len(), 1);
}

#[tokio::test]
async fn test_async_build_matches_sync_for_all_sizes() {
    let builder = ArchiveBuilder::default();
    for &size in SIZES {
        let data = test_data(size);
        let sync = build_archive(&data).unwrap();
        let built = builder.build_async(Bytes::from(data)).await.unwrap();
        assert_eq!(sync.v2, built.v2);
    }
}
