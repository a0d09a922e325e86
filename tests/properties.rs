//! Property-based checks of the codec invariants.

use std::io::Cursor;

use pixel_huffman::{sidecar, DecodeMode, FrameHeader, HeaderFormat, HuffmanCodec, HuffmanTree};
use proptest::prelude::*;

fn pixel_buffer() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..2048)
}

/// Buffers drawn from a handful of values, so codes get long and skewed.
fn skewed_buffer() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![0u8, 9, 10, 13, 32, 255]), 1..512)
}

proptest! {
    #[test]
    fn prop_roundtrip(data in pixel_buffer()) {
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let bits = codec.encode_bits(&data).unwrap();
        prop_assert!(bits.as_bytes().iter().all(|&t| t == b'0' || t == b'1'));
        prop_assert_eq!(codec.decode_bits(bits.as_bytes(), DecodeMode::Strict).unwrap(), data);
    }

    #[test]
    fn prop_framed_roundtrip(data in skewed_buffer(), text in any::<bool>()) {
        let format = if text { HeaderFormat::Text } else { HeaderFormat::Binary };
        let codec = HuffmanCodec::from_bytes(&data).unwrap();
        let header = FrameHeader::new(data.len() as u32, 1);
        let artifact = codec.encode(&data, header, format).unwrap();
        prop_assert_eq!(codec.decode(&artifact, DecodeMode::Strict).unwrap(), data);
    }

    #[test]
    fn prop_prefix_free_and_depth(data in pixel_buffer()) {
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = tree.generate_table();
        prop_assert!(table.is_prefix_free());

        let codes: Vec<&str> = table.iter().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a));
                }
            }
        }

        if tree.leaf_count() > 1 {
            for (symbol, code) in table.iter() {
                prop_assert_eq!(Some(code.len()), tree.depth_of(symbol));
            }
        }
    }

    #[test]
    fn prop_sidecar_roundtrip(data in pixel_buffer()) {
        let table = HuffmanTree::from_bytes(&data).unwrap().generate_table();
        let mut out = Vec::new();
        sidecar::save(&table, &mut out).unwrap();
        prop_assert_eq!(sidecar::load(Cursor::new(out)).unwrap(), table);
    }

    #[test]
    fn prop_deterministic(data in skewed_buffer()) {
        let a = HuffmanTree::from_bytes(&data).unwrap().generate_table();
        let b = HuffmanTree::from_bytes(&data).unwrap().generate_table();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_all_byte_values_survive_sidecar() {
    let data: Vec<u8> = (0..=255u8).collect();
    let table = HuffmanTree::from_bytes(&data).unwrap().generate_table();
    assert_eq!(table.len(), 256);

    let mut out = Vec::new();
    sidecar::save(&table, &mut out).unwrap();
    let loaded = sidecar::load(Cursor::new(out)).unwrap();
    assert_eq!(loaded, table);
    for symbol in [b' ', b'\n', b'\r', b'\t', 0x0b, 0x0c, 0] {
        assert_eq!(loaded.get(symbol), table.get(symbol));
    }
}
