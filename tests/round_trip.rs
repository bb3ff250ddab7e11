use huffpuff::container::read_header;
use huffpuff::{
    compress, compress_bytes, decompress, decompress_bytes, Alphabet, Code, FrequencyTable,
    HuffmanTree,
};
use proptest::prelude::*;

fn code(s: &str) -> Code {
    Code::from_str_bits(s).unwrap()
}

#[test]
fn test_empty_input() {
    let container = compress_bytes(b"").unwrap();
    assert_eq!(container, vec![0, 0, 0, 0]);
    assert!(decompress_bytes(&container).unwrap().is_empty());
}

#[test]
fn test_repeated_byte() {
    let data = vec![0x41u8; 10];
    let container = compress_bytes(&data).unwrap();

    // one header entry, then ten `0` bits padded to two bytes
    assert_eq!(container.len(), 4 + 8 + 2);
    assert_eq!(&container[12..], &[0x00u8, 0x00]);
    assert_eq!(decompress_bytes(&container).unwrap(), data);
}

#[test]
fn test_tie_break_codes() {
    let frequencies: FrequencyTable = [(b'A', 3), (b'B', 3), (b'C', 5)].into_iter().collect();
    let codes = HuffmanTree::from_frequencies(&frequencies)
        .code_table()
        .unwrap();

    assert_eq!(codes.get(b'A'), Some(&code("10")));
    assert_eq!(codes.get(b'B'), Some(&code("11")));
    assert_eq!(codes.get(b'C'), Some(&code("0")));
}

#[test]
fn test_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let container = compress_bytes(&data).unwrap();
    assert_eq!(decompress_bytes(&container).unwrap(), data);
}

#[test]
fn test_stream_interfaces() {
    let text = lipsum_like();
    let mut container: Vec<u8> = Vec::new();
    let written = compress(text.as_bytes(), &mut container).unwrap();
    assert_eq!(written, container.len() as u64);
    assert!(container.len() < text.len());

    let mut restored: Vec<u8> = Vec::new();
    let written = decompress(container.as_slice(), &mut restored).unwrap();
    assert_eq!(written, text.len() as u64);
    assert_eq!(restored, text.as_bytes());
}

fn lipsum_like() -> String {
    "the quick brown fox jumps over the lazy dog. ".repeat(40)
}

proptest! {
    #[test]
    fn prop_round_trip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let container = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&container).unwrap(), data);
    }

    #[test]
    fn prop_skewed_round_trip(data in proptest::collection::vec(prop_oneof![
        8 => Just(b'e'),
        4 => Just(b't'),
        2 => Just(b'a'),
        1 => any::<u8>(),
    ], 0..4096)) {
        let container = compress_bytes(&data).unwrap();
        prop_assert_eq!(decompress_bytes(&container).unwrap(), data);
    }

    #[test]
    fn prop_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(compress_bytes(&data).unwrap(), compress_bytes(&data).unwrap());
    }

    #[test]
    fn prop_header_rebuilds_same_codes(data in proptest::collection::vec(any::<u8>(), 1..1024)) {
        let container = compress_bytes(&data).unwrap();
        let from_header = read_header(&mut container.as_slice(), Alphabet::Full).unwrap();
        let original = FrequencyTable::from_bytes(&data);
        prop_assert_eq!(&from_header, &original);

        let rebuilt = HuffmanTree::from_frequencies(&from_header).code_table().unwrap();
        let expected = HuffmanTree::from_frequencies(&original).code_table().unwrap();
        prop_assert_eq!(rebuilt, expected);
    }

    #[test]
    fn prop_prefix_free(data in proptest::collection::vec(any::<u8>(), 1..1024)) {
        let codes = HuffmanTree::from_bytes(&data).code_table().unwrap();
        for (a, code_a) in codes.iter() {
            for (b, code_b) in codes.iter() {
                if a != b {
                    prop_assert!(!code_a.is_prefix_of(code_b));
                }
            }
        }
    }

    #[test]
    fn prop_truncation_is_detected(data in proptest::collection::vec(any::<u8>(), 1..512), cut in 1usize..16) {
        let container = compress_bytes(&data).unwrap();
        let keep = container.len().saturating_sub(cut);
        let err = decompress_bytes(&container[..keep]).unwrap_err();
        prop_assert!(err.is_malformed());
    }
}
