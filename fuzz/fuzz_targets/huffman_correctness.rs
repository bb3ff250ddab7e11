#![no_main]

use huffpuff::{compress_bytes, decompress_bytes};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let compressed = compress_bytes(data).unwrap();
    assert_eq!(data, decompress_bytes(&compressed).unwrap().as_slice());
});
