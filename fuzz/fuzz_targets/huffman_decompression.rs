#![no_main]

use huffpuff::decompress_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decompress_bytes(data);
});
