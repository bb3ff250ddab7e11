//! # huffpuff
//!
//! Static Huffman compression of byte streams.
//!
//! A container is a count-prefixed table of `(symbol, frequency)` pairs
//! followed by the Huffman code of every input byte, packed most significant
//! bit first. The decoder rebuilds the same tree from the table alone, so the
//! tree construction order is fixed: lowest frequency first, and among equal
//! frequencies the node that was queued first.
//!
//! ```rust
//! let data = b"abracadabra";
//! let container = huffpuff::compress_bytes(data)?;
//! assert_eq!(huffpuff::decompress_bytes(&container)?, data);
//! # Ok::<(), huffpuff::HuffmanError>(())
//! ```

use std::io::{Read, Write};

pub mod bit_io;
pub mod code;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod huffman_decoder;
pub mod huffman_encoder;

pub use code::Code;
pub use config::{Alphabet, CodecConfig};
pub use error::{HuffmanError, Phase, Result};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanTree};
pub use huffman_decoder::HuffmanDecoder;
pub use huffman_encoder::HuffmanEncoder;

/// Reads all of `source`, compresses it and writes the container to `sink`.
/// Returns the number of bytes written.
pub fn compress<R: Read, W: Write>(source: R, sink: W) -> Result<u64> {
    compress_with_config(source, sink, &CodecConfig::default())
}

/// Reads a container from `source` and writes the original bytes to `sink`.
/// Returns the number of bytes written.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<u64> {
    decompress_with_config(source, sink, &CodecConfig::default())
}

pub fn compress_with_config<R: Read, W: Write>(
    mut source: R,
    sink: W,
    config: &CodecConfig,
) -> Result<u64> {
    let mut data = Vec::new();
    source
        .read_to_end(&mut data)
        .map_err(|e| HuffmanError::io(Phase::InputRead, e))?;
    HuffmanEncoder::new(config.clone()).encode(&data, sink)
}

pub fn decompress_with_config<R: Read, W: Write>(
    source: R,
    sink: W,
    config: &CodecConfig,
) -> Result<u64> {
    HuffmanDecoder::new(config.clone()).decode(source, sink)
}

pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanEncoder::default().pack(data)
}

pub fn decompress_bytes(container: &[u8]) -> Result<Vec<u8>> {
    HuffmanDecoder::default().unpack(container)
}
