use std::io::Write;

use crate::bit_io::BitWriter;
use crate::config::CodecConfig;
use crate::container::{header_len, write_header};
use crate::error::{HuffmanError, Phase, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanTree;

/// Builds a complete container (header and packed payload) for one input.
#[derive(Debug, Clone, Default)]
pub struct HuffmanEncoder {
    config: CodecConfig,
}

impl HuffmanEncoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encodes `data` into an in-memory container.
    pub fn pack(&self, data: &[u8]) -> Result<Vec<u8>> {
        let frequencies = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&frequencies);
        let codes = tree.code_table()?;

        let payload_bits = codes.encoded_bit_length(&frequencies);
        log::debug!(
            "encoding {} bytes: {} distinct symbols, max code length {}, {} payload bits",
            data.len(),
            frequencies.distinct_symbols(),
            codes.max_code_length(),
            payload_bits
        );
        if log::log_enabled!(log::Level::Trace) {
            for (symbol, code) in codes.iter() {
                log::trace!("code {:#04x} = {}", symbol, code);
            }
        }

        let capacity = header_len(frequencies.distinct_symbols()) + payload_bits.div_ceil(8);
        let mut container = Vec::with_capacity(capacity as usize);
        write_header(&mut container, &frequencies, self.config.alphabet)?;

        let mut writer = BitWriter::with_phase(container, Phase::PayloadWrite);
        for &byte in data {
            let code = codes.get(byte).ok_or_else(|| {
                HuffmanError::invalid_state(format!("no code for byte {:#04x}", byte))
            })?;
            writer.write_code(code)?;
        }
        debug_assert_eq!(writer.bits_written(), payload_bits);
        let container = writer.flush()?;

        log::debug!("container is {} bytes", container.len());
        Ok(container)
    }

    /// Encodes `data` and writes the container to `sink`.
    ///
    /// Nothing reaches `sink` unless encoding succeeded. Returns the number
    /// of bytes written.
    pub fn encode<W: Write>(&self, data: &[u8], mut sink: W) -> Result<u64> {
        let container = self.pack(data)?;
        sink.write_all(&container)
            .and_then(|_| sink.flush())
            .map_err(|e| HuffmanError::io(Phase::OutputWrite, e))?;
        Ok(container.len() as u64)
    }
}
