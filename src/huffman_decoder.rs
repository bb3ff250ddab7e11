use std::io::{Read, Write};

use crate::bit_io::BitReader;
use crate::config::CodecConfig;
use crate::container::read_header;
use crate::error::{HuffmanError, Phase, Result};
use crate::huffman::{HuffmanNode, HuffmanTree, NodeId};

// Upper bound on the output buffer reserved up front from an untrusted header.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Reads a container and reproduces the original bytes.
///
/// The header's frequencies add up to the number of encoded symbols, so the
/// decoder stops after exactly that many and never walks into the padding
/// of the last byte.
#[derive(Debug, Clone, Default)]
pub struct HuffmanDecoder {
    config: CodecConfig,
}

impl HuffmanDecoder {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn unpack(&self, container: &[u8]) -> Result<Vec<u8>> {
        self.decode_to_vec(container)
    }

    /// Decodes the container read from `source` and writes the original
    /// bytes to `sink`. Nothing is written unless the whole container
    /// decoded cleanly. Returns the number of bytes written.
    pub fn decode<R: Read, W: Write>(&self, source: R, mut sink: W) -> Result<u64> {
        let output = self.decode_to_vec(source)?;
        sink.write_all(&output)
            .and_then(|_| sink.flush())
            .map_err(|e| HuffmanError::io(Phase::OutputWrite, e))?;
        Ok(output.len() as u64)
    }

    fn decode_to_vec<R: Read>(&self, mut source: R) -> Result<Vec<u8>> {
        let frequencies = read_header(&mut source, self.config.alphabet)?;
        let tree = HuffmanTree::from_frequencies(&frequencies);
        let total = tree.total_frequency();
        log::debug!(
            "decoding {} symbols over {} distinct values",
            total,
            frequencies.distinct_symbols()
        );

        let mut reader = BitReader::with_phase(source, Phase::PayloadRead);
        let mut output = Vec::with_capacity(total.min(MAX_PREALLOCATION) as usize);

        if let Some(root) = tree.root() {
            while (output.len() as u64) < total {
                match read_symbol(&tree, root, &mut reader)? {
                    Some(symbol) => output.push(symbol),
                    None => {
                        return Err(HuffmanError::malformed(format!(
                            "payload ended after {} of {} symbols",
                            output.len(),
                            total
                        )))
                    }
                }
            }
        }

        self.check_trailer(&mut reader)?;
        log::debug!(
            "decoded {} bytes from {} payload bytes",
            output.len(),
            reader.bytes_read()
        );
        Ok(output)
    }

    fn check_trailer<R: Read>(&self, reader: &mut BitReader<R>) -> Result<()> {
        let (padding_bits, clean) = reader.pending_padding();
        let trailing = reader.next_byte()?.is_some();

        let problem = if !clean {
            format!("{} padding bits are not all zero", padding_bits)
        } else if trailing {
            "unexpected data after the payload".to_string()
        } else {
            return Ok(());
        };

        if self.config.strict_trailer {
            Err(HuffmanError::malformed(problem))
        } else {
            log::warn!("ignoring trailer: {}", problem);
            Ok(())
        }
    }
}

/// Follows bits from the root to a leaf.
///
/// Returns `None` when the stream ends exactly on a symbol boundary. A root
/// that is itself a leaf stands for the one-bit code `0`.
fn read_symbol<R: Read>(
    tree: &HuffmanTree,
    root: NodeId,
    reader: &mut BitReader<R>,
) -> Result<Option<u8>> {
    let mut node = root;
    let mut depth = 0usize;

    loop {
        if let HuffmanNode::Leaf { symbol, .. } = *tree.node(node) {
            if depth > 0 {
                return Ok(Some(symbol));
            }
        }

        let bit = match reader.get_bit()? {
            Some(bit) => bit,
            None if depth == 0 => return Ok(None),
            None => {
                return Err(HuffmanError::malformed(format!(
                    "payload ended {} bits into a code",
                    depth
                )))
            }
        };
        depth += 1;

        node = match tree.child(node, bit) {
            Some(child) => child,
            None if bit == 0 => node,
            None => {
                return Err(HuffmanError::malformed(
                    "bit 1 has no meaning in a single-symbol payload",
                ))
            }
        };
    }
}
