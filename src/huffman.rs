//! Huffman tree construction and code table derivation.
//!
//! Nodes live in an arena (`Vec<HuffmanNode>`) and refer to their children by
//! index. The tree is built bottom-up from a [`FrequencyTable`] and never
//! changes afterwards.
//!
//! Construction is deterministic: the working set is a min-heap keyed by
//! `(frequency, sequence)`. Leaves get sequence numbers in ascending symbol
//! order and every merged node gets the next number, so among equal
//! frequencies the node that entered the working set first is taken first.
//! The decoder relies on this to rebuild the encoder's tree from the header.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use itertools::Itertools;

use crate::code::Code;
use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanNode {
    Leaf {
        symbol: u8,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffmanNode {
    pub fn frequency(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { frequency, .. } => *frequency,
            HuffmanNode::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffmanNode>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(2 * frequencies.distinct_symbols());
        let mut heap = BinaryHeap::new();
        let mut sequence = 0u64;

        for (symbol, frequency) in frequencies.iter() {
            nodes.push(HuffmanNode::Leaf { symbol, frequency });
            heap.push(Reverse((frequency, sequence, nodes.len() - 1)));
            sequence += 1;
        }

        while heap.len() > 1 {
            let (Some(Reverse((f1, _, left))), Some(Reverse((f2, _, right)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };

            let frequency = f1 + f2;
            nodes.push(HuffmanNode::Internal {
                frequency,
                left,
                right,
            });
            heap.push(Reverse((frequency, sequence, nodes.len() - 1)));
            sequence += 1;
        }

        let root = heap.pop().map(|Reverse((_, _, id))| id);
        Self { nodes, root }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_frequencies(&FrequencyTable::from_bytes(data))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffmanNode {
        &self.nodes[id]
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Sum of all leaf frequencies, i.e. the number of encoded symbols.
    pub fn total_frequency(&self) -> u64 {
        self.root.map_or(0, |root| self.nodes[root].frequency())
    }

    /// Child reached from `id` by following `bit`, or `None` at a leaf.
    pub fn child(&self, id: NodeId, bit: u8) -> Option<NodeId> {
        match self.nodes[id] {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { left, right, .. } => {
                Some(if bit == 0 { left } else { right })
            }
        }
    }

    /// Walks the tree depth-first and records the path to every leaf.
    ///
    /// A tree made of a single leaf has no edges; that symbol is given the
    /// one-bit code `0` so it still occupies space in the bit stream.
    pub fn code_table(&self) -> Result<CodeTable> {
        let mut table = CodeTable::default();
        let Some(root) = self.root else {
            return Ok(table);
        };

        if let HuffmanNode::Leaf { symbol, .. } = self.nodes[root] {
            let mut code = Code::new();
            code.add_bit(0)?;
            table.insert(symbol, code);
            return Ok(table);
        }

        let mut path = Code::new();
        self.collect_codes(root, &mut path, &mut table)?;
        Ok(table)
    }

    fn collect_codes(&self, id: NodeId, path: &mut Code, table: &mut CodeTable) -> Result<()> {
        match self.nodes[id] {
            HuffmanNode::Leaf { symbol, .. } => {
                table.insert(symbol, *path);
                Ok(())
            }
            HuffmanNode::Internal { left, right, .. } => {
                self.descend(left, 0, path, table)?;
                self.descend(right, 1, path, table)
            }
        }
    }

    fn descend(&self, child: NodeId, bit: u8, path: &mut Code, table: &mut CodeTable) -> Result<()> {
        if let Err(err) = path.add_bit(bit) {
            return Err(too_deep(err, path));
        }
        self.collect_codes(child, path, table)?;
        path.remove_bit()
    }
}

fn too_deep(err: HuffmanError, path: &Code) -> HuffmanError {
    match err {
        HuffmanError::InvalidState { .. } => HuffmanError::invalid_state(format!(
            "huffman tree deeper than code capacity at path {}",
            path
        )),
        other => other,
    }
}

/// Code assigned to each symbol present in the tree.
#[derive(Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; ALPHABET_SIZE],
}

impl Default for CodeTable {
    fn default() -> Self {
        Self {
            codes: [None; ALPHABET_SIZE],
        }
    }
}

impl CodeTable {
    fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_code_length(&self) -> usize {
        self.codes.iter().flatten().map(Code::len).max().unwrap_or(0)
    }

    /// Payload size in bits for input with the given frequencies.
    pub fn encoded_bit_length(&self, frequencies: &FrequencyTable) -> u64 {
        frequencies
            .iter()
            .map(|(symbol, count)| count * self.get(symbol).map_or(0, |code| code.len() as u64))
            .sum()
    }
}

impl fmt::Debug for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CodeTable {{ {} }}",
            self.iter()
                .map(|(symbol, code)| format!("{:#04x}: {}", symbol, code))
                .join(", ")
        )
    }
}
